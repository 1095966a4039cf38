//! Closed SPIR-V enumerations
//!
//! Each enumeration maps bidirectionally to its canonical form. Numeric
//! enumerations implement [`CodeSymbol`] and every enumeration implements
//! [`NameSymbol`]. The tables are static and shared process-wide.
use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Lookup between an enumeration and its SPIR-V numeric code.
pub trait CodeSymbol: Sized + Copy {
    fn code(self) -> u32;

    /// Reverse lookup of a numeric code, `None` if the code is unknown.
    fn from_code(code: u32) -> Option<Self>;
}

/// Lookup between an enumeration and its textual name.
pub trait NameSymbol: Sized + Copy {
    fn stringify(self) -> &'static str;

    /// Reverse lookup of a name, `None` if the name is unknown.
    fn symbolize(name: &str) -> Option<Self>;
}

macro_rules! impl_code_symbol {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CodeSymbol for $ty {
                #[inline]
                fn code(self) -> u32 {
                    self as u32
                }

                #[inline]
                fn from_code(code: u32) -> Option<Self> {
                    Self::from_repr(code)
                }
            }
        )*
    };
}

macro_rules! impl_name_symbol {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NameSymbol for $ty {
                #[inline]
                fn stringify(self) -> &'static str {
                    self.into()
                }

                #[inline]
                fn symbolize(name: &str) -> Option<Self> {
                    Self::from_str(name).ok()
                }
            }
        )*
    };
}

/// SPIR-V specification version.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, EnumIter, EnumString,
    IntoStaticStr, Display,
)]
#[repr(u32)]
pub enum Version {
    #[strum(serialize = "v1.0")]
    V1_0 = 0,
    #[strum(serialize = "v1.1")]
    V1_1 = 1,
    #[strum(serialize = "v1.2")]
    V1_2 = 2,
    #[strum(serialize = "v1.3")]
    V1_3 = 3,
    #[strum(serialize = "v1.4")]
    V1_4 = 4,
    #[strum(serialize = "v1.5")]
    V1_5 = 5,
}

/// Storage class of a pointer or variable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumIter, EnumString, IntoStaticStr, Display,
)]
#[repr(u32)]
pub enum StorageClass {
    UniformConstant = 0,
    Input = 1,
    Uniform = 2,
    Output = 3,
    Workgroup = 4,
    CrossWorkgroup = 5,
    Private = 6,
    Function = 7,
    Generic = 8,
    PushConstant = 9,
    AtomicCounter = 10,
    Image = 11,
    StorageBuffer = 12,
    CallableDataNV = 5328,
    IncomingCallableDataNV = 5329,
    RayPayloadNV = 5338,
    HitAttributeNV = 5339,
    IncomingRayPayloadNV = 5342,
    ShaderRecordBufferNV = 5343,
    PhysicalStorageBuffer = 5349,
}

/// Capability a module may declare.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumIter, EnumString, IntoStaticStr, Display,
)]
#[repr(u32)]
pub enum Capability {
    Matrix = 0,
    Shader = 1,
    Geometry = 2,
    Tessellation = 3,
    Addresses = 4,
    Linkage = 5,
    Kernel = 6,
    Vector16 = 7,
    Float16Buffer = 8,
    Float16 = 9,
    Float64 = 10,
    Int64 = 11,
    Int64Atomics = 12,
    ImageBasic = 13,
    ImageReadWrite = 14,
    ImageMipmap = 15,
    Pipes = 17,
    Groups = 18,
    DeviceEnqueue = 19,
    LiteralSampler = 20,
    AtomicStorage = 21,
    Int16 = 22,
    TessellationPointSize = 23,
    GeometryPointSize = 24,
    ImageGatherExtended = 25,
    StorageImageMultisample = 27,
    UniformBufferArrayDynamicIndexing = 28,
    SampledImageArrayDynamicIndexing = 29,
    StorageBufferArrayDynamicIndexing = 30,
    StorageImageArrayDynamicIndexing = 31,
    ClipDistance = 32,
    CullDistance = 33,
    ImageCubeArray = 34,
    SampleRateShading = 35,
    ImageRect = 36,
    SampledRect = 37,
    GenericPointer = 38,
    Int8 = 39,
    InputAttachment = 40,
    SparseResidency = 41,
    MinLod = 42,
    Sampled1D = 43,
    Image1D = 44,
    SampledCubeArray = 45,
    SampledBuffer = 46,
    ImageBuffer = 47,
    ImageMSArray = 48,
    StorageImageExtendedFormats = 49,
    ImageQuery = 50,
    DerivativeControl = 51,
    InterpolationFunction = 52,
    TransformFeedback = 53,
    GeometryStreams = 54,
    StorageImageReadWithoutFormat = 55,
    StorageImageWriteWithoutFormat = 56,
    MultiViewport = 57,
    SubgroupDispatch = 58,
    NamedBarrier = 59,
    PipeStorage = 60,
    GroupNonUniform = 61,
    GroupNonUniformVote = 62,
    GroupNonUniformArithmetic = 63,
    GroupNonUniformBallot = 64,
    GroupNonUniformShuffle = 65,
    GroupNonUniformShuffleRelative = 66,
    GroupNonUniformClustered = 67,
    GroupNonUniformQuad = 68,
    SubgroupBallotKHR = 4423,
    DrawParameters = 4427,
    SubgroupVoteKHR = 4431,
    StorageBuffer16BitAccess = 4433,
    UniformAndStorageBuffer16BitAccess = 4434,
    StoragePushConstant16 = 4435,
    StorageInputOutput16 = 4436,
    DeviceGroup = 4437,
    MultiView = 4439,
    VariablePointersStorageBuffer = 4441,
    VariablePointers = 4442,
    AtomicStorageOps = 4445,
    SampleMaskPostDepthCoverage = 4447,
    StorageBuffer8BitAccess = 4448,
    UniformAndStorageBuffer8BitAccess = 4449,
    StoragePushConstant8 = 4450,
    DenormPreserve = 4464,
    DenormFlushToZero = 4465,
    SignedZeroInfNanPreserve = 4466,
    RoundingModeRTE = 4467,
    RoundingModeRTZ = 4468,
    Float16ImageAMD = 5008,
    ImageGatherBiasLodAMD = 5009,
    FragmentMaskAMD = 5010,
    StencilExportEXT = 5013,
    ImageReadWriteLodAMD = 5015,
    ShaderClockKHR = 5055,
    SampleMaskOverrideCoverageNV = 5249,
    GeometryShaderPassthroughNV = 5251,
    ShaderViewportIndexLayerEXT = 5254,
    ShaderViewportMaskNV = 5255,
    ShaderStereoViewNV = 5259,
    PerViewAttributesNV = 5260,
    FragmentFullyCoveredEXT = 5265,
    MeshShadingNV = 5266,
    ImageFootprintNV = 5282,
    FragmentBarycentricNV = 5284,
    ComputeDerivativeGroupQuadsNV = 5288,
    FragmentDensityEXT = 5291,
    GroupNonUniformPartitionedNV = 5297,
    ShaderNonUniform = 5301,
    RuntimeDescriptorArray = 5302,
    InputAttachmentArrayDynamicIndexing = 5303,
    UniformTexelBufferArrayDynamicIndexing = 5304,
    StorageTexelBufferArrayDynamicIndexing = 5305,
    UniformBufferArrayNonUniformIndexing = 5306,
    SampledImageArrayNonUniformIndexing = 5307,
    StorageBufferArrayNonUniformIndexing = 5308,
    StorageImageArrayNonUniformIndexing = 5309,
    InputAttachmentArrayNonUniformIndexing = 5310,
    UniformTexelBufferArrayNonUniformIndexing = 5311,
    StorageTexelBufferArrayNonUniformIndexing = 5312,
    RayTracingNV = 5340,
    VulkanMemoryModel = 5345,
    VulkanMemoryModelDeviceScope = 5346,
    PhysicalStorageBufferAddresses = 5347,
    ComputeDerivativeGroupLinearNV = 5350,
    CooperativeMatrixNV = 5357,
    FragmentShaderSampleInterlockEXT = 5363,
    FragmentShaderShadingRateInterlockEXT = 5372,
    ShaderSMBuiltinsNV = 5373,
    FragmentShaderPixelInterlockEXT = 5378,
    DemoteToHelperInvocationEXT = 5379,
    SubgroupShuffleINTEL = 5568,
    SubgroupBufferBlockIOINTEL = 5569,
    SubgroupImageBlockIOINTEL = 5570,
    SubgroupImageMediaBlockIOINTEL = 5579,
    IntegerFunctions2INTEL = 5584,
    SubgroupAvcMotionEstimationINTEL = 5696,
    SubgroupAvcMotionEstimationIntraINTEL = 5697,
    SubgroupAvcMotionEstimationChromaINTEL = 5698,
}

/// SPIR-V extension, identified by its registered name.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, Display)]
pub enum Extension {
    SPV_KHR_16bit_storage,
    SPV_KHR_8bit_storage,
    SPV_KHR_device_group,
    SPV_KHR_float_controls,
    SPV_KHR_physical_storage_buffer,
    SPV_KHR_multiview,
    SPV_KHR_no_integer_wrap_decoration,
    SPV_KHR_post_depth_coverage,
    SPV_KHR_shader_atomic_counter_ops,
    SPV_KHR_shader_ballot,
    SPV_KHR_shader_clock,
    SPV_KHR_shader_draw_parameters,
    SPV_KHR_storage_buffer_storage_class,
    SPV_KHR_subgroup_vote,
    SPV_KHR_variable_pointers,
    SPV_KHR_vulkan_memory_model,
    SPV_EXT_demote_to_helper_invocation,
    SPV_EXT_descriptor_indexing,
    SPV_EXT_fragment_fully_covered,
    SPV_EXT_fragment_invocation_density,
    SPV_EXT_fragment_shader_interlock,
    SPV_EXT_physical_storage_buffer,
    SPV_EXT_shader_stencil_export,
    SPV_EXT_shader_viewport_index_layer,
    SPV_AMD_gpu_shader_half_float_fetch,
    SPV_AMD_shader_ballot,
    SPV_AMD_shader_explicit_vertex_parameter,
    SPV_AMD_shader_fragment_mask,
    SPV_AMD_shader_image_load_store_lod,
    SPV_AMD_texture_gather_bias_lod,
    SPV_GOOGLE_decorate_string,
    SPV_GOOGLE_hlsl_functionality1,
    SPV_GOOGLE_user_type,
    SPV_INTEL_device_side_avc_motion_estimation,
    SPV_INTEL_media_block_io,
    SPV_INTEL_shader_integer_functions2,
    SPV_INTEL_subgroups,
    SPV_NV_compute_shader_derivatives,
    SPV_NV_cooperative_matrix,
    SPV_NV_fragment_shader_barycentric,
    SPV_NV_geometry_shader_passthrough,
    SPV_NV_mesh_shader,
    SPV_NV_ray_tracing,
    SPV_NV_sample_mask_override_coverage,
    SPV_NV_shader_image_footprint,
    SPV_NV_shader_sm_builtins,
    SPV_NV_shader_subgroup_partitioned,
    SPV_NV_shading_rate,
    SPV_NV_stereo_view_rendering,
    SPV_NV_viewport_array2,
    SPV_NVX_multiview_per_view_attributes,
}

impl_code_symbol!(Version, StorageClass, Capability);
impl_name_symbol!(Version, StorageClass, Capability, Extension);
