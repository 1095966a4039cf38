/// Name of the environment variable containing the path to the context
/// configuration file. If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/spvattr/context.toml` or
///      `$HOME/.config/spvattr/context.toml`
///  (2) on Windows: `%APPDATA%\spvattr\context.toml`
pub const ENV_CONFIG_PATH: &str = "SPVATTR_CONFIG_PATH";

/// Directory and file name used when building the default configuration path.
pub const CONFIG_DIR_NAME: &str = "spvattr";
pub const CONFIG_FILE_NAME: &str = "context.toml";

/// Name given to contexts created without an explicit configuration.
pub const DEFAULT_CONTEXT_NAME: &str = "spvattr";

/// Initial number of records each per-kind arena reserves.
pub const DEFAULT_ARENA_CAPACITY: usize = 64;

/// Kind names, as reported by [`crate::attributes::AttrKind::name`].
pub const KIND_NAME_INTEGER: &str = "integer";
pub const KIND_NAME_STRING: &str = "string";
pub const KIND_NAME_ARRAY: &str = "array";
pub const KIND_NAME_DICTIONARY: &str = "dictionary";
pub const KIND_NAME_INTERFACE_VAR_ABI: &str = "interface_var_abi";
pub const KIND_NAME_VCE: &str = "vce";
pub const KIND_NAME_TARGET_ENV: &str = "target_env";

/// Field names of `spirv::ResourceLimitsAttr`, in dictionary (sorted) order.
pub const MAX_COMPUTE_WORKGROUP_INVOCATIONS: &str = "max_compute_workgroup_invocations";
pub const MAX_COMPUTE_WORKGROUP_SIZE: &str = "max_compute_workgroup_size";

/// Resource limits used by `ResourceLimitsAttr::default_limits`.
pub const DEFAULT_MAX_COMPUTE_WORKGROUP_INVOCATIONS: i32 = 128;
pub const DEFAULT_MAX_COMPUTE_WORKGROUP_SIZE: [i32; 3] = [128, 128, 64];
