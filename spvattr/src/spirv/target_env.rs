use std::fmt;

use crate::{
    attributes::{ArrayAttr, AttrKind, Attribute, attr_view},
    context::Context,
    error::{AttrResult, VerifyError},
    location::Location,
    spirv::{
        enums::{Capability, Extension, Version},
        resource_limits::ResourceLimitsAttr,
        vce::VerCapExtAttr,
    },
    storage::{AttributeStorage, StorageTable},
};

/// Lookup key of a [`TargetEnvAttr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetEnvKey<'ctx> {
    pub triple: VerCapExtAttr<'ctx>,
    pub limits: Attribute<'ctx>,
}

#[derive(Debug)]
pub struct TargetEnvStorage<'ctx> {
    key: TargetEnvKey<'ctx>,
}

impl<'ctx> AttributeStorage<'ctx> for TargetEnvStorage<'ctx> {
    type Key = TargetEnvKey<'ctx>;
    type Error = VerifyError;
    const KIND: AttrKind = AttrKind::TargetEnv;

    fn verify(key: &Self::Key) -> Result<(), VerifyError> {
        match ResourceLimitsAttr::dyn_cast(key.limits) {
            Some(_) => Ok(()),
            None => Err(VerifyError::KindMismatch {
                field: "limits",
                expected: "spirv::ResourceLimitsAttr",
                found: format!("{} attribute `{}`", key.limits.kind(), key.limits),
            }),
        }
    }

    fn matches(&self, key: &Self::Key) -> bool {
        self.key == *key
    }

    fn construct(key: Self::Key) -> Self {
        Self { key }
    }

    fn table(ctx: &'ctx Context<'ctx>) -> &'ctx StorageTable<'ctx, Self> {
        &ctx.target_envs
    }
}

impl fmt::Display for TargetEnvStorage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#spv.target_env<{}, {}>", self.key.triple, self.key.limits)
    }
}

attr_view! {
    /// A target environment: the version, capabilities and extensions a
    /// target supports, together with its resource limits.
    TargetEnvAttr<'ctx> => TargetEnvStorage<'ctx>, TargetEnv
}

impl<'ctx> TargetEnvAttr<'ctx> {
    /// Get or create the target environment.
    ///
    /// `limits` must be a [`ResourceLimitsAttr`]. Any other attribute, even a
    /// dictionary, is rejected with [`VerifyError::KindMismatch`].
    pub fn get(
        ctx: &'ctx Context<'ctx>,
        triple: VerCapExtAttr<'ctx>,
        limits: impl Into<Attribute<'ctx>>,
    ) -> AttrResult<Self> {
        Self::get_checked(ctx, &Location::unknown(), triple, limits)
    }

    pub fn get_checked(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        triple: VerCapExtAttr<'ctx>,
        limits: impl Into<Attribute<'ctx>>,
    ) -> AttrResult<Self> {
        let key = TargetEnvKey {
            triple,
            limits: limits.into(),
        };
        ctx.get_or_create::<TargetEnvStorage<'ctx>>(location, key)
            .map(Self)
    }

    /// The environment assumed when none is specified: SPIR-V 1.0 with the
    /// `Shader` capability, the `SPV_KHR_storage_buffer_storage_class`
    /// extension and the default resource limits.
    ///
    /// Example:
    /// ```rust
    /// # use spvattr::{Context, spirv::{Capability, ResourceLimitsAttr, TargetEnvAttr, Version}};
    /// let ctx = Context::new();
    /// let env = TargetEnvAttr::default_target_env(&ctx);
    /// assert_eq!(env.version(), Version::V1_0);
    /// assert!(env.capabilities().eq([Capability::Shader]));
    /// assert_eq!(env.resource_limits(), ResourceLimitsAttr::default_limits(&ctx));
    /// ```
    pub fn default_target_env(ctx: &'ctx Context<'ctx>) -> Self {
        let triple = VerCapExtAttr::get(
            ctx,
            Version::V1_0,
            &[Capability::Shader],
            &[Extension::SPV_KHR_storage_buffer_storage_class],
        )
        .expect("known symbols always form a valid triple");
        Self::get(ctx, triple, ResourceLimitsAttr::default_limits(ctx))
            .expect("default limits are resource limits")
    }

    pub fn triple(self) -> VerCapExtAttr<'ctx> {
        self.0.key.triple
    }

    pub fn version(self) -> Version {
        self.triple().version()
    }

    pub fn capabilities(
        self,
    ) -> impl Iterator<Item = Capability> + ExactSizeIterator + Clone + 'ctx {
        self.triple().capabilities()
    }

    pub fn extensions(
        self,
    ) -> impl Iterator<Item = Extension> + ExactSizeIterator + Clone + 'ctx {
        self.triple().extensions()
    }

    pub fn capabilities_attr(self) -> ArrayAttr<'ctx> {
        self.triple().capabilities_attr()
    }

    pub fn extensions_attr(self) -> ArrayAttr<'ctx> {
        self.triple().extensions_attr()
    }

    pub fn resource_limits(self) -> ResourceLimitsAttr<'ctx> {
        ResourceLimitsAttr::dyn_cast(self.0.key.limits)
            .expect("limits kind is verified at construction")
    }

    /// The limits, as the erased attribute given at construction.
    pub fn limits_attr(self) -> Attribute<'ctx> {
        self.0.key.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{DictionaryAttr, IntegerAttr};

    #[test]
    fn test_generic_dictionary_is_a_kind_mismatch() {
        let ctx = Context::new();
        let triple = VerCapExtAttr::get(&ctx, Version::V1_0, &[], &[]).unwrap();
        let limit = Attribute::from(IntegerAttr::get_i32(&ctx, 128));
        let dict = DictionaryAttr::get(&ctx, [("max_push_constant_size", limit)]).unwrap();

        let err = TargetEnvAttr::get(&ctx, triple, dict).unwrap_err();
        assert_eq!(
            err.reason.to_string(),
            "expected spirv::ResourceLimitsAttr for limits, \
             found dictionary attribute `{max_push_constant_size = 128 : i32}`"
        );
        assert_eq!(ctx.num_records(AttrKind::TargetEnv), 0);
    }

    #[test]
    fn test_display() {
        let ctx = Context::new();
        let env = TargetEnvAttr::default_target_env(&ctx);
        assert_eq!(
            env.to_string(),
            "#spv.target_env<#spv.vce<v1.0, [Shader], [SPV_KHR_storage_buffer_storage_class]>, \
             {max_compute_workgroup_invocations = 128 : i32, \
             max_compute_workgroup_size = [128 : i32, 128 : i32, 64 : i32]}>"
        );
    }
}
