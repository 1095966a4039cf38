use std::fmt;

use smallvec::SmallVec;

use crate::{
    attributes::{ArrayAttr, AttrKind, Attribute, IntegerAttr, StringAttr, attr_view},
    context::Context,
    error::{AttrResult, VerifyError},
    location::Location,
    spirv::{
        enums::{Capability, CodeSymbol, Extension, NameSymbol, Version},
        expect_i32,
    },
    storage::{AttributeStorage, StorageTable},
};

/// Lookup key of a [`VerCapExtAttr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerCapExtKey<'ctx> {
    pub version: IntegerAttr<'ctx>,
    /// Integer attributes holding capability codes.
    pub capabilities: ArrayAttr<'ctx>,
    /// String attributes holding extension names.
    pub extensions: ArrayAttr<'ctx>,
}

#[derive(Debug)]
pub struct VerCapExtStorage<'ctx> {
    key: VerCapExtKey<'ctx>,
}

fn capability_of(attr: Attribute<'_>) -> Option<Capability> {
    attr.try_as_integer()?.code().and_then(Capability::from_code)
}

fn extension_of(attr: Attribute<'_>) -> Option<Extension> {
    Extension::symbolize(attr.try_as_string()?.value())
}

impl<'ctx> AttributeStorage<'ctx> for VerCapExtStorage<'ctx> {
    type Key = VerCapExtKey<'ctx>;
    type Error = VerifyError;
    const KIND: AttrKind = AttrKind::VerCapExt;

    fn verify(key: &Self::Key) -> Result<(), VerifyError> {
        expect_i32("version", key.version)?;
        if key.version.code().and_then(Version::from_code).is_none() {
            return Err(VerifyError::UnknownEnumValue {
                symbol: "version",
                value: key.version.zext_value().to_string(),
            });
        }

        if let Some(attr) = key.capabilities.iter().find(|attr| capability_of(*attr).is_none()) {
            return Err(VerifyError::UnknownEnumValue {
                symbol: "capability in capability list",
                value: attr.to_string(),
            });
        }

        if let Some(attr) = key.extensions.iter().find(|attr| extension_of(*attr).is_none()) {
            let value = match attr.try_as_string() {
                Some(name) => name.value().to_string(),
                None => attr.to_string(),
            };
            return Err(VerifyError::UnknownEnumValue {
                symbol: "extension in extension list",
                value,
            });
        }

        Ok(())
    }

    fn matches(&self, key: &Self::Key) -> bool {
        self.key == *key
    }

    fn construct(key: Self::Key) -> Self {
        Self { key }
    }

    fn table(ctx: &'ctx Context<'ctx>) -> &'ctx StorageTable<'ctx, Self> {
        &ctx.ver_cap_exts
    }
}

impl fmt::Display for VerCapExtStorage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.key.version.code().and_then(Version::from_code);
        let capabilities: Vec<_> = self
            .key
            .capabilities
            .iter()
            .filter_map(capability_of)
            .map(Capability::stringify)
            .collect();
        let extensions: Vec<_> = self
            .key
            .extensions
            .iter()
            .filter_map(extension_of)
            .map(Extension::stringify)
            .collect();
        let (capabilities, extensions) = (capabilities.join(", "), extensions.join(", "));
        match version {
            Some(version) => {
                write!(f, "#spv.vce<{}, [{}], [{}]>", version, capabilities, extensions)
            }
            None => {
                let version = self.key.version;
                write!(f, "#spv.vce<{}, [{}], [{}]>", version, capabilities, extensions)
            }
        }
    }
}

attr_view! {
    /// A (version, capabilities, extensions) triple describing what a SPIR-V
    /// module requires or a target supports.
    VerCapExtAttr<'ctx> => VerCapExtStorage<'ctx>, VerCapExt
}

impl<'ctx> VerCapExtAttr<'ctx> {
    /// Get or create the triple from enumeration values. Capabilities and
    /// extensions keep the order they are given in.
    ///
    /// Example:
    /// ```rust
    /// # use spvattr::{Context, spirv::{Capability, Extension, VerCapExtAttr, Version}};
    /// let ctx = Context::new();
    /// let vce = VerCapExtAttr::get(
    ///     &ctx,
    ///     Version::V1_3,
    ///     &[Capability::Shader, Capability::Matrix],
    ///     &[Extension::SPV_KHR_multiview],
    /// )
    /// .unwrap();
    /// assert_eq!(vce.version(), Version::V1_3);
    /// assert!(vce.capabilities().eq([Capability::Shader, Capability::Matrix]));
    /// assert!(vce.extensions().eq([Extension::SPV_KHR_multiview]));
    /// ```
    pub fn get(
        ctx: &'ctx Context<'ctx>,
        version: Version,
        capabilities: &[Capability],
        extensions: &[Extension],
    ) -> AttrResult<Self> {
        let version = IntegerAttr::get_i32(ctx, version.code() as i32);
        let capabilities: SmallVec<[Attribute<'ctx>; 8]> = capabilities
            .iter()
            .map(|cap| IntegerAttr::get_i32(ctx, cap.code() as i32).into())
            .collect();
        let extensions: SmallVec<[Attribute<'ctx>; 8]> = extensions
            .iter()
            .map(|ext| StringAttr::get(ctx, ext.stringify()).into())
            .collect();

        Self::get_from_attrs(
            ctx,
            &Location::unknown(),
            version,
            ArrayAttr::get(ctx, capabilities),
            ArrayAttr::get(ctx, extensions),
        )
    }

    /// Get or create the triple from already interned sub-attributes.
    ///
    /// `capabilities` must hold integer capability codes and `extensions`
    /// string extension names.
    pub fn get_from_attrs(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        version: IntegerAttr<'ctx>,
        capabilities: ArrayAttr<'ctx>,
        extensions: ArrayAttr<'ctx>,
    ) -> AttrResult<Self> {
        let key = VerCapExtKey {
            version,
            capabilities,
            extensions,
        };
        ctx.get_or_create::<VerCapExtStorage<'ctx>>(location, key)
            .map(Self)
    }

    pub fn version(self) -> Version {
        self.0
            .key
            .version
            .code()
            .and_then(Version::from_code)
            .expect("version is verified at construction")
    }

    /// Capabilities, in the order they were given at construction.
    pub fn capabilities(
        self,
    ) -> impl Iterator<Item = Capability> + ExactSizeIterator + Clone + 'ctx {
        self.0
            .key
            .capabilities
            .iter()
            .map(|attr| capability_of(attr).expect("capabilities are verified at construction"))
    }

    /// Extensions, in the order they were given at construction.
    pub fn extensions(self) -> impl Iterator<Item = Extension> + ExactSizeIterator + Clone + 'ctx {
        self.0
            .key
            .extensions
            .iter()
            .map(|attr| extension_of(attr).expect("extensions are verified at construction"))
    }

    pub fn version_attr(self) -> IntegerAttr<'ctx> {
        self.0.key.version
    }

    pub fn capabilities_attr(self) -> ArrayAttr<'ctx> {
        self.0.key.capabilities
    }

    pub fn extensions_attr(self) -> ArrayAttr<'ctx> {
        self.0.key.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{IntegerType, Signedness};

    #[test]
    fn test_unknown_version() {
        let ctx = Context::new();
        let empty = ArrayAttr::get(&ctx, []);
        let version = IntegerAttr::get_i32(&ctx, 42);
        let err = VerCapExtAttr::get_from_attrs(&ctx, &Location::unknown(), version, empty, empty)
            .unwrap_err();
        assert_eq!(err.reason.to_string(), "unknown version (got `42`)");
    }

    #[test]
    fn test_version_must_be_signless_i32() {
        let ctx = Context::new();
        let empty = ArrayAttr::get(&ctx, []);
        let si32 = IntegerType::new(32, Signedness::Signed).unwrap();

        for ty in [IntegerType::I64, si32] {
            let version = IntegerAttr::get(&ctx, ty, 0).unwrap();
            let err =
                VerCapExtAttr::get_from_attrs(&ctx, &Location::unknown(), version, empty, empty)
                    .unwrap_err();
            assert_eq!(
                err.reason,
                VerifyError::MalformedKey {
                    field: "version",
                    expected: "32-bit integer".to_string(),
                }
            );
            assert_eq!(err.reason.to_string(), "expected 32-bit integer for version");
        }
        assert_eq!(ctx.num_records(AttrKind::VerCapExt), 0);

        let version = IntegerAttr::get_i32(&ctx, 0);
        let vce = VerCapExtAttr::get_from_attrs(&ctx, &Location::unknown(), version, empty, empty)
            .unwrap();
        assert_eq!(vce.version(), Version::V1_0);
        assert_eq!(ctx.num_records(AttrKind::VerCapExt), 1);
    }

    #[test]
    fn test_capability_list_must_hold_integers() {
        let ctx = Context::new();
        let version = IntegerAttr::get_i32(&ctx, 0);
        let shader = Attribute::from(StringAttr::get(&ctx, "Shader"));
        let capabilities = ArrayAttr::get(&ctx, [shader]);
        let empty = ArrayAttr::get(&ctx, []);
        let err =
            VerCapExtAttr::get_from_attrs(&ctx, &Location::unknown(), version, capabilities, empty)
                .unwrap_err();
        assert_eq!(
            err.reason,
            VerifyError::UnknownEnumValue {
                symbol: "capability in capability list",
                value: "\"Shader\"".to_string(),
            }
        );
    }

    #[test]
    fn test_display() {
        let ctx = Context::new();
        let vce = VerCapExtAttr::get(
            &ctx,
            Version::V1_0,
            &[Capability::Shader],
            &[Extension::SPV_KHR_storage_buffer_storage_class],
        )
        .unwrap();
        assert_eq!(
            vce.to_string(),
            "#spv.vce<v1.0, [Shader], [SPV_KHR_storage_buffer_storage_class]>"
        );
    }
}
