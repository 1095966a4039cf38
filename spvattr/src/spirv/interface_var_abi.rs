use std::fmt;

use crate::{
    attributes::{AttrKind, IntegerAttr, IntegerType, attr_view},
    context::Context,
    error::{AttrResult, VerifyError},
    location::Location,
    spirv::{
        enums::{CodeSymbol, StorageClass},
        expect_i32,
    },
    storage::{AttributeStorage, StorageTable},
};

/// Lookup key of an [`InterfaceVarAbiAttr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceVarAbiKey<'ctx> {
    pub descriptor_set: IntegerAttr<'ctx>,
    pub binding: IntegerAttr<'ctx>,
    pub storage_class: Option<IntegerAttr<'ctx>>,
}

#[derive(Debug)]
pub struct InterfaceVarAbiStorage<'ctx> {
    key: InterfaceVarAbiKey<'ctx>,
}

impl<'ctx> AttributeStorage<'ctx> for InterfaceVarAbiStorage<'ctx> {
    type Key = InterfaceVarAbiKey<'ctx>;
    type Error = VerifyError;
    const KIND: AttrKind = AttrKind::InterfaceVarAbi;

    fn verify(key: &Self::Key) -> Result<(), VerifyError> {
        expect_i32("descriptor set", key.descriptor_set)?;
        expect_i32("binding", key.binding)?;

        if let Some(storage_class) = key.storage_class
            && storage_class.code().and_then(StorageClass::from_code).is_none()
        {
            return Err(VerifyError::UnknownEnumValue {
                symbol: "storage class",
                value: storage_class.zext_value().to_string(),
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
        &ctx.interface_var_abis
    }
}

impl fmt::Display for InterfaceVarAbiStorage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#spv.interface_var_abi<({}, {})",
            self.key.descriptor_set.zext_value(),
            self.key.binding.zext_value()
        )?;
        if let Some(storage_class) = self.key.storage_class {
            match storage_class.code().and_then(StorageClass::from_code) {
                Some(storage_class) => write!(f, ", {}", storage_class)?,
                None => write!(f, ", {}", storage_class)?,
            }
        }
        write!(f, ">")
    }
}

attr_view! {
    /// Binding of a shader interface variable: descriptor set, binding and
    /// optional storage class.
    InterfaceVarAbiAttr<'ctx> => InterfaceVarAbiStorage<'ctx>, InterfaceVarAbi
}

impl<'ctx> InterfaceVarAbiAttr<'ctx> {
    /// Get or create the attribute from raw values.
    ///
    /// Example:
    /// ```rust
    /// # use spvattr::{Context, spirv::{InterfaceVarAbiAttr, StorageClass}};
    /// let ctx = Context::new();
    /// let abi = InterfaceVarAbiAttr::get(&ctx, 2, 1, Some(StorageClass::Uniform)).unwrap();
    /// assert_eq!(abi.descriptor_set(), 2);
    /// assert_eq!(abi.binding(), 1);
    /// assert_eq!(abi.storage_class(), Some(StorageClass::Uniform));
    /// assert_eq!(abi, InterfaceVarAbiAttr::get(&ctx, 2, 1, Some(StorageClass::Uniform)).unwrap());
    /// ```
    pub fn get(
        ctx: &'ctx Context<'ctx>,
        descriptor_set: u32,
        binding: u32,
        storage_class: Option<StorageClass>,
    ) -> AttrResult<Self> {
        Self::get_checked(ctx, &Location::unknown(), descriptor_set, binding, storage_class)
    }

    pub fn get_checked(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        descriptor_set: u32,
        binding: u32,
        storage_class: Option<StorageClass>,
    ) -> AttrResult<Self> {
        let descriptor_set = Self::get_u32(ctx, location, descriptor_set)?;
        let binding = Self::get_u32(ctx, location, binding)?;
        let storage_class = storage_class
            .map(|storage_class| Self::get_u32(ctx, location, storage_class.code()))
            .transpose()?;
        Self::get_from_attrs(ctx, location, descriptor_set, binding, storage_class)
    }

    /// Get or create the attribute from already interned sub-attributes.
    pub fn get_from_attrs(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        descriptor_set: IntegerAttr<'ctx>,
        binding: IntegerAttr<'ctx>,
        storage_class: Option<IntegerAttr<'ctx>>,
    ) -> AttrResult<Self> {
        let key = InterfaceVarAbiKey {
            descriptor_set,
            binding,
            storage_class,
        };
        ctx.get_or_create::<InterfaceVarAbiStorage<'ctx>>(location, key)
            .map(Self)
    }

    fn get_u32(
        ctx: &'ctx Context<'ctx>,
        location: &Location,
        value: u32,
    ) -> AttrResult<IntegerAttr<'ctx>> {
        IntegerAttr::get_checked(ctx, location, IntegerType::I32, value.into())
    }

    pub fn descriptor_set(self) -> u32 {
        self.0.key.descriptor_set.zext_value() as u32
    }

    pub fn binding(self) -> u32 {
        self.0.key.binding.zext_value() as u32
    }

    /// The storage class, or `None` if it was left unspecified.
    pub fn storage_class(self) -> Option<StorageClass> {
        self.0
            .key
            .storage_class
            .and_then(IntegerAttr::code)
            .and_then(StorageClass::from_code)
    }

    pub fn descriptor_set_attr(self) -> IntegerAttr<'ctx> {
        self.0.key.descriptor_set
    }

    pub fn binding_attr(self) -> IntegerAttr<'ctx> {
        self.0.key.binding
    }

    pub fn storage_class_attr(self) -> Option<IntegerAttr<'ctx>> {
        self.0.key.storage_class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Signedness;

    #[test]
    fn test_unspecified_storage_class() {
        let ctx = Context::new();
        let abi = InterfaceVarAbiAttr::get(&ctx, 0, 3, None).unwrap();
        assert_eq!(abi.storage_class(), None);
        assert_eq!(abi.to_string(), "#spv.interface_var_abi<(0, 3)>");
        assert_ne!(abi, InterfaceVarAbiAttr::get(&ctx, 0, 3, Some(StorageClass::Uniform)).unwrap());
    }

    #[test]
    fn test_wide_binding_is_malformed() {
        let ctx = Context::new();
        let set = IntegerAttr::get_i32(&ctx, 0);
        let binding = IntegerAttr::get(&ctx, IntegerType::I64, 1).unwrap();
        let err =
            InterfaceVarAbiAttr::get_from_attrs(&ctx, &Location::unknown(), set, binding, None)
                .unwrap_err();
        assert_eq!(err.reason.to_string(), "expected 32-bit integer for binding");
        assert_eq!(ctx.num_records(AttrKind::InterfaceVarAbi), 0);
    }

    #[test]
    fn test_signed_descriptor_set_is_malformed() {
        let ctx = Context::new();
        let si32 = IntegerType::new(32, Signedness::Signed).unwrap();
        let set = IntegerAttr::get(&ctx, si32, 0).unwrap();
        let binding = IntegerAttr::get_i32(&ctx, 0);
        let err =
            InterfaceVarAbiAttr::get_from_attrs(&ctx, &Location::unknown(), set, binding, None)
                .unwrap_err();
        assert_eq!(err.reason.to_string(), "expected 32-bit integer for descriptor set");
    }

    #[test]
    fn test_display() {
        let ctx = Context::new();
        let abi = InterfaceVarAbiAttr::get(&ctx, 2, 1, Some(StorageClass::StorageBuffer)).unwrap();
        assert_eq!(abi.to_string(), "#spv.interface_var_abi<(2, 1), StorageBuffer>");
    }
}
