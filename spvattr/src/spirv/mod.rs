//! SPIR-V attributes
//!
//! Composite attributes describing how a SPIR-V module binds its interface
//! variables and which target environment it is compiled for, together with
//! the closed enumerations they refer to.
//!
//! Composite attributes store their fields as interned sub-attributes
//! (integers, strings, arrays and dictionaries) owned by the same
//! [`Context`](crate::context::Context). Every field is checked against its
//! enumeration when the attribute is first created, so accessors resolving
//! those fields back to enumeration values never fail.
use crate::{attributes::IntegerAttr, error::VerifyError};

pub mod enums;
pub mod interface_var_abi;
pub mod resource_limits;
pub mod target_env;
pub mod vce;

pub use enums::{Capability, CodeSymbol, Extension, NameSymbol, StorageClass, Version};
pub use interface_var_abi::InterfaceVarAbiAttr;
pub use resource_limits::ResourceLimitsAttr;
pub use target_env::TargetEnvAttr;
pub use vce::VerCapExtAttr;

/// Fails unless `attr` is a signless 32-bit integer.
fn expect_i32(field: &'static str, attr: IntegerAttr<'_>) -> Result<(), VerifyError> {
    if attr.ty().is_signless_integer(32) {
        Ok(())
    } else {
        Err(VerifyError::MalformedKey {
            field,
            expected: "32-bit integer".to_string(),
        })
    }
}
