//! Attributes module
//!
//! An attribute is an immutable, interned metadata value. Every attribute is
//! accessed through a typed view, a copyable handle over the record stored in
//! the owning [`Context`](crate::context::Context). Two views of the same kind
//! compare equal if and only if they refer to the same record, which in turn
//! holds if and only if they were requested with structurally equal keys.
//!
//! [`Attribute`] erases the kind of a view. It is what composite attributes
//! store for their constituents and what checked downcasts start from.
use std::fmt;

use strum::{EnumDiscriminants, EnumIs, EnumIter, EnumTryAs};

use crate::{
    magic::{
        KIND_NAME_ARRAY, KIND_NAME_DICTIONARY, KIND_NAME_INTEGER, KIND_NAME_INTERFACE_VAR_ABI,
        KIND_NAME_STRING, KIND_NAME_TARGET_ENV, KIND_NAME_VCE,
    },
    spirv::{InterfaceVarAbiAttr, TargetEnvAttr, VerCapExtAttr},
};

pub mod builtin;

pub use builtin::{
    ArrayAttr, DictionaryAttr, IntegerAttr, IntegerType, NamedAttribute, Signedness, StringAttr,
};

/// Declares a typed view over an interned record.
///
/// Views are `Copy`, compare and hash by record identity, and convert into an
/// [`Attribute`].
macro_rules! attr_view {
    ($(#[$meta:meta])* $view:ident<$lt:lifetime> => $storage:ty, $variant:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $view<$lt>(pub(crate) &$lt $storage);

        impl<$lt> PartialEq for $view<$lt> {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self.0, other.0)
            }
        }

        impl<$lt> Eq for $view<$lt> {}

        impl<$lt> std::hash::Hash for $view<$lt> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::ptr::hash(self.0, state)
            }
        }

        impl<$lt> std::fmt::Debug for $view<$lt> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($view)).field(self.0).finish()
            }
        }

        impl<$lt> std::fmt::Display for $view<$lt> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(self.0, f)
            }
        }

        impl<$lt> From<$view<$lt>> for $crate::attributes::Attribute<$lt> {
            fn from(value: $view<$lt>) -> Self {
                $crate::attributes::Attribute::$variant(value)
            }
        }

        impl<$lt> $view<$lt> {
            /// Stable name of this attribute kind.
            pub fn kind_name() -> &'static str {
                $crate::attributes::AttrKind::$variant.name()
            }
        }
    };
}

pub(crate) use attr_view;

/// A type-erased handle to any interned attribute.
///
/// Example:
/// ```rust
/// # use spvattr::{Context, attributes::{Attribute, AttrKind, IntegerAttr, StringAttr}};
/// let ctx = Context::new();
/// let attr: Attribute = StringAttr::get(&ctx, "SPV_KHR_multiview").into();
/// assert_eq!(attr.kind(), AttrKind::String);
/// assert!(attr.try_as_integer().is_none());
/// assert_eq!(attr.try_as_string().map(|s| s.value()), Some("SPV_KHR_multiview"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, EnumTryAs, EnumDiscriminants)]
#[strum_discriminants(name(AttrKind), derive(Hash, PartialOrd, Ord, EnumIter))]
pub enum Attribute<'ctx> {
    /// A fixed-width integer value.
    Integer(IntegerAttr<'ctx>),

    /// A string value.
    String(StringAttr<'ctx>),

    /// An ordered list of attributes.
    Array(ArrayAttr<'ctx>),

    /// A list of named attributes, sorted by name.
    Dictionary(DictionaryAttr<'ctx>),

    /// `#spv.interface_var_abi`
    InterfaceVarAbi(InterfaceVarAbiAttr<'ctx>),

    /// `#spv.vce`
    VerCapExt(VerCapExtAttr<'ctx>),

    /// `#spv.target_env`
    TargetEnv(TargetEnvAttr<'ctx>),
}

impl<'ctx> Attribute<'ctx> {
    /// Type tag of the referenced record.
    pub fn kind(self) -> AttrKind {
        self.into()
    }
}

impl fmt::Display for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Integer(attr) => fmt::Display::fmt(attr, f),
            Attribute::String(attr) => fmt::Display::fmt(attr, f),
            Attribute::Array(attr) => fmt::Display::fmt(attr, f),
            Attribute::Dictionary(attr) => fmt::Display::fmt(attr, f),
            Attribute::InterfaceVarAbi(attr) => fmt::Display::fmt(attr, f),
            Attribute::VerCapExt(attr) => fmt::Display::fmt(attr, f),
            Attribute::TargetEnv(attr) => fmt::Display::fmt(attr, f),
        }
    }
}

impl AttrKind {
    /// Stable textual name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            AttrKind::Integer => KIND_NAME_INTEGER,
            AttrKind::String => KIND_NAME_STRING,
            AttrKind::Array => KIND_NAME_ARRAY,
            AttrKind::Dictionary => KIND_NAME_DICTIONARY,
            AttrKind::InterfaceVarAbi => KIND_NAME_INTERFACE_VAR_ABI,
            AttrKind::VerCapExt => KIND_NAME_VCE,
            AttrKind::TargetEnv => KIND_NAME_TARGET_ENV,
        }
    }
}

impl fmt::Display for AttrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
