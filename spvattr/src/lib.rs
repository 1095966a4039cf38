//! Uniqued attributes for SPIR-V targets.
//!
//! Attributes are immutable metadata values interned in a [`Context`]: two
//! requests with structurally equal keys yield the very same record, so
//! attributes compare and hash by identity. Every kind checks its key the
//! first time it is requested, and rejected keys never reach the tables.
//!
//! The crate exposes the built-in kinds in [`attributes`] and the SPIR-V
//! composite attributes (`#spv.interface_var_abi`, `#spv.vce`,
//! `#spv.target_env`) in [`spirv`].
//!
//! ```rust
//! # use spvattr::{Context, spirv::*};
//! let ctx = Context::new();
//! let triple = VerCapExtAttr::get(
//!     &ctx,
//!     Version::V1_3,
//!     &[Capability::Shader],
//!     &[Extension::SPV_KHR_multiview],
//! )
//! .unwrap();
//! let limits = ResourceLimitsAttr::default_limits(&ctx);
//! let env = TargetEnvAttr::get(&ctx, triple, limits).unwrap();
//!
//! assert_eq!(env.version(), Version::V1_3);
//! assert_eq!(env.resource_limits(), limits);
//! assert_eq!(env, TargetEnvAttr::get(&ctx, triple, limits).unwrap());
//! ```

pub mod attributes;
pub mod config;
pub mod context;
pub mod error;
pub mod location;
pub mod magic;
pub mod spirv;
pub mod storage;

pub use attributes::{AttrKind, Attribute};
pub use context::Context;
pub use error::{AttrResult, ConstructionError, VerifyError};
pub use location::{Diagnostic, Location};
