//! The interning context
//!
//! A [`Context`] owns one [`StorageTable`] per attribute kind together with
//! the arenas backing them. Every attribute handed out by a context borrows
//! it, so the borrow checker guarantees that no attribute outlives the
//! context it was interned in, and that attributes of distinct contexts are
//! never mixed.
use std::convert::Infallible;

use log::{debug, error};
use parking_lot::RwLock;
use strum::IntoEnumIterator;

use crate::{
    attributes::{
        AttrKind,
        builtin::{ArrayStorage, DictionaryStorage, IntegerStorage, StringStorage},
    },
    config::ContextConfig,
    error::{AttrResult, ConstructionError, VerifyError},
    location::{Diagnostic, Location},
    spirv::{
        interface_var_abi::InterfaceVarAbiStorage, target_env::TargetEnvStorage,
        vce::VerCapExtStorage,
    },
    storage::{AttributeStorage, StorageTable},
};

/// Sink receiving the diagnostics of rejected constructions.
pub type DiagnosticHandler = Box<dyn Fn(&Diagnostic) + Send + Sync>;

fn default_diagnostic_handler(diagnostic: &Diagnostic) {
    error!("{}", diagnostic);
}

/// Owner of every interned attribute.
///
/// A context is `Sync`: independent threads may intern attributes into the
/// same context concurrently.
///
/// Example:
/// ```rust
/// # use spvattr::{Context, attributes::IntegerAttr};
/// let ctx = Context::new();
/// let a = IntegerAttr::get_i32(&ctx, 7);
/// let b = IntegerAttr::get_i32(&ctx, 7);
/// assert_eq!(a, b);
/// assert_eq!(ctx.total_records(), 1);
/// ```
pub struct Context<'ctx> {
    config: ContextConfig,
    diagnostic_handler: RwLock<DiagnosticHandler>,

    pub(crate) integers: StorageTable<'ctx, IntegerStorage>,
    pub(crate) strings: StorageTable<'ctx, StringStorage>,
    pub(crate) arrays: StorageTable<'ctx, ArrayStorage<'ctx>>,
    pub(crate) dictionaries: StorageTable<'ctx, DictionaryStorage<'ctx>>,
    pub(crate) interface_var_abis: StorageTable<'ctx, InterfaceVarAbiStorage<'ctx>>,
    pub(crate) ver_cap_exts: StorageTable<'ctx, VerCapExtStorage<'ctx>>,
    pub(crate) target_envs: StorageTable<'ctx, TargetEnvStorage<'ctx>>,
}

impl<'ctx> Context<'ctx> {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        let capacity = config.arena_capacity;
        debug!("[{}] Creating attribute context (arena capacity {}).", config.name, capacity);

        Self {
            config,
            diagnostic_handler: RwLock::new(Box::new(default_diagnostic_handler)),
            integers: StorageTable::with_capacity(capacity),
            strings: StorageTable::with_capacity(capacity),
            arrays: StorageTable::with_capacity(capacity),
            dictionaries: StorageTable::with_capacity(capacity),
            interface_var_abis: StorageTable::with_capacity(capacity),
            ver_cap_exts: StorageTable::with_capacity(capacity),
            target_envs: StorageTable::with_capacity(capacity),
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Replaces the sink receiving the diagnostics of rejected constructions.
    ///
    /// By default, diagnostics are forwarded to [`log::error!`].
    pub fn set_diagnostic_handler<F>(&self, handler: F)
    where
        F: Fn(&Diagnostic) + Send + Sync + 'static,
    {
        *self.diagnostic_handler.write() = Box::new(handler);
    }

    pub fn emit(&self, diagnostic: &Diagnostic) {
        (self.diagnostic_handler.read())(diagnostic)
    }

    /// Reports a rejected construction at `location` and builds the error
    /// returned to the caller.
    pub(crate) fn reject(&self, location: &Location, reason: VerifyError) -> ConstructionError {
        debug!("[{}] {}: {}", self.config.name, location, reason);
        self.emit(&Diagnostic::error(location.clone(), reason.to_string()));
        ConstructionError {
            location: location.clone(),
            reason,
        }
    }

    /// Returns the record of kind `S` matching `key`, creating it if it does
    /// not exist yet. Rejections are reported at `location`.
    pub fn get_or_create<S>(&'ctx self, location: &Location, key: S::Key) -> AttrResult<&'ctx S>
    where
        S: AttributeStorage<'ctx>,
    {
        S::table(self)
            .get_or_create(key, &self.config)
            .map_err(|reason| self.reject(location, reason.into()))
    }

    /// Infallible counterpart of [`Self::get_or_create`], for kinds accepting
    /// every key.
    pub fn intern<S>(&'ctx self, key: S::Key) -> &'ctx S
    where
        S: AttributeStorage<'ctx, Error = Infallible>,
    {
        match S::table(self).get_or_create(key, &self.config) {
            Ok(record) => record,
            Err(never) => match never {},
        }
    }

    /// Number of records of the given kind interned so far.
    pub fn num_records(&self, kind: AttrKind) -> usize {
        match kind {
            AttrKind::Integer => self.integers.len(),
            AttrKind::String => self.strings.len(),
            AttrKind::Array => self.arrays.len(),
            AttrKind::Dictionary => self.dictionaries.len(),
            AttrKind::InterfaceVarAbi => self.interface_var_abis.len(),
            AttrKind::VerCapExt => self.ver_cap_exts.len(),
            AttrKind::TargetEnv => self.target_envs.len(),
        }
    }

    /// Number of records interned so far, across all kinds.
    pub fn total_records(&self) -> usize {
        AttrKind::iter().map(|kind| self.num_records(kind)).sum()
    }
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        attributes::IntegerAttr,
        spirv::{InterfaceVarAbiAttr, StorageClass},
    };

    #[test]
    fn test_rejection_reaches_diagnostic_handler() {
        let ctx = Context::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        ctx.set_diagnostic_handler(move |diag| sink.lock().unwrap().push(diag.clone()));

        let location = Location::file_line_col("shader.mlir", 4, 2);
        let set = IntegerAttr::get_i32(&ctx, 2);
        let binding = IntegerAttr::get_i32(&ctx, 1);
        let bogus = IntegerAttr::get_i32(&ctx, 9999);
        let err = InterfaceVarAbiAttr::get_from_attrs(&ctx, &location, set, binding, Some(bogus))
            .unwrap_err();

        assert_eq!(err.location, location);
        assert_eq!(err.to_string(), "shader.mlir:4:2: unknown storage class (got `9999`)");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].location, location);
        assert_eq!(seen[0].message, "unknown storage class (got `9999`)");
    }

    #[test]
    fn test_accepted_constructions_emit_nothing() {
        let ctx = Context::new();
        let seen = Arc::new(Mutex::new(0usize));
        let sink = seen.clone();
        ctx.set_diagnostic_handler(move |_| *sink.lock().unwrap() += 1);

        InterfaceVarAbiAttr::get(&ctx, 0, 0, Some(StorageClass::StorageBuffer)).unwrap();
        assert_eq!(*seen.lock().unwrap(), 0);
    }

    #[test]
    fn test_record_counts() {
        let ctx = Context::with_config(ContextConfig {
            name: "counts".to_string(),
            arena_capacity: 1,
            trace_interning: true,
        });
        assert_eq!(ctx.name(), "counts");
        assert_eq!(ctx.total_records(), 0);

        InterfaceVarAbiAttr::get(&ctx, 2, 1, Some(StorageClass::StorageBuffer)).unwrap();
        // set, binding and storage class (12) are three distinct integers
        assert_eq!(ctx.num_records(AttrKind::Integer), 3);
        assert_eq!(ctx.num_records(AttrKind::InterfaceVarAbi), 1);
        assert_eq!(ctx.total_records(), 4);

        InterfaceVarAbiAttr::get(&ctx, 1, 2, Some(StorageClass::StorageBuffer)).unwrap();
        assert_eq!(ctx.num_records(AttrKind::Integer), 3);
        assert_eq!(ctx.num_records(AttrKind::InterfaceVarAbi), 2);
    }
}
