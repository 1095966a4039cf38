//! Interning tables
//!
//! This module contains the hash-consing engine shared by every attribute kind.
//! A kind plugs into the engine by implementing [`AttributeStorage`], which
//! names its transient key type, the equality between a stored record and a
//! key, the construction verifier and the constructor. [`StorageTable`] then
//! guarantees that, within one [`Context`], at most one record exists for each
//! distinct key, and that a record is only ever published after its key passed
//! verification.
//!
//! Records are allocated in a per-kind `typed_arena` owned by the table, so
//! they never move and are only released, all at once, when the owning
//! [`Context`] is dropped.
use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
    hash::{DefaultHasher, Hash, Hasher},
};

use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use typed_arena::Arena;

use crate::{attributes::AttrKind, config::ContextConfig, context::Context, error::VerifyError};

/// Capability set describing one interned attribute kind.
///
/// Implementors are the physical, immutable records behind an attribute view.
/// The key is only materialized for the duration of a lookup; a record is
/// built from it (through [`AttributeStorage::construct`]) only when the key
/// is absent from the table and [`AttributeStorage::verify`] accepted it.
///
/// `Key`'s `Hash` implementation must agree with [`AttributeStorage::matches`]:
/// two keys matching the same record must hash identically.
pub trait AttributeStorage<'ctx>: Debug + Display + Send + Sync + Sized + 'ctx {
    /// Structural key fully determining the identity of a record.
    type Key: Hash + Debug;

    /// Rejection reason. Kinds that accept every key use [`std::convert::Infallible`].
    type Error: Into<VerifyError>;

    /// Type tag of the kind.
    const KIND: AttrKind;

    /// Checks the construction invariants of `key`. Invoked at most once per
    /// published record, before it becomes visible to any other caller.
    fn verify(key: &Self::Key) -> Result<(), Self::Error>;

    /// Structural equality between this record and a lookup key.
    fn matches(&self, key: &Self::Key) -> bool;

    /// Builds the record for an accepted key.
    fn construct(key: Self::Key) -> Self;

    /// Selects the table holding the records of this kind.
    fn table(ctx: &'ctx Context<'ctx>) -> &'ctx StorageTable<'ctx, Self>;
}

/// Hash-consing table for one attribute kind.
///
/// # A note on concurrency
/// Lookups first probe the table under a shared read lock. On a miss, the
/// caller takes the upgradable read lock, which is exclusive with respect to
/// every other would-be writer of this table, probes again, verifies the key
/// and publishes the record before releasing it. As a result,
///  1) Concurrent requests for equal keys all observe the same record, or all
///     observe the same rejection.
///  2) Verification of a given key runs at most once per published record,
///     since racing requests for that key are serialized behind the
///     upgradable lock and find the record on their second probe.
///  3) Readers of already published records are never blocked by
///     verification, only by the short write section that inserts a record.
///
/// # About hash collisions
/// Records are indexed by the 64-bit hash of their key, with a short list of
/// candidates per hash. Distinct keys sharing a hash are stored side by side
/// and told apart with [`AttributeStorage::matches`]; collisions only cost
/// an extra comparison and are logged at info level.
pub struct StorageTable<'ctx, S: AttributeStorage<'ctx>> {
    records: RwLock<BTreeMap<u64, Vec<&'ctx S>>>,
    arena: Mutex<Arena<S>>,
}

impl<'ctx, S: AttributeStorage<'ctx>> StorageTable<'ctx, S> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Default::default(),
            arena: Mutex::new(Arena::with_capacity(capacity)),
        }
    }

    fn hash_key(key: &S::Key) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn probe(records: &BTreeMap<u64, Vec<&'ctx S>>, h: u64, key: &S::Key) -> Option<&'ctx S> {
        records
            .get(&h)?
            .iter()
            .copied()
            .find(|record| record.matches(key))
    }

    fn alloc(&'ctx self, record: S) -> &'ctx S {
        let arena = self.arena.lock();
        let record: *const S = arena.alloc(record);

        // SAFETY: `typed_arena` never moves nor frees an allocation before the
        // arena itself is dropped. The arena is owned by `self`, which is
        // borrowed for `'ctx`, so the record outlives every reference handed
        // out here even though the mutex guard is released.
        unsafe { &*record }
    }

    /// Number of records published in this table.
    pub fn len(&self) -> usize {
        self.records.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Returns the record matching `key`, constructing and publishing it if
    /// it does not exist yet.
    ///
    /// A rejected key leaves the table untouched.
    pub fn get_or_create(
        &'ctx self,
        key: S::Key,
        config: &ContextConfig,
    ) -> Result<&'ctx S, S::Error> {
        let h = Self::hash_key(&key);

        // Fast path, the record already exists
        if let Some(record) = Self::probe(&self.records.read(), h, &key) {
            return Ok(record);
        }

        // Slow path. Only one caller at a time may hold the upgradable lock, so
        // the probe, the verification and the insertion below form one
        // atomic step with respect to other requests.
        let mut records = self.records.upgradable_read();
        if let Some(record) = Self::probe(&records, h, &key) {
            return Ok(record);
        }

        if let Err(reason) = S::verify(&key) {
            debug!(
                "[{}] Rejected {} attribute with key {:?}.",
                config.name,
                S::KIND,
                key
            );
            return Err(reason);
        }

        let record = self.alloc(S::construct(key));
        records.with_upgraded(|records| {
            if let Some(list) = records.get_mut(&h) {
                info!(
                    "[{}] Detected an hash collision on hash 0x{:016x} between {} attributes. \
                     The following records collided:\n{}",
                    config.name,
                    h,
                    S::KIND,
                    list.iter()
                        .chain(std::iter::once(&record))
                        .map(|record| format!(" - {}", record))
                        .collect::<Vec<_>>()
                        .join("\n"),
                );
                list.push(record);
            } else {
                if config.trace_interning {
                    debug!(
                        "[{}] New {} attribute encountered {}.",
                        config.name,
                        S::KIND,
                        record
                    );
                }
                records.insert(h, vec![record]);
            }
        });

        Ok(record)
    }
}
