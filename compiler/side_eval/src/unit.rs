//! Units: isolated namespaces produced by running a source file once.
//!
//! Every load creates a fresh [`Namespace`] under a fresh [`UnitName`]; two
//! loads of the same file share nothing. The only process-wide state is
//! the sequence counter that keeps names unique.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::{EngineConfig, Value};

/// Prefix of every generated unit name.
pub const UNIT_NAME_PREFIX: &str = "sideload";

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Unique name of a loaded unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitName(Arc<str>);

impl UnitName {
    /// Use `name` verbatim.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        UnitName(name.into())
    }

    /// Fresh name for a unit loaded from `origin`:
    /// `sideload_<path hash>_<sequence>`.
    ///
    /// The sequence number comes from a process-wide counter, so two loads
    /// of the same path in the same process never share a name.
    pub fn for_origin(origin: &Path) -> Self {
        let mut hasher = FxHasher::default();
        origin.hash(&mut hasher);
        let seq = NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        UnitName::new(format!(
            "{UNIT_NAME_PREFIX}_{:016x}_{seq}",
            hasher.finish()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Global scope of one unit.
pub(crate) struct Namespace {
    pub(crate) name: UnitName,
    pub(crate) config: EngineConfig,
    bindings: RwLock<FxHashMap<String, Value>>,
}

impl Namespace {
    pub(crate) fn new(name: UnitName, config: EngineConfig) -> Self {
        Namespace {
            name,
            config,
            bindings: RwLock::new(FxHashMap::default()),
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<Value> {
        self.bindings.read().get(name).cloned()
    }

    pub(crate) fn define(&self, name: &str, value: Value) {
        self.bindings.write().insert(name.to_string(), value);
    }

    /// Overwrite an existing binding; returns `false` if there is none.
    pub(crate) fn assign(&self, name: &str, value: Value) -> bool {
        match self.bindings.write().get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    fn len(&self) -> usize {
        self.bindings.read().len()
    }
}

/// Handle to a loaded unit.
///
/// Cloning is cheap and shares the namespace. Functions and types taken out
/// of the unit only reach it weakly, so keep a `Unit` alive for as long as
/// you intend to call them.
#[derive(Clone)]
pub struct Unit {
    ns: Arc<Namespace>,
}

impl Unit {
    pub(crate) fn from_namespace(ns: Arc<Namespace>) -> Self {
        Unit { ns }
    }

    pub fn name(&self) -> &UnitName {
        &self.ns.name
    }

    /// Look up a top-level binding.
    pub fn member(&self, name: &str) -> Option<Value> {
        self.ns.get(name)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.ns.bindings.read().contains_key(name)
    }

    /// Names of all top-level bindings, sorted.
    pub fn member_names(&self) -> Vec<String> {
        self.ns.names()
    }

    pub fn len(&self) -> usize {
        self.ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both handles refer to the same loaded unit.
    pub fn ptr_eq(&self, other: &Unit) -> bool {
        Arc::ptr_eq(&self.ns, &other.ns)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<unit {}>", self.ns.name)
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("name", &self.ns.name)
            .field("members", &self.member_names())
            .finish()
    }
}

#[cfg(test)]
mod tests;
