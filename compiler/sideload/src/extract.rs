//! Extractor: pick the requested member out of a loaded unit.
//!
//! Types are constructed with no arguments; every other value is handed
//! back as-is.

use std::fmt;
use std::path::Path;

use side_eval::Value;

use crate::{LoadedUnit, SideloadError};

/// Result of a sideload call.
///
/// Member and instance results keep their unit alive, so functions taken
/// from it can still reach the unit's globals. The value is only handed out
/// together with its unit, see [`Sideloaded::into_parts`].
#[derive(Clone, Debug)]
pub enum Sideloaded {
    /// No member requested: the unit itself.
    Unit(LoadedUnit),
    /// A plain member, shared with the unit.
    Member {
        unit: LoadedUnit,
        name: String,
        value: Value,
    },
    /// A type member, constructed with no arguments.
    Instance {
        unit: LoadedUnit,
        name: String,
        value: Value,
    },
}

impl Sideloaded {
    pub fn loaded_unit(&self) -> &LoadedUnit {
        match self {
            Sideloaded::Unit(unit)
            | Sideloaded::Member { unit, .. }
            | Sideloaded::Instance { unit, .. } => unit,
        }
    }

    pub fn module_file(&self) -> &Path {
        self.loaded_unit().module_file()
    }

    /// The extracted value; `None` for unit results.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Sideloaded::Unit(_) => None,
            Sideloaded::Member { value, .. } | Sideloaded::Instance { value, .. } => Some(value),
        }
    }

    /// Split into the extracted value (`None` for unit results) and the unit
    /// that owns it.
    ///
    /// Functions, types and instances reach their unit's globals only while
    /// the unit is alive; hold the `LoadedUnit` for as long as the value is
    /// used, or calls fail with `UnitUnloaded`.
    pub fn into_parts(self) -> (Option<Value>, LoadedUnit) {
        match self {
            Sideloaded::Unit(unit) => (None, unit),
            Sideloaded::Member { unit, value, .. } | Sideloaded::Instance { unit, value, .. } => {
                (Some(value), unit)
            }
        }
    }

    /// `"module"` for unit results, `"attribute"` otherwise.
    pub fn object_kind(&self) -> &'static str {
        match self {
            Sideloaded::Unit(_) => "module",
            Sideloaded::Member { .. } | Sideloaded::Instance { .. } => "attribute",
        }
    }

    /// Type name of the result: `module`, or the value's type name.
    pub fn type_name(&self) -> String {
        match self.value() {
            None => "module".to_string(),
            Some(value) => value.type_name(),
        }
    }
}

impl fmt::Display for Sideloaded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sideloaded::Unit(unit) => write!(f, "{unit}"),
            Sideloaded::Member { value, .. } | Sideloaded::Instance { value, .. } => {
                write!(f, "{}", value.repr())
            }
        }
    }
}

/// Return the unit, or the member named `member` with types constructed.
#[tracing::instrument(level = "debug", skip(loaded), fields(unit = %loaded.unit().name()))]
pub fn extract(loaded: LoadedUnit, member: Option<&str>) -> Result<Sideloaded, SideloadError> {
    let Some(name) = member else {
        return Ok(Sideloaded::Unit(loaded));
    };
    let Some(value) = loaded.unit().member(name) else {
        return Err(SideloadError::AttributeNotFound {
            member: name.to_string(),
            module_file: loaded.module_file().to_path_buf(),
        });
    };
    if let Some(ty) = value.as_type() {
        tracing::trace!(type_name = ty.name(), "constructing member");
        let instance = ty
            .construct()
            .map_err(|source| SideloadError::ConstructionFailure {
                member: name.to_string(),
                module_file: loaded.module_file().to_path_buf(),
                source,
            })?;
        return Ok(Sideloaded::Instance {
            unit: loaded,
            name: name.to_string(),
            value: instance,
        });
    }
    Ok(Sideloaded::Member {
        unit: loaded,
        name: name.to_string(),
        value,
    })
}
