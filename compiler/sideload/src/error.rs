//! Error taxonomy for locating, loading and extracting units.
//!
//! Every failure is returned to the caller unchanged; nothing here is
//! retried or downgraded to a default.

use std::fmt;
use std::path::PathBuf;

use side_eval::{EvalError, ScriptError};

/// Failure of a sideload call.
#[derive(Debug, thiserror::Error)]
pub enum SideloadError {
    /// A required argument was empty.
    #[error("{message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// The base path does not exist.
    #[error("base_path does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    /// No resolution rule produced an existing file.
    #[error("cannot resolve module file for module={module} under base_path={}", base_path.display())]
    UnresolvableModule {
        module: String,
        base_path: PathBuf,
        /// Candidate paths that were checked, in order.
        searched: Vec<PathBuf>,
    },

    /// Reading, parsing or running the located file failed.
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// The unit has no binding with the requested name.
    #[error("unit loaded from {} has no member `{member}`", module_file.display())]
    AttributeNotFound { member: String, module_file: PathBuf },

    /// The member is a type and constructing it raised.
    #[error("constructing `{member}` from {} failed: {source}", module_file.display())]
    ConstructionFailure {
        member: String,
        module_file: PathBuf,
        #[source]
        source: EvalError,
    },
}

impl SideloadError {
    pub(crate) fn empty_argument(field: &'static str) -> Self {
        SideloadError::InvalidArgument {
            field,
            message: format!("{field} must be a non-empty string"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SideloadError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            SideloadError::NotFound { .. } => ErrorKind::NotFound,
            SideloadError::UnresolvableModule { .. } => ErrorKind::UnresolvableModule,
            SideloadError::Load { .. } => ErrorKind::LoadFailure,
            SideloadError::AttributeNotFound { .. } => ErrorKind::AttributeNotFound,
            SideloadError::ConstructionFailure { .. } => ErrorKind::ConstructionFailure,
        }
    }

    /// The script-level error behind a load or construction failure.
    pub fn eval_error(&self) -> Option<&EvalError> {
        match self {
            SideloadError::Load {
                source: LoadError::Script(ScriptError::Raised(e)),
                ..
            }
            | SideloadError::ConstructionFailure { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

/// Why a located file could not be turned into a unit.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Stable category of a [`SideloadError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    UnresolvableModule,
    LoadFailure,
    AttributeNotFound,
    ConstructionFailure,
}

impl ErrorKind {
    /// Snake-case name used in CLI output.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::UnresolvableModule => "unresolvable_module",
            ErrorKind::LoadFailure => "load_failure",
            ErrorKind::AttributeNotFound => "attribute_not_found",
            ErrorKind::ConstructionFailure => "construction_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
