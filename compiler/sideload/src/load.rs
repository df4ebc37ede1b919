//! Loader: read a located file and run it as a fresh unit.

use std::fmt;
use std::path::{Path, PathBuf};

use side_eval::{Engine, Unit, UnitName};

use crate::{LoadError, SideloadError};

/// A unit together with the file it was loaded from.
#[derive(Clone, Debug)]
pub struct LoadedUnit {
    unit: Unit,
    module_file: PathBuf,
}

impl LoadedUnit {
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn module_file(&self) -> &Path {
        &self.module_file
    }

    pub fn into_unit(self) -> Unit {
        self.unit
    }
}

impl fmt::Display for LoadedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<unit {} from {}>",
            self.unit.name(),
            self.module_file.display()
        )
    }
}

/// Read `path` and execute its top level once in a new namespace.
///
/// Every call produces an unrelated unit, even for the same file.
#[tracing::instrument(level = "debug", skip(engine), fields(path = %path.display()))]
pub fn load(engine: &Engine, path: &Path) -> Result<LoadedUnit, SideloadError> {
    let fail = |source: LoadError| SideloadError::Load {
        path: path.to_path_buf(),
        source,
    };
    let source = std::fs::read_to_string(path).map_err(|e| fail(e.into()))?;
    let unit = engine
        .compile_and_run(&source, UnitName::for_origin(path))
        .map_err(|e| fail(e.into()))?;
    tracing::debug!(unit = %unit.name(), "loaded unit");
    Ok(LoadedUnit {
        unit,
        module_file: path.to_path_buf(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use std::fs;

    use side_eval::{silent_handler, EngineConfig, EvalErrorKind, ScriptError, Value};
    use tempfile::TempDir;

    use super::*;
    use crate::ErrorKind;

    fn engine() -> Engine {
        Engine::with_config(EngineConfig::default().with_print_handler(silent_handler()))
    }

    #[test]
    fn loads_members() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mod.side");
        fs::write(&path, "let VALUE = 7\n").unwrap();
        let loaded = load(&engine(), &path).unwrap();
        assert_eq!(loaded.module_file(), path.as_path());
        assert_eq!(loaded.unit().member("VALUE"), Some(Value::Int(7)));
        assert!(loaded.to_string().starts_with("<unit sideload_"));
    }

    #[test]
    fn same_file_loads_twice_independently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mod.side");
        fs::write(&path, "let VALUE = [1]\n").unwrap();
        let a = load(&engine(), &path).unwrap();
        let b = load(&engine(), &path).unwrap();
        assert!(!a.unit().ptr_eq(b.unit()));
        assert_ne!(a.unit().name(), b.unit().name());
        assert_eq!(a.unit().member("VALUE"), b.unit().member("VALUE"));
    }

    #[test]
    fn runtime_failure_keeps_script_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.side");
        fs::write(&path, "let x = 1 / 0\n").unwrap();
        let err = load(&engine(), &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LoadFailure);
        assert_eq!(
            err.eval_error().map(|e| e.kind.clone()),
            Some(EvalErrorKind::DivisionByZero)
        );
    }

    #[test]
    fn syntax_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.side");
        fs::write(&path, "let = \n").unwrap();
        match load(&engine(), &path).unwrap_err() {
            SideloadError::Load {
                source: LoadError::Script(ScriptError::Syntax(_)),
                ..
            } => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreadable_file() {
        let dir = TempDir::new().unwrap();
        let err = load(&engine(), &dir.path().join("missing.side")).unwrap_err();
        assert!(matches!(
            err,
            SideloadError::Load {
                source: LoadError::Io(_),
                ..
            }
        ));
    }
}
