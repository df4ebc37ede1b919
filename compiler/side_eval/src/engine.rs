//! Engine: compile a source file and run it as a fresh unit.

use std::fmt;
use std::sync::Arc;

use side_parse::ParseError;

use crate::errors::EvalError;
use crate::interpreter::Interpreter;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::unit::{Namespace, Unit, UnitName};

/// Default limit on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Runtime knobs for executing units.
#[derive(Clone)]
pub struct EngineConfig {
    /// Nested call depth at which evaluation fails with `StackOverflow`.
    pub max_call_depth: usize,
    /// Destination of `print(...)`.
    pub print_handler: SharedPrintHandler,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            print_handler: stdout_handler(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn with_print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = handler;
        self
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("max_call_depth", &self.max_call_depth)
            .finish_non_exhaustive()
    }
}

/// Failure to turn source text into a unit.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptError {
    /// The source did not lex or parse.
    Syntax(ParseError),
    /// Top-level code raised while running.
    Raised(EvalError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Syntax(e) => write!(f, "syntax error: {e}"),
            ScriptError::Raised(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Syntax(e) => Some(e),
            ScriptError::Raised(e) => Some(e),
        }
    }
}

impl From<ParseError> for ScriptError {
    fn from(e: ParseError) -> Self {
        ScriptError::Syntax(e)
    }
}

impl From<EvalError> for ScriptError {
    fn from(e: EvalError) -> Self {
        ScriptError::Raised(e)
    }
}

/// Compiles and runs units. Holds configuration only; it keeps no record
/// of the units it produced.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Engine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse `source` and run its top level once in a new namespace named
    /// `name`.
    ///
    /// The returned unit is the only reference to that namespace; nothing
    /// from earlier units is visible to it.
    #[tracing::instrument(level = "debug", skip(self, source), fields(unit = %name))]
    pub fn compile_and_run(&self, source: &str, name: UnitName) -> Result<Unit, ScriptError> {
        let module = side_parse::parse(source)?;
        let ns = Arc::new(Namespace::new(name, self.config.clone()));
        Interpreter::new(&self.config).run_module(&ns, &module)?;
        let unit = Unit::from_namespace(ns);
        tracing::debug!(members = unit.len(), "unit executed");
        Ok(unit)
    }
}
