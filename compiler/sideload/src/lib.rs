//! Sideload - load side script units that are not part of the host's build.
//!
//! # Architecture
//!
//! ```text
//! (base_path, module) ──► locate ──► path ──► load ──► LoadedUnit
//!                                                        │
//!                                     member (optional) ─┤
//!                                                        ▼
//!                                                     extract ──► Sideloaded
//! ```
//!
//! - [`locate`]: identifier resolution (absolute, `.side` file name, dotted,
//!   plain name with package-entry fallback)
//! - [`load`]: read the file and run it once in a fresh, uniquely named unit
//! - [`extract`]: return the unit or a member, constructing types with no
//!   arguments
//! - [`Sideload`]: the stateless service tying the three together behind a
//!   [`ModuleLoader`] strategy
//! - [`json`]: the JSON request/response contract used by the CLI
//!
//! Nothing is cached between calls.

mod error;
mod extract;
pub mod json;
mod load;
mod locate;
mod runner;

pub use error::{ErrorKind, LoadError, SideloadError};
pub use extract::{extract, Sideloaded};
pub use load::{load, LoadedUnit};
pub use locate::{candidates, locate};
pub use runner::{run, DefaultModuleLoader, ModuleLoader, Sideload};

pub use side_eval::{Engine, EngineConfig, EvalError, EvalErrorKind, ScriptError, Unit, Value};
