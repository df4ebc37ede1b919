//! The sideload service and its pluggable loading strategy.

use std::path::Path;

use side_eval::{Engine, EngineConfig};

use crate::{extract, load, locate, LoadedUnit, SideloadError, Sideloaded};

/// Strategy for turning an identifier into a unit and a unit into a result.
///
/// [`DefaultModuleLoader`] locates, loads and extracts from the filesystem;
/// tests and integrations can substitute their own.
pub trait ModuleLoader {
    fn load_module(&self, base_path: &Path, module: &str) -> Result<LoadedUnit, SideloadError>;

    fn get_attribute(
        &self,
        unit: LoadedUnit,
        member: Option<&str>,
    ) -> Result<Sideloaded, SideloadError>;
}

/// Filesystem loader backed by a side script [`Engine`].
#[derive(Clone, Debug, Default)]
pub struct DefaultModuleLoader {
    engine: Engine,
}

impl DefaultModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        DefaultModuleLoader {
            engine: Engine::with_config(config),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl ModuleLoader for DefaultModuleLoader {
    fn load_module(&self, base_path: &Path, module: &str) -> Result<LoadedUnit, SideloadError> {
        let path = locate(base_path, module)?;
        load(&self.engine, &path)
    }

    fn get_attribute(
        &self,
        unit: LoadedUnit,
        member: Option<&str>,
    ) -> Result<Sideloaded, SideloadError> {
        extract(unit, member)
    }
}

/// Stateless sideload service.
///
/// Each [`run`](Sideload::run) is independent: nothing is cached, and
/// concurrent calls for the same module produce unrelated units.
#[derive(Clone, Debug, Default)]
pub struct Sideload<L = DefaultModuleLoader> {
    loader: L,
}

impl Sideload {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: ModuleLoader> Sideload<L> {
    pub fn with_loader(loader: L) -> Self {
        Sideload { loader }
    }

    /// The loading strategy, for integrations that need its pieces.
    pub fn module_loader(&self) -> &L {
        &self.loader
    }

    /// Load `module` under `base_path` and return the unit, or `member`
    /// from it (constructed if it is a type).
    #[tracing::instrument(level = "debug", skip(self, base_path), fields(base_path = %base_path.as_ref().display()))]
    pub fn run(
        &self,
        base_path: impl AsRef<Path>,
        module: &str,
        member: Option<&str>,
    ) -> Result<Sideloaded, SideloadError> {
        let unit = self.loader.load_module(base_path.as_ref(), module)?;
        self.loader.get_attribute(unit, member)
    }
}

/// [`Sideload::run`] with the default loader.
pub fn run(
    base_path: impl AsRef<Path>,
    module: &str,
    member: Option<&str>,
) -> Result<Sideloaded, SideloadError> {
    Sideload::new().run(base_path, module, member)
}
