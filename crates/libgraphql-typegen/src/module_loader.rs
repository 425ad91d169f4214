use crate::file_reader;
use crate::file_reader::ReadContentError;
use crate::LoadedModule;
use crate::SourceModule;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

/// Loads the declarations of a [`SourceModule`]. Implementations are called
/// once per module per build.
pub trait ModuleLoader: Send + Sync {
    fn load(
        &self,
        module: &SourceModule,
    ) -> Result<LoadedModule, ReadContentError>;
}

/// Reads module sources from the filesystem, resolving relative paths
/// against an optional root directory.
#[derive(Clone, Debug, Default)]
pub struct FsModuleLoader {
    root_dir: Option<PathBuf>,
}
impl FsModuleLoader {
    pub fn new() -> Self {
        Self { root_dir: None }
    }

    pub fn resolve_path(&self, module: &SourceModule) -> PathBuf {
        match &self.root_dir {
            Some(root_dir) if module.source().is_relative() =>
                root_dir.join(module.source()),
            _ => module.source().to_path_buf(),
        }
    }

    pub fn with_root_dir(root_dir: impl AsRef<Path>) -> Self {
        Self {
            root_dir: Some(root_dir.as_ref().to_path_buf()),
        }
    }
}
impl ModuleLoader for FsModuleLoader {
    fn load(
        &self,
        module: &SourceModule,
    ) -> Result<LoadedModule, ReadContentError> {
        let path = self.resolve_path(module);
        log::trace!(
            "Loading source module `{}` from {path:#?}.",
            module.alias(),
        );
        let content = file_reader::read_content(&path)?;
        Ok(LoadedModule::from_content(content.as_str()))
    }
}

/// Serves module contents from memory, keyed by the module's configured
/// source path. Modules without an entry fail as missing files.
#[derive(Clone, Debug, Default)]
pub struct InMemoryModuleLoader {
    contents: HashMap<PathBuf, String>,
}
impl InMemoryModuleLoader {
    pub fn insert(
        &mut self,
        source: impl AsRef<Path>,
        content: impl AsRef<str>,
    ) -> &mut Self {
        self.contents.insert(
            source.as_ref().to_path_buf(),
            content.as_ref().to_string(),
        );
        self
    }

    pub fn new() -> Self {
        Self::default()
    }
}
impl ModuleLoader for InMemoryModuleLoader {
    fn load(
        &self,
        module: &SourceModule,
    ) -> Result<LoadedModule, ReadContentError> {
        self.contents.get(module.source())
            .map(|content| LoadedModule::from_content(content.as_str()))
            .ok_or_else(|| ReadContentError::PathIsNotAFile(
                module.source().to_path_buf(),
            ))
    }
}
