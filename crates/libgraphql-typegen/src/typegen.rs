use crate::BackingTypeMap;
use crate::BackingTypeResolver;
use crate::DefaultSchemaPrinter;
use crate::FsModuleLoader;
use crate::ModuleLoader;
use crate::ResolverConfig;
use crate::SchemaDocument;
use crate::SchemaPrinter;
use crate::TypegenError;
use crate::TypegenPrinter;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, TypegenError>;

/// The artifacts produced by a single typegen build. Writing them to disk is
/// left to the caller.
#[derive(Clone, Debug)]
pub struct TypegenArtifacts {
    pub backing_types: BackingTypeMap,
    pub schema: Option<String>,
    pub typegen: String,
}

/// Runs one build: extracts named types from a schema, resolves their backing
/// types, and renders the artifacts.
pub struct Typegen {
    config: ResolverConfig,
    loader: Box<dyn ModuleLoader>,
    output_dir: Option<PathBuf>,
    schema_printer: Option<Box<dyn SchemaPrinter>>,
}
impl Typegen {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            loader: Box::new(FsModuleLoader::new()),
            output_dir: None,
            schema_printer: None,
        }
    }

    pub fn print_schema(mut self) -> Self {
        self.schema_printer = Some(Box::new(DefaultSchemaPrinter));
        self
    }

    pub fn run(&self, schema: &SchemaDocument) -> Result<TypegenArtifacts> {
        let resolver = BackingTypeResolver::load(&self.config, self.loader.as_ref())?;
        let named_types = schema.named_types();
        log::debug!("Resolving backing types for {} named types.", named_types.len());
        let backing_types = resolver.resolve_all(&named_types)?;

        let mut printer = TypegenPrinter::new(&self.config, &backing_types);
        if let Some(output_dir) = &self.output_dir {
            printer = printer.with_output_dir(output_dir);
        }
        let typegen = printer.print();
        let schema = self.schema_printer.as_ref()
            .map(|printer| printer.print_schema(schema));

        Ok(TypegenArtifacts {
            backing_types,
            schema,
            typegen,
        })
    }

    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// The directory the type definitions will be written into; import
    /// specifiers are made relative to it.
    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(output_dir.as_ref().to_path_buf());
        self
    }

    pub fn with_schema_printer(mut self, printer: impl SchemaPrinter + 'static) -> Self {
        self.schema_printer = Some(Box::new(printer));
        self
    }
}
impl std::fmt::Debug for Typegen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typegen")
            .field("config", &self.config)
            .field("output_dir", &self.output_dir)
            .field("print_schema", &self.schema_printer.is_some())
            .finish_non_exhaustive()
    }
}
