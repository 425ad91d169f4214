use crate::output_utils;
use crate::schema_files;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use libgraphql_typegen::FsModuleLoader;
use libgraphql_typegen::SchemaDocument;
use libgraphql_typegen::Typegen;
use libgraphql_typegen::TypegenArtifacts;
use libgraphql_typegen::TypegenConfig;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct TypegenCmd {
    #[arg(
        help="Path to a JSON typegen config file. Source module paths and \
             output paths within it are resolved relative to the config \
             file's directory.",
        long,
        short='c',
    )]
    config: PathBuf,

    #[arg(
        help="Log every backing-type miss, regardless of the config's `debug` \
             setting.",
        long,
    )]
    debug: bool,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "graphqls".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Where to write the printed schema. Overrides `outputs.schema` \
             in the config.",
        long,
    )]
    out_schema: Option<PathBuf>,

    #[arg(
        help="Where to write the generated type definitions. Overrides \
             `outputs.typegen` in the config. When neither is set, the type \
             definitions are printed to stdout.",
        long,
    )]
    out_typegen: Option<PathBuf>,

    #[arg(
        help="Paths to one or more GraphQL files or directories containing \
             GraphQL files that make up the schema.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}
impl TypegenCmd {
    fn generate(&self) -> anyhow::Result<TypegenSummary> {
        let config_json = std::fs::read_to_string(&self.config)
            .with_context(|| format!("Failed to read config file {:#?}", self.config))?;
        let mut config = TypegenConfig::from_json_str(&config_json)
            .with_context(|| format!("Invalid config file {:#?}", self.config))?;
        config.debug |= self.debug;
        let config_parent = self.config.parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let config_dir = std::path::absolute(config_parent)
            .with_context(|| format!("Failed to resolve the directory of {:#?}", self.config))?;
        config.resolve_paths(&config_dir);

        let found = schema_files::collect_schema_files(
            &self.file_or_dir_paths,
            &self.graphql_file_exts,
        );
        if let Some(err) = found.errors.into_iter().next() {
            return Err(err).context("Failed to scan schema paths");
        }
        log::debug!("Found {} GraphQL files.", found.file_paths.len());

        let mut schema = SchemaDocument::new();
        schema.load_files(&found.file_paths)?;

        let typegen_path = match &self.out_typegen {
            Some(path) => Some(std::path::absolute(path)?),
            None => config.outputs.typegen.to_owned(),
        };
        let schema_path = self.out_schema.to_owned()
            .or_else(|| config.outputs.schema.to_owned());

        // Type definitions printed to stdout import relative to the config.
        let output_dir = typegen_path.as_deref()
            .and_then(Path::parent)
            .unwrap_or(config_dir.as_path());
        let mut typegen = Typegen::new(config.to_resolver_config()?)
            .with_loader(FsModuleLoader::new())
            .with_output_dir(output_dir);
        if schema_path.is_some() {
            typegen = typegen.print_schema();
        }
        let artifacts = typegen.run(&schema)?;

        if let Some(path) = &typegen_path {
            write_artifact(path, &artifacts.typegen)?;
        }
        if let (Some(path), Some(printed)) = (&schema_path, &artifacts.schema) {
            write_artifact(path, printed)?;
        }

        Ok(TypegenSummary {
            num_schema_files: found.file_paths.len(),
            num_skipped_files: found.num_skipped_files,
            stdout_typegen: typegen_path.is_none(),
            schema_path,
            typegen_path,
            artifacts,
        })
    }
}

#[inherent::inherent]
impl RunnableCommand for TypegenCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match self.generate() {
            Ok(summary) if summary.stdout_typegen =>
                CommandResult::stdout(format_args!("{}", summary.artifacts.typegen)),

            Ok(summary) => CommandResult::stdout(format_args!("{summary}")),

            Err(e) => CommandResult::stderr(format_args!(
                "{} Typegen failed: {e:#}",
                output_utils::RED_X,
            )),
        }
    }
}

#[derive(Debug)]
struct TypegenSummary {
    artifacts: TypegenArtifacts,
    num_schema_files: usize,
    num_skipped_files: usize,
    schema_path: Option<PathBuf>,
    stdout_typegen: bool,
    typegen_path: Option<PathBuf>,
}
impl std::fmt::Display for TypegenSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.artifacts.backing_types.entries();
        let num_unresolved = entries.values().filter(|r| r.is_unresolved()).count();
        let num_from_modules = entries.values().filter(|r| r.alias().is_some()).count();
        let num_overridden = entries.len() - num_unresolved - num_from_modules;

        writeln!(f, "{} Generated backing types:", output_utils::GREEN_CHECK)?;
        writeln!(f, "  * Analyzed {} schema files.", self.num_schema_files)?;
        writeln!(f, "  * Skipped {} non-graphql files.", self.num_skipped_files)?;
        writeln!(f, "  * Resolved {num_from_modules} types from source modules.")?;
        writeln!(f, "  * Resolved {num_overridden} types from the backing type map.")?;
        write!(f, "  * Left {num_unresolved} types without a backing type.")?;
        if let Some(path) = &self.typegen_path {
            write!(f, "\n  * Wrote type definitions to {path:#?}.")?;
        }
        if let Some(path) = &self.schema_path {
            write!(f, "\n  * Wrote schema to {path:#?}.")?;
        }
        Ok(())
    }
}

fn write_artifact(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {parent:#?}"))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {path:#?}"))?;
    log::info!("Wrote {path:#?}.");
    Ok(())
}
