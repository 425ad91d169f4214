use crate::LoadFailurePolicy;
use crate::ResolverConfig;
use crate::SourceModule;
use crate::TemplateTypeMatcher;
use crate::TypePattern;
use crate::TypegenError;
use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, TypegenError>;

/// The user-facing typegen configuration as read from a JSON config file.
///
/// ```json
/// {
///   "sources": [
///     { "source": "db.ts", "alias": "dbt" },
///     { "source": "DataContext.ts", "alias": "ctx" }
///   ],
///   "contextType": "ctx.DataContext",
///   "backingTypeMap": { "UUID": "string" }
/// }
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TypegenConfig {
    pub backing_type_map: BTreeMap<String, String>,
    pub context_type: Option<String>,
    pub debug: bool,
    pub headers: Vec<String>,
    pub on_load_failure: LoadFailurePolicy,
    pub outputs: TypegenOutputs,
    pub skip_types: Option<Vec<String>>,
    pub sources: Vec<SourceModuleConfig>,
}
impl TypegenConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Joins relative `source` and `outputs` paths onto `base_dir` (normally
    /// the config file's directory). Absolute paths are left alone.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        for source_config in &mut self.sources {
            source_config.source = base_dir.join(&source_config.source);
        }
        for output in [&mut self.outputs.schema, &mut self.outputs.typegen] {
            if let Some(path) = output {
                *path = base_dir.join(&*path);
            }
        }
    }

    /// Compiles patterns and validates aliases, producing the immutable
    /// configuration used by a single build.
    pub fn to_resolver_config(&self) -> Result<ResolverConfig> {
        let mut builder = ResolverConfig::builder()
            .debug(self.debug)
            .on_load_failure(self.on_load_failure);

        for header in &self.headers {
            builder = builder.header(header);
        }

        if let Some(skip_types) = &self.skip_types {
            builder = builder.skip_types(parse_patterns(skip_types)?);
        }

        for (type_name, type_expression) in &self.backing_type_map {
            builder = builder.backing_type(type_name, type_expression);
        }

        for source_config in &self.sources {
            builder = builder.add_source(source_config.to_source_module()?);
        }

        if let Some(context_type) = &self.context_type {
            builder = builder.context_type(context_type);
        }

        builder.build()
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TypegenOutputs {
    pub schema: Option<PathBuf>,
    pub typegen: Option<PathBuf>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SourceModuleConfig {
    pub alias: String,
    #[serde(default = "default_glob")]
    pub glob: bool,
    #[serde(default)]
    pub import_path: Option<String>,
    #[serde(default)]
    pub only_types: Option<Vec<String>>,
    pub source: PathBuf,
    /// Regex templates in which `{name}` stands for the GraphQL type name.
    #[serde(default)]
    pub type_match: Option<Vec<String>>,
}
impl SourceModuleConfig {
    pub fn to_source_module(&self) -> Result<SourceModule> {
        let mut module = SourceModule::new(&self.source, &self.alias)
            .with_glob(self.glob);

        if let Some(import_path) = &self.import_path {
            module = module.with_import_path(import_path);
        }

        if let Some(only_types) = &self.only_types {
            module = module.with_only_types(parse_patterns(only_types)?);
        }

        if let Some(templates) = &self.type_match {
            module = module.with_type_match(
                TemplateTypeMatcher::new(templates.to_owned()),
            );
        }

        Ok(module)
    }
}

fn default_glob() -> bool {
    true
}

fn parse_patterns(raw_patterns: &[String]) -> Result<Vec<TypePattern>> {
    raw_patterns.iter()
        .map(|raw| TypePattern::parse(raw))
        .collect()
}
