use crate::type_pattern::default_skip_types;
use crate::SourceModule;
use crate::TypePattern;
use crate::TypegenError;
use std::collections::BTreeMap;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, TypegenError>;

/// What to do when a configured [`SourceModule`] cannot be loaded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadFailurePolicy {
    /// Abort the build with [`TypegenError::ModuleLoad`].
    #[default]
    Fail,

    /// Log a warning and treat the module as declaring nothing.
    Skip,
}

/// The single alias-qualified type threaded through every resolver
/// signature as its context parameter (e.g. `ctx.DataContext`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContextTypeReference {
    alias: String,
    type_name: String,
}
impl ContextTypeReference {
    pub fn alias(&self) -> &str {
        self.alias.as_str()
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        match raw.split_once('.') {
            Some((alias, type_name))
                if is_identifier(alias) && !type_name.is_empty() =>
                Ok(Self {
                    alias: alias.to_string(),
                    type_name: type_name.to_string(),
                }),
            _ => Err(TypegenError::InvalidContextType {
                context_type: raw.to_string(),
            }),
        }
    }

    /// The verbatim expression substituted into generated output.
    pub fn type_expression(&self) -> String {
        format!("{}.{}", self.alias, self.type_name)
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }
}

/// Fully validated, immutable configuration for one build.
#[derive(Clone, Debug)]
pub struct ResolverConfig {
    pub(crate) backing_type_map: BTreeMap<String, String>,
    pub(crate) context_type: Option<ContextTypeReference>,
    pub(crate) debug: bool,
    pub(crate) headers: Vec<String>,
    pub(crate) on_load_failure: LoadFailurePolicy,
    pub(crate) skip_types: Vec<TypePattern>,
    pub(crate) sources: Vec<SourceModule>,
}
impl ResolverConfig {
    pub fn backing_type_map(&self) -> &BTreeMap<String, String> {
        &self.backing_type_map
    }

    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::new()
    }

    pub fn context_type(&self) -> Option<&ContextTypeReference> {
        self.context_type.as_ref()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn headers(&self) -> &[String] {
        self.headers.as_slice()
    }

    pub fn on_load_failure(&self) -> LoadFailurePolicy {
        self.on_load_failure
    }

    pub fn skip_types(&self) -> &[TypePattern] {
        self.skip_types.as_slice()
    }

    pub fn source(&self, alias: &str) -> Option<&SourceModule> {
        self.sources.iter().find(|source| source.alias() == alias)
    }

    pub fn sources(&self) -> &[SourceModule] {
        self.sources.as_slice()
    }
}

#[derive(Debug)]
pub struct ResolverConfigBuilder {
    backing_type_map: BTreeMap<String, String>,
    context_type: Option<String>,
    debug: bool,
    headers: Vec<String>,
    on_load_failure: LoadFailurePolicy,
    skip_types: Vec<TypePattern>,
    sources: Vec<SourceModule>,
}
impl ResolverConfigBuilder {
    pub fn add_source(mut self, source: SourceModule) -> Self {
        self.sources.push(source);
        self
    }

    pub fn backing_type(
        mut self,
        type_name: impl AsRef<str>,
        type_expression: impl AsRef<str>,
    ) -> Self {
        self.backing_type_map.insert(
            type_name.as_ref().to_string(),
            type_expression.as_ref().to_string(),
        );
        self
    }

    /// Validates the accumulated configuration: aliases must be unique
    /// identifiers and the context type must name a configured alias.
    pub fn build(self) -> Result<ResolverConfig> {
        let mut seen_aliases = HashMap::<&str, &SourceModule>::new();
        for source in &self.sources {
            if !is_identifier(source.alias()) {
                return Err(TypegenError::InvalidSourceAlias {
                    alias: source.alias().to_string(),
                });
            }
            if let Some(first) = seen_aliases.insert(source.alias(), source) {
                return Err(TypegenError::DuplicateSourceAlias {
                    alias: source.alias().to_string(),
                    first_source: first.source().to_path_buf(),
                    second_source: source.source().to_path_buf(),
                });
            }
        }

        let context_type = match self.context_type.as_deref() {
            Some(raw) => {
                let context_type = ContextTypeReference::parse(raw)?;
                if !seen_aliases.contains_key(context_type.alias()) {
                    return Err(TypegenError::UnknownContextTypeAlias {
                        alias: context_type.alias().to_string(),
                    });
                }
                Some(context_type)
            },
            None => None,
        };

        Ok(ResolverConfig {
            backing_type_map: self.backing_type_map,
            context_type,
            debug: self.debug,
            headers: self.headers,
            on_load_failure: self.on_load_failure,
            skip_types: self.skip_types,
            sources: self.sources,
        })
    }

    pub fn context_type(mut self, context_type: impl AsRef<str>) -> Self {
        self.context_type = Some(context_type.as_ref().to_string());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn header(mut self, header: impl AsRef<str>) -> Self {
        self.headers.push(header.as_ref().to_string());
        self
    }

    pub fn new() -> Self {
        Self {
            backing_type_map: BTreeMap::new(),
            context_type: None,
            debug: false,
            headers: vec![],
            on_load_failure: LoadFailurePolicy::default(),
            skip_types: default_skip_types(),
            sources: vec![],
        }
    }

    pub fn on_load_failure(mut self, policy: LoadFailurePolicy) -> Self {
        self.on_load_failure = policy;
        self
    }

    /// Replaces the skip list (including its defaults).
    pub fn skip_types(mut self, skip_types: Vec<TypePattern>) -> Self {
        self.skip_types = skip_types;
        self
    }
}
impl Default for ResolverConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' =>
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$'),
        _ => false,
    }
}
