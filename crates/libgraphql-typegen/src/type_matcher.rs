use crate::NamedType;
use regex::Regex;
use std::sync::Arc;
use thiserror::Error;

/// Produces the patterns used to locate the declaration that backs a given
/// [`NamedType`] within a source module.
///
/// Patterns are tested against declaration signatures of the form
/// `"<keyword> <Name>"` (e.g. `"interface User"`). When a pattern matches, the
/// backing identifier is taken from the capture group named `name` if the
/// pattern has one, then from capture group 1, and otherwise is the matched
/// declaration's name.
pub trait TypeMatcher: std::fmt::Debug + Send + Sync {
    fn patterns(
        &self,
        named_type: &NamedType,
    ) -> Result<Vec<Regex>, TypeMatchError>;
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeMatchError {
    #[error("matcher produced an invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
    },

    #[error("matcher produced no patterns")]
    NoPatterns,

    #[error("{0}")]
    Custom(String),
}

/// Matches `interface|type|class|enum <Name>` delimited by word boundaries.
#[derive(Clone, Debug, Default)]
pub struct DefaultTypeMatcher;
impl TypeMatcher for DefaultTypeMatcher {
    fn patterns(
        &self,
        named_type: &NamedType,
    ) -> Result<Vec<Regex>, TypeMatchError> {
        let source = format!(
            r"\b(?:interface|type|class|enum)\s+({})\b",
            regex::escape(named_type.name()),
        );
        compile(source).map(|regex| vec![regex])
    }
}

/// Builds patterns from string templates where every occurrence of `{name}`
/// is replaced with the regex-escaped GraphQL type name.
#[derive(Clone, Debug)]
pub struct TemplateTypeMatcher {
    templates: Vec<String>,
}
impl TemplateTypeMatcher {
    pub fn new(templates: Vec<String>) -> Self {
        Self { templates }
    }
}
impl TypeMatcher for TemplateTypeMatcher {
    fn patterns(
        &self,
        named_type: &NamedType,
    ) -> Result<Vec<Regex>, TypeMatchError> {
        let escaped_name = regex::escape(named_type.name());
        self.templates.iter()
            .map(|template| compile(template.replace("{name}", &escaped_name)))
            .collect()
    }
}

type MatcherFn =
    dyn Fn(&NamedType) -> Result<Vec<Regex>, TypeMatchError> + Send + Sync;

/// Adapts a closure into a [`TypeMatcher`].
#[derive(Clone)]
pub struct FnTypeMatcher {
    func: Arc<MatcherFn>,
}
impl FnTypeMatcher {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&NamedType) -> Result<Vec<Regex>, TypeMatchError>
            + Send
            + Sync
            + 'static,
    {
        Self { func: Arc::new(func) }
    }
}
impl std::fmt::Debug for FnTypeMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTypeMatcher").finish_non_exhaustive()
    }
}
impl TypeMatcher for FnTypeMatcher {
    fn patterns(
        &self,
        named_type: &NamedType,
    ) -> Result<Vec<Regex>, TypeMatchError> {
        (self.func)(named_type)
    }
}

fn compile(source: String) -> Result<Regex, TypeMatchError> {
    Regex::new(&source).map_err(|err| TypeMatchError::InvalidPattern {
        message: err.to_string(),
        pattern: source,
    })
}
