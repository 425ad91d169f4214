use crate::TypegenError;
use regex::Regex;

/// A single entry of a skip list or an `onlyTypes` allow-list: either a
/// literal type name or a regular expression tested against type names.
#[derive(Clone, Debug)]
pub enum TypePattern {
    Exact(String),
    Regex(Regex),
}
impl TypePattern {
    pub fn exact(name: impl AsRef<str>) -> Self {
        Self::Exact(name.as_ref().to_string())
    }

    pub fn is_match(&self, type_name: &str) -> bool {
        match self {
            Self::Exact(name) => name == type_name,
            Self::Regex(regex) => regex.is_match(type_name),
        }
    }

    /// Parses a pattern from its config-file representation. Strings wrapped
    /// in slashes (`/^Foo/`) are compiled as regular expressions; anything
    /// else is a literal type name.
    pub fn parse(raw: &str) -> Result<Self, TypegenError> {
        if raw.len() >= 2 && raw.starts_with('/') && raw.ends_with('/') {
            let source = &raw[1..raw.len() - 1];
            let regex = Regex::new(source)
                .map_err(|err| TypegenError::InvalidTypePattern {
                    pattern: raw.to_string(),
                    err,
                })?;
            Ok(Self::Regex(regex))
        } else {
            Ok(Self::Exact(raw.to_string()))
        }
    }
}
impl std::cmp::PartialEq for TypePattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

pub(crate) fn matches_any(patterns: &[TypePattern], type_name: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(type_name))
}

/// The names skipped by default: the root operation types never have a
/// backing type of their own.
pub fn default_skip_types() -> Vec<TypePattern> {
    vec![
        TypePattern::exact("Query"),
        TypePattern::exact("Mutation"),
        TypePattern::exact("Subscription"),
    ]
}
