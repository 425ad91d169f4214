use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The outcome of resolving one GraphQL named type to its backing type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResolvedBacking {
    /// Declared by the source module imported under `alias`.
    Module {
        alias: String,
        type_expression: String,
    },

    /// Supplied verbatim by the backing-type override map.
    Override {
        type_expression: String,
    },

    /// No backing type; generated output falls back to a placeholder.
    Unresolved,
}
impl ResolvedBacking {
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Module { alias, .. } => Some(alias.as_str()),
            Self::Override { .. } | Self::Unresolved => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    pub fn type_expression(&self) -> Option<&str> {
        match self {
            Self::Module { type_expression, .. }
            | Self::Override { type_expression } =>
                Some(type_expression.as_str()),
            Self::Unresolved => None,
        }
    }
}

/// Resolution results for every named type in a schema, ordered by type
/// name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BackingTypeMap {
    pub(crate) entries: BTreeMap<String, ResolvedBacking>,
}
impl BackingTypeMap {
    pub fn entries(&self) -> &BTreeMap<String, ResolvedBacking> {
        &self.entries
    }

    pub fn get(&self, type_name: &str) -> Option<&ResolvedBacking> {
        self.entries.get(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Aliases of every source module that backs at least one type.
    pub fn used_aliases(&self) -> BTreeSet<&str> {
        self.entries.values()
            .filter_map(|resolved| resolved.alias())
            .collect()
    }
}
