/// A GraphQL schema type that has a name (object, interface, enum, scalar,
/// union, or input object).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NamedType {
    pub(crate) kind: NamedTypeKind,
    pub(crate) name: String,
}
impl NamedType {
    pub fn kind(&self) -> &NamedTypeKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn new(name: impl AsRef<str>, kind: NamedTypeKind) -> Self {
        Self {
            kind,
            name: name.as_ref().to_string(),
        }
    }
}

/// The category of a [`NamedType`] without any of its field or member
/// metadata.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum NamedTypeKind {
    Enum,
    InputObject,
    Interface,
    Object,
    Scalar,
    Union,
}
impl NamedTypeKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Enum => "Enum",
            Self::InputObject => "InputObject",
            Self::Interface => "Interface",
            Self::Object => "Object",
            Self::Scalar => "Scalar",
            Self::Union => "Union",
        }
    }
}
impl std::fmt::Display for NamedTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
