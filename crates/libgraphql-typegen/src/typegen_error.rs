use crate::file_reader::ReadContentError;
use crate::type_matcher::TypeMatchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypegenError {
    #[error("Failed to decode typegen config: {0}")]
    ConfigDecode(#[from] serde_json::Error),

    #[error(
        "Two source modules were configured with the same alias \
        (`{alias}`): `{}` and `{}`. Aliases are used as import namespaces in \
        generated output and must be unique.",
        .first_source.display(),
        .second_source.display(),
    )]
    DuplicateSourceAlias {
        alias: String,
        first_source: PathBuf,
        second_source: PathBuf,
    },

    #[error("Source module aliases must be non-empty identifiers, found `{alias}`")]
    InvalidSourceAlias {
        alias: String,
    },

    #[error(
        "`contextType` must be an alias-qualified type reference such as \
        `ctx.DataContext`, found `{context_type}`"
    )]
    InvalidContextType {
        context_type: String,
    },

    #[error("Invalid type pattern `{pattern}`: {err}")]
    InvalidTypePattern {
        pattern: String,
        err: regex::Error,
    },

    #[error(
        "Failed to load source module `{alias}` from `{}`: {err}",
        .path.display(),
    )]
    ModuleLoad {
        alias: String,
        path: PathBuf,
        err: Box<ReadContentError>,
    },

    #[error("Failed to parse GraphQL schema: {err}")]
    SchemaParse {
        file: Option<PathBuf>,
        err: graphql_parser::schema::ParseError,
    },

    #[error("Failed to read GraphQL schema file: {0}")]
    SchemaRead(Box<ReadContentError>),

    #[error(
        "The `typeMatch` of source module `{alias}` failed while matching type \
        `{type_name}`: {err}"
    )]
    TypeMatch {
        alias: String,
        type_name: String,
        err: TypeMatchError,
    },

    #[error(
        "`contextType` refers to alias `{alias}` which is not among the \
        configured source modules"
    )]
    UnknownContextTypeAlias {
        alias: String,
    },
}
