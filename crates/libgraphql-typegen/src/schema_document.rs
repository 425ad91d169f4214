use crate::ast;
use crate::file_reader;
use crate::NamedType;
use crate::NamedTypeKind;
use crate::TypegenError;
use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, TypegenError>;

const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// The parsed SDL of one or more schema files, merged into a single
/// definition list.
#[derive(Clone, Debug, Default)]
pub struct SchemaDocument {
    definitions: Vec<ast::schema::Definition>,
}
impl SchemaDocument {
    pub fn definitions(&self) -> &[ast::schema::Definition] {
        self.definitions.as_slice()
    }

    pub fn from_str(file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        let mut doc = Self::new();
        doc.load_content(file_path, content)?;
        Ok(doc)
    }

    pub fn load_content(
        &mut self,
        file_path: Option<PathBuf>,
        content: &str,
    ) -> Result<&mut Self> {
        let doc =
            graphql_parser::schema::parse_schema::<String>(content)
                .map_err(|err| TypegenError::SchemaParse {
                    file: file_path,
                    err,
                })?
                .into_static();
        self.definitions.extend(doc.definitions);
        Ok(self)
    }

    pub fn load_files<P: AsRef<Path>>(&mut self, file_paths: &[P]) -> Result<&mut Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let content = file_reader::read_content(file_path)
                .map_err(|err| TypegenError::SchemaRead(Box::new(err)))?;
            self.load_content(Some(file_path.to_path_buf()), content.as_str())?;
        }
        Ok(self)
    }

    /// Every named type defined in the document, with extensions merged into
    /// the definitions they extend. Built-in scalars are omitted.
    ///
    /// Types only ever introduced by an extension are still reported, using
    /// the kind of the extension.
    pub fn named_types(&self) -> Vec<NamedType> {
        let mut types = BTreeMap::<&str, NamedTypeKind>::new();
        for def in &self.definitions {
            use ast::schema::Definition;
            let (name, kind) = match def {
                Definition::TypeDefinition(type_def) => type_def_name_and_kind(type_def),
                Definition::TypeExtension(type_ext) => type_ext_name_and_kind(type_ext),
                Definition::DirectiveDefinition(_)
                | Definition::SchemaDefinition(_) => continue,
            };
            if BUILTIN_SCALAR_NAMES.contains(&name) {
                continue;
            }
            let is_definition = matches!(def, Definition::TypeDefinition(_));
            if is_definition || !types.contains_key(name) {
                types.insert(name, kind);
            }
        }

        types.into_iter()
            .map(|(name, kind)| NamedType::new(name, kind))
            .collect()
    }

    pub fn new() -> Self {
        Self { definitions: vec![] }
    }

    /// Renders the merged document as SDL.
    pub fn to_document(&self) -> ast::schema::Document {
        ast::schema::Document {
            definitions: self.definitions.to_owned(),
        }
    }
}

fn type_def_name_and_kind(type_def: &ast::schema::TypeDefinition) -> (&str, NamedTypeKind) {
    use ast::schema::TypeDefinition;
    match type_def {
        TypeDefinition::Enum(t) => (t.name.as_str(), NamedTypeKind::Enum),
        TypeDefinition::InputObject(t) => (t.name.as_str(), NamedTypeKind::InputObject),
        TypeDefinition::Interface(t) => (t.name.as_str(), NamedTypeKind::Interface),
        TypeDefinition::Object(t) => (t.name.as_str(), NamedTypeKind::Object),
        TypeDefinition::Scalar(t) => (t.name.as_str(), NamedTypeKind::Scalar),
        TypeDefinition::Union(t) => (t.name.as_str(), NamedTypeKind::Union),
    }
}

fn type_ext_name_and_kind(type_ext: &ast::schema::TypeExtension) -> (&str, NamedTypeKind) {
    use ast::schema::TypeExtension;
    match type_ext {
        TypeExtension::Enum(t) => (t.name.as_str(), NamedTypeKind::Enum),
        TypeExtension::InputObject(t) => (t.name.as_str(), NamedTypeKind::InputObject),
        TypeExtension::Interface(t) => (t.name.as_str(), NamedTypeKind::Interface),
        TypeExtension::Object(t) => (t.name.as_str(), NamedTypeKind::Object),
        TypeExtension::Scalar(t) => (t.name.as_str(), NamedTypeKind::Scalar),
        TypeExtension::Union(t) => (t.name.as_str(), NamedTypeKind::Union),
    }
}
