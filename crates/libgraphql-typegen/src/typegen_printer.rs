use crate::BackingTypeMap;
use crate::ResolverConfig;
use crate::SchemaDocument;
use std::path::Path;

const FALLBACK_TYPE: &str = "any";

/// Renders the generated type-definition artifact from resolution results.
#[derive(Clone, Debug)]
pub struct TypegenPrinter<'a> {
    backing_types: &'a BackingTypeMap,
    config: &'a ResolverConfig,
    output_dir: Option<&'a Path>,
}
impl<'a> TypegenPrinter<'a> {
    pub fn new(config: &'a ResolverConfig, backing_types: &'a BackingTypeMap) -> Self {
        Self {
            backing_types,
            config,
            output_dir: None,
        }
    }

    pub fn print(&self) -> String {
        let mut out = String::new();
        for header in self.config.headers() {
            out.push_str(header);
            out.push('\n');
        }

        let imports = self.print_imports();
        if !imports.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&imports);
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("export interface BackingTypes {\n");
        for (type_name, resolved) in self.backing_types.entries() {
            let type_expression = resolved.type_expression().unwrap_or(FALLBACK_TYPE);
            out.push_str(&format!("  {type_name}: {type_expression};\n"));
        }
        out.push_str("}\n\n");

        let context_expression = self.config.context_type()
            .map(|context_type| context_type.type_expression())
            .unwrap_or_else(|| FALLBACK_TYPE.to_string());
        out.push_str(&format!("export type Context = {context_expression};\n"));
        out
    }

    /// One import per source module that backs a type or provides the
    /// context type, in configured order.
    fn print_imports(&self) -> String {
        let mut used_aliases = self.backing_types.used_aliases();
        if let Some(context_type) = self.config.context_type() {
            used_aliases.insert(context_type.alias());
        }

        let mut out = String::new();
        for module in self.config.sources() {
            if !used_aliases.contains(module.alias()) {
                continue;
            }
            let specifier = module.import_specifier(self.output_dir);
            let binding = if module.glob() {
                format!("* as {}", module.alias())
            } else {
                module.alias().to_string()
            };
            out.push_str(&format!("import {binding} from \"{specifier}\";\n"));
        }
        out
    }

    /// Makes import specifiers relative to the directory the printed output
    /// will be written into.
    pub fn with_output_dir(mut self, output_dir: &'a Path) -> Self {
        self.output_dir = Some(output_dir);
        self
    }
}

/// Prints the schema artifact. Substitute an implementation to control how
/// the printed schema document is rendered.
pub trait SchemaPrinter: Send + Sync {
    fn print_schema(&self, schema: &SchemaDocument) -> String;
}

/// Prints SDL using `graphql-parser`'s formatter.
#[derive(Clone, Debug, Default)]
pub struct DefaultSchemaPrinter;
impl SchemaPrinter for DefaultSchemaPrinter {
    fn print_schema(&self, schema: &SchemaDocument) -> String {
        schema.to_document().to_string()
    }
}
