//! Backing-type inference for GraphQL schemas.
//!
//! Given the named types of a schema and an ordered list of source modules,
//! [`BackingTypeResolver`] determines which module declaration implements
//! the runtime shape of each GraphQL type. [`Typegen`] ties resolution to
//! rendering of a type-definition artifact with one import per module used.

pub mod ast;
mod backing_type_resolver;
mod file_reader;
mod module_loader;
mod named_type;
mod resolution_strategy;
mod resolved_backing;
mod resolver_config;
mod schema_document;
mod source_module;
mod type_matcher;
mod type_pattern;
mod typegen;
mod typegen_config;
mod typegen_error;
mod typegen_printer;

pub use backing_type_resolver::BackingTypeResolver;
pub use file_reader::ReadContentError;
pub use module_loader::FsModuleLoader;
pub use module_loader::InMemoryModuleLoader;
pub use module_loader::ModuleLoader;
pub use named_type::NamedType;
pub use named_type::NamedTypeKind;
pub use resolution_strategy::ModuleScanStrategy;
pub use resolution_strategy::OverrideMapStrategy;
pub use resolution_strategy::ResolutionStrategy;
pub use resolution_strategy::SkipListStrategy;
pub use resolved_backing::BackingTypeMap;
pub use resolved_backing::ResolvedBacking;
pub use resolver_config::ContextTypeReference;
pub use resolver_config::LoadFailurePolicy;
pub use resolver_config::ResolverConfig;
pub use resolver_config::ResolverConfigBuilder;
pub use schema_document::SchemaDocument;
pub use source_module::Declaration;
pub use source_module::DeclarationKeyword;
pub use source_module::LoadedModule;
pub use source_module::SourceModule;
pub use type_matcher::DefaultTypeMatcher;
pub use type_matcher::FnTypeMatcher;
pub use type_matcher::TemplateTypeMatcher;
pub use type_matcher::TypeMatchError;
pub use type_matcher::TypeMatcher;
pub use type_pattern::default_skip_types;
pub use type_pattern::TypePattern;
pub use typegen::Typegen;
pub use typegen::TypegenArtifacts;
pub use typegen_config::SourceModuleConfig;
pub use typegen_config::TypegenConfig;
pub use typegen_config::TypegenOutputs;
pub use typegen_error::TypegenError;
pub use typegen_printer::DefaultSchemaPrinter;
pub use typegen_printer::SchemaPrinter;
pub use typegen_printer::TypegenPrinter;

#[cfg(test)]
mod tests;
