use crate::type_pattern;
use crate::LoadedModule;
use crate::NamedType;
use crate::ResolvedBacking;
use crate::SourceModule;
use crate::TypePattern;
use crate::TypegenError;
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, TypegenError>;

/// One link of the resolver's priority chain. Returning `Ok(None)` defers to
/// the next strategy; `Ok(Some(_))` ends resolution for the type.
pub trait ResolutionStrategy: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, named_type: &NamedType) -> Result<Option<ResolvedBacking>>;
}

#[derive(Debug)]
pub struct SkipListStrategy {
    skip_types: Vec<TypePattern>,
}
impl SkipListStrategy {
    pub fn new(skip_types: Vec<TypePattern>) -> Self {
        Self { skip_types }
    }
}
impl ResolutionStrategy for SkipListStrategy {
    fn name(&self) -> &'static str {
        "skip-list"
    }

    fn resolve(&self, named_type: &NamedType) -> Result<Option<ResolvedBacking>> {
        if type_pattern::matches_any(&self.skip_types, named_type.name()) {
            return Ok(Some(ResolvedBacking::Unresolved));
        }
        Ok(None)
    }
}

#[derive(Debug)]
pub struct OverrideMapStrategy {
    backing_type_map: BTreeMap<String, String>,
}
impl OverrideMapStrategy {
    pub fn new(backing_type_map: BTreeMap<String, String>) -> Self {
        Self { backing_type_map }
    }
}
impl ResolutionStrategy for OverrideMapStrategy {
    fn name(&self) -> &'static str {
        "backing-type-map"
    }

    fn resolve(&self, named_type: &NamedType) -> Result<Option<ResolvedBacking>> {
        Ok(self.backing_type_map.get(named_type.name()).map(|type_expression| {
            ResolvedBacking::Override {
                type_expression: type_expression.to_owned(),
            }
        }))
    }
}

/// Scans source modules in configured order; the first module declaring a
/// match wins.
#[derive(Debug)]
pub struct ModuleScanStrategy {
    modules: Vec<(SourceModule, LoadedModule)>,
}
impl ModuleScanStrategy {
    pub fn new(modules: Vec<(SourceModule, LoadedModule)>) -> Self {
        Self { modules }
    }
}
impl ResolutionStrategy for ModuleScanStrategy {
    fn name(&self) -> &'static str {
        "source-modules"
    }

    fn resolve(&self, named_type: &NamedType) -> Result<Option<ResolvedBacking>> {
        for (module, loaded) in &self.modules {
            if !module.permits(named_type.name()) {
                log::trace!(
                    "Source module `{}` is not permitted to back `{}` by its \
                    `onlyTypes`.",
                    module.alias(),
                    named_type.name(),
                );
                continue;
            }

            let patterns = module.type_patterns(named_type)
                .map_err(|err| TypegenError::TypeMatch {
                    alias: module.alias().to_string(),
                    type_name: named_type.name().to_string(),
                    err,
                })?;

            if let Some((declaration, matched_name)) = loaded.find_declaration(&patterns) {
                if !declaration.exported {
                    log::warn!(
                        "`{}` backs `{}` but is not exported from source module \
                        `{}`; the generated import will not see it.",
                        declaration.signature(),
                        named_type.name(),
                        module.alias(),
                    );
                }
                return Ok(Some(ResolvedBacking::Module {
                    alias: module.alias().to_string(),
                    type_expression: format!("{}.{matched_name}", module.alias()),
                }));
            }
        }
        Ok(None)
    }
}
