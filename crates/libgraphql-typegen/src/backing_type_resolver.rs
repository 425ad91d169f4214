use crate::BackingTypeMap;
use crate::LoadFailurePolicy;
use crate::LoadedModule;
use crate::ModuleLoader;
use crate::ModuleScanStrategy;
use crate::NamedType;
use crate::OverrideMapStrategy;
use crate::ResolutionStrategy;
use crate::ResolvedBacking;
use crate::ResolverConfig;
use crate::SkipListStrategy;
use crate::TypegenError;
use rayon::prelude::IntoParallelRefIterator;
use rayon::prelude::ParallelIterator;

type Result<T> = std::result::Result<T, TypegenError>;

/// Determines which source-module declaration (if any) backs each GraphQL
/// named type.
///
/// Resolution runs a fixed priority chain per type: the skip list, then the
/// backing-type override map, then a scan of source modules in configured
/// order. The first link to produce a decision wins; if none does the type is
/// [`ResolvedBacking::Unresolved`].
///
/// A resolver holds no mutable state, so resolving a type depends only on the
/// type and the configuration the resolver was built from.
#[derive(Debug)]
pub struct BackingTypeResolver {
    debug: bool,
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}
impl BackingTypeResolver {
    /// Loads every configured source module through `loader` and assembles
    /// the resolution chain.
    pub fn load(
        config: &ResolverConfig,
        loader: &dyn ModuleLoader,
    ) -> Result<Self> {
        let mut modules = Vec::with_capacity(config.sources().len());
        for module in config.sources() {
            let loaded = match loader.load(module) {
                Ok(loaded) => loaded,
                Err(err) => match config.on_load_failure() {
                    LoadFailurePolicy::Fail => {
                        return Err(TypegenError::ModuleLoad {
                            alias: module.alias().to_string(),
                            path: err.file_path().to_path_buf(),
                            err: Box::new(err),
                        });
                    },
                    LoadFailurePolicy::Skip => {
                        log::warn!(
                            "Skipping source module `{}`: {err}",
                            module.alias(),
                        );
                        LoadedModule::default()
                    },
                },
            };
            log::debug!(
                "Source module `{}` declares {} types.",
                module.alias(),
                loaded.declarations().len(),
            );
            modules.push((module.to_owned(), loaded));
        }

        Ok(Self::from_strategies(config.debug(), vec![
            Box::new(SkipListStrategy::new(config.skip_types().to_vec())),
            Box::new(OverrideMapStrategy::new(config.backing_type_map().to_owned())),
            Box::new(ModuleScanStrategy::new(modules)),
        ]))
    }

    pub fn from_strategies(
        debug: bool,
        strategies: Vec<Box<dyn ResolutionStrategy>>,
    ) -> Self {
        Self { debug, strategies }
    }

    pub fn resolve(&self, named_type: &NamedType) -> Result<ResolvedBacking> {
        for strategy in &self.strategies {
            if let Some(resolved) = strategy.resolve(named_type)? {
                log::trace!(
                    "Resolved `{}` via {}: {resolved:?}",
                    named_type.name(),
                    strategy.name(),
                );
                return Ok(resolved);
            }
        }

        if self.debug {
            log::debug!(
                "No backing type found for {} `{}`; falling back to `any`.",
                named_type.kind(),
                named_type.name(),
            );
        } else {
            log::trace!(
                "No backing type found for {} `{}`.",
                named_type.kind(),
                named_type.name(),
            );
        }
        Ok(ResolvedBacking::Unresolved)
    }

    /// Resolves every type independently (in parallel) and collects the
    /// results in type-name order. If any type fails, the error for the
    /// lexicographically-first failing type name is returned.
    pub fn resolve_all(&self, named_types: &[NamedType]) -> Result<BackingTypeMap> {
        let mut results: Vec<(&str, Result<ResolvedBacking>)> =
            named_types.par_iter()
                .map(|named_type| (named_type.name(), self.resolve(named_type)))
                .collect();
        results.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut map = BackingTypeMap::default();
        for (type_name, result) in results {
            map.entries.insert(type_name.to_string(), result?);
        }
        Ok(map)
    }

    pub fn strategies(&self) -> &[Box<dyn ResolutionStrategy>] {
        self.strategies.as_slice()
    }
}
