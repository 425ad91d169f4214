use super::test_utils::object;
use super::test_utils::resolver_for;
use super::test_utils::example_loader;
use crate::BackingTypeResolver;
use crate::Declaration;
use crate::DeclarationKeyword;
use crate::FnTypeMatcher;
use crate::InMemoryModuleLoader;
use crate::LoadFailurePolicy;
use crate::LoadedModule;
use crate::ModuleScanStrategy;
use crate::NamedType;
use crate::NamedTypeKind;
use crate::ResolvedBacking;
use crate::ResolverConfig;
use crate::SourceModule;
use crate::TypeMatchError;
use crate::TypePattern;
use crate::TypegenError;
use regex::Regex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

type Result<T> = std::result::Result<T, TypegenError>;

fn example_config() -> Result<ResolverConfig> {
    ResolverConfig::builder()
        .add_source(SourceModule::new("db.ts", "dbt"))
        .add_source(SourceModule::new("DataContext.ts", "ctx"))
        .context_type("ctx.DataContext")
        .build()
}

fn counting_matcher(calls: Arc<AtomicUsize>) -> FnTypeMatcher {
    FnTypeMatcher::new(move |named_type| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Regex::new(&format!(r"\b{}\b", named_type.name())).unwrap()])
    })
}

#[test]
fn resolves_interface_declared_in_first_module() -> Result<()> {
    let config = example_config()?;
    let resolver = resolver_for(&config);

    assert_eq!(resolver.resolve(&object("User"))?, ResolvedBacking::Module {
        alias: "dbt".to_string(),
        type_expression: "dbt.User".to_string(),
    });

    Ok(())
}

#[test]
fn resolves_type_alias_enum_and_class_declarations() -> Result<()> {
    let config = example_config()?;
    let resolver = resolver_for(&config);

    let post = resolver.resolve(&object("Post"))?;
    assert_eq!(post.type_expression(), Some("dbt.Post"));

    let role = resolver.resolve(&NamedType::new("Role", NamedTypeKind::Enum))?;
    assert_eq!(role.type_expression(), Some("dbt.Role"));

    let ctx = resolver.resolve(&object("DataContext"))?;
    assert_eq!(ctx.type_expression(), Some("ctx.DataContext"));

    Ok(())
}

#[test]
fn unmatched_type_is_unresolved() -> Result<()> {
    let config = example_config()?;
    let resolver = resolver_for(&config);

    assert_eq!(resolver.resolve(&object("Comment"))?, ResolvedBacking::Unresolved);

    Ok(())
}

#[test]
fn name_prefix_does_not_match() -> Result<()> {
    let config = example_config()?;
    let resolver = resolver_for(&config);

    // `Use` is a prefix of the declared `User` but must not match it.
    assert!(resolver.resolve(&object("Use"))?.is_unresolved());

    Ok(())
}

#[test]
fn chain_runs_skip_list_then_backing_type_map_then_modules() -> Result<()> {
    let config = example_config()?;
    let resolver = resolver_for(&config);

    let names: Vec<&str> = resolver.strategies().iter()
        .map(|strategy| strategy.name())
        .collect();
    assert_eq!(names, vec!["skip-list", "backing-type-map", "source-modules"]);

    Ok(())
}

#[test]
fn custom_chain_over_known_declarations() -> Result<()> {
    let loaded = LoadedModule::from_declarations(vec![
        Declaration {
            exported: true,
            keyword: DeclarationKeyword::Class,
            name: "Invoice".to_string(),
        },
    ]);
    let resolver = BackingTypeResolver::from_strategies(false, vec![
        Box::new(ModuleScanStrategy::new(vec![
            (SourceModule::new("billing.ts", "billing"), loaded),
        ])),
    ]);

    assert_eq!(resolver.strategies().len(), 1);
    assert_eq!(
        resolver.resolve(&object("Invoice"))?.type_expression(),
        Some("billing.Invoice"),
    );
    // Without a skip-list link, root operation types go through the scan.
    assert!(resolver.resolve(&object("Query"))?.is_unresolved());

    Ok(())
}

#[test]
fn unexported_declaration_still_backs_type() -> Result<()> {
    let mut loader = InMemoryModuleLoader::new();
    loader.insert("internal.ts", "interface Hidden {}\nexport interface Shown {}\n");
    let config = ResolverConfig::builder()
        .add_source(SourceModule::new("internal.ts", "internal"))
        .build()?;
    let resolver = BackingTypeResolver::load(&config, &loader)?;

    assert_eq!(
        resolver.resolve(&object("Hidden"))?.type_expression(),
        Some("internal.Hidden"),
    );
    assert_eq!(
        resolver.resolve(&object("Shown"))?.type_expression(),
        Some("internal.Shown"),
    );

    let module = LoadedModule::from_content("interface Hidden {}");
    let patterns = SourceModule::new("internal.ts", "internal")
        .type_patterns(&object("Hidden"))
        .unwrap();
    let (declaration, _) = module.find_declaration(&patterns).unwrap();
    assert!(!declaration.exported);

    Ok(())
}

mod skip_list {
    use super::*;

    #[test]
    fn default_skip_list_skips_root_operation_types() -> Result<()> {
        let mut loader = example_loader();
        loader.insert("roots.ts", "export interface Query {}\nexport interface Mutation {}");
        let config = ResolverConfig::builder()
            .add_source(SourceModule::new("roots.ts", "roots"))
            .build()?;
        let resolver = BackingTypeResolver::load(&config, &loader)?;

        for name in ["Query", "Mutation", "Subscription"] {
            assert_eq!(resolver.resolve(&object(name))?, ResolvedBacking::Unresolved);
        }

        Ok(())
    }

    #[test]
    fn skip_wins_over_backing_type_map_and_modules() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(SourceModule::new("db.ts", "dbt"))
            .skip_types(vec![TypePattern::exact("User")])
            .backing_type("User", "string")
            .build()?;
        let resolver = resolver_for(&config);

        assert_eq!(resolver.resolve(&object("User"))?, ResolvedBacking::Unresolved);

        Ok(())
    }

    #[test]
    fn regex_skip_patterns() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(SourceModule::new("db.ts", "dbt"))
            .skip_types(vec![TypePattern::parse("/^P/")?])
            .build()?;
        let resolver = resolver_for(&config);

        assert!(resolver.resolve(&object("Post"))?.is_unresolved());
        assert!(!resolver.resolve(&object("User"))?.is_unresolved());

        Ok(())
    }
}

mod backing_type_map {
    use super::*;

    #[test]
    fn override_takes_precedence_over_module_declaration() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(SourceModule::new("db.ts", "dbt"))
            .backing_type("UUID", "string")
            .build()?;
        let resolver = resolver_for(&config);

        assert_eq!(
            resolver.resolve(&NamedType::new("UUID", NamedTypeKind::Scalar))?,
            ResolvedBacking::Override {
                type_expression: "string".to_string(),
            },
        );

        Ok(())
    }

    #[test]
    fn override_never_consults_modules() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = ResolverConfig::builder()
            .add_source(
                SourceModule::new("db.ts", "dbt")
                    .with_type_match(counting_matcher(calls.clone())),
            )
            .backing_type("User", "MyUser")
            .build()?;
        let resolver = resolver_for(&config);

        let resolved = resolver.resolve(&object("User"))?;
        assert_eq!(resolved.type_expression(), Some("MyUser"));
        assert_eq!(resolved.alias(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        resolver.resolve(&object("Post"))?;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        Ok(())
    }
}

mod module_order {
    use super::*;

    #[test]
    fn first_configured_module_wins() -> Result<()> {
        let mut loader = InMemoryModuleLoader::new();
        loader
            .insert("a.ts", "export interface Foo { a: number }")
            .insert("b.ts", "export class Foo {}");

        let config = ResolverConfig::builder()
            .add_source(SourceModule::new("a.ts", "a"))
            .add_source(SourceModule::new("b.ts", "b"))
            .build()?;
        let resolver = BackingTypeResolver::load(&config, &loader)?;
        for _ in 0..10 {
            assert_eq!(resolver.resolve(&object("Foo"))?.alias(), Some("a"));
        }

        let reversed = ResolverConfig::builder()
            .add_source(SourceModule::new("b.ts", "b"))
            .add_source(SourceModule::new("a.ts", "a"))
            .build()?;
        let resolver = BackingTypeResolver::load(&reversed, &loader)?;
        assert_eq!(resolver.resolve(&object("Foo"))?.alias(), Some("b"));

        Ok(())
    }

    #[test]
    fn first_declaration_within_a_module_wins() -> Result<()> {
        let mut loader = InMemoryModuleLoader::new();
        loader.insert("dup.ts", concat!(
            "export type FooRecord = { id: string }\n",
            "export interface FooModel { id: string }\n",
        ));
        let config = ResolverConfig::builder()
            .add_source(
                SourceModule::new("dup.ts", "dup")
                    .with_type_match(FnTypeMatcher::new(|named_type| {
                        Ok(vec![Regex::new(&format!(
                            r"\b(?:type|interface)\s+(?P<name>{}\w+)",
                            named_type.name(),
                        )).unwrap()])
                    })),
            )
            .build()?;
        let resolver = BackingTypeResolver::load(&config, &loader)?;

        assert_eq!(
            resolver.resolve(&object("Foo"))?.type_expression(),
            Some("dup.FooRecord"),
        );

        Ok(())
    }
}

mod only_types {
    use super::*;

    #[test]
    fn only_types_restricts_module() -> Result<()> {
        let mut loader = InMemoryModuleLoader::new();
        loader.insert("m.ts", "export interface Bar {}\nexport interface Baz {}");
        let config = ResolverConfig::builder()
            .add_source(
                SourceModule::new("m.ts", "m")
                    .with_only_types(vec![TypePattern::exact("Bar")]),
            )
            .build()?;
        let resolver = BackingTypeResolver::load(&config, &loader)?;

        assert_eq!(resolver.resolve(&object("Bar"))?.type_expression(), Some("m.Bar"));
        assert!(resolver.resolve(&object("Baz"))?.is_unresolved());

        Ok(())
    }

    #[test]
    fn restricted_module_falls_through_to_next_module() -> Result<()> {
        let mut loader = InMemoryModuleLoader::new();
        loader
            .insert("m.ts", "export interface Bar {}\nexport interface Baz {}")
            .insert("n.ts", "export interface Baz {}");
        let config = ResolverConfig::builder()
            .add_source(
                SourceModule::new("m.ts", "m")
                    .with_only_types(vec![TypePattern::exact("Bar")]),
            )
            .add_source(SourceModule::new("n.ts", "n"))
            .build()?;
        let resolver = BackingTypeResolver::load(&config, &loader)?;

        assert_eq!(resolver.resolve(&object("Baz"))?.type_expression(), Some("n.Baz"));

        Ok(())
    }
}

mod failures {
    use super::*;

    #[test]
    fn failing_type_match_names_module() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(
                SourceModule::new("db.ts", "dbt")
                    .with_type_match(FnTypeMatcher::new(|_| {
                        Err(TypeMatchError::Custom("boom".to_string()))
                    })),
            )
            .build()?;
        let resolver = resolver_for(&config);

        let err = resolver.resolve(&object("User")).unwrap_err();
        assert!(matches!(
            err,
            TypegenError::TypeMatch { ref alias, ref type_name, .. }
                if alias == "dbt" && type_name == "User",
        ));

        Ok(())
    }

    #[test]
    fn type_match_with_no_patterns_is_an_error() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(
                SourceModule::new("db.ts", "dbt")
                    .with_type_match(FnTypeMatcher::new(|_| Ok(vec![]))),
            )
            .build()?;
        let resolver = resolver_for(&config);

        assert!(matches!(
            resolver.resolve(&object("User")),
            Err(TypegenError::TypeMatch { err: TypeMatchError::NoPatterns, .. }),
        ));

        Ok(())
    }

    #[test]
    fn missing_module_fails_load_by_default() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(SourceModule::new("missing.ts", "missing"))
            .build()?;

        let err = BackingTypeResolver::load(&config, &example_loader()).unwrap_err();
        assert!(matches!(
            err,
            TypegenError::ModuleLoad { ref alias, ref path, .. }
                if alias == "missing" && path.to_str() == Some("missing.ts"),
        ));

        Ok(())
    }

    #[test]
    fn missing_module_contributes_nothing_when_skipped() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(SourceModule::new("missing.ts", "missing"))
            .add_source(SourceModule::new("db.ts", "dbt"))
            .on_load_failure(LoadFailurePolicy::Skip)
            .build()?;
        let resolver = resolver_for(&config);

        assert_eq!(resolver.resolve(&object("User"))?.alias(), Some("dbt"));

        Ok(())
    }
}

mod resolve_all {
    use super::*;

    fn schema_types() -> Vec<NamedType> {
        vec![
            object("Query"),
            object("User"),
            object("Post"),
            NamedType::new("UUID", NamedTypeKind::Scalar),
            NamedType::new("Role", NamedTypeKind::Enum),
            object("Comment"),
        ]
    }

    #[test]
    fn maps_every_type_in_name_order() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(SourceModule::new("db.ts", "dbt"))
            .backing_type("UUID", "string")
            .build()?;
        let resolver = resolver_for(&config);

        let map = resolver.resolve_all(&schema_types())?;
        let names: Vec<&str> = map.entries().keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["Comment", "Post", "Query", "Role", "UUID", "User"]);
        assert!(map.get("Query").unwrap().is_unresolved());
        assert!(map.get("Comment").unwrap().is_unresolved());
        assert_eq!(map.get("UUID").unwrap().type_expression(), Some("string"));
        assert_eq!(map.get("User").unwrap().type_expression(), Some("dbt.User"));
        assert_eq!(map.used_aliases().into_iter().collect::<Vec<_>>(), vec!["dbt"]);

        Ok(())
    }

    #[test]
    fn repeated_runs_are_identical() -> Result<()> {
        let config = example_config()?;

        let first = resolver_for(&config).resolve_all(&schema_types())?;
        for _ in 0..5 {
            let mut types = schema_types();
            types.reverse();
            assert_eq!(resolver_for(&config).resolve_all(&types)?, first);
        }

        Ok(())
    }

    #[test]
    fn debug_flag_does_not_change_results() -> Result<()> {
        let quiet = example_config()?;
        let verbose = ResolverConfig::builder()
            .add_source(SourceModule::new("db.ts", "dbt"))
            .add_source(SourceModule::new("DataContext.ts", "ctx"))
            .context_type("ctx.DataContext")
            .debug(true)
            .build()?;
        assert!(!quiet.debug());
        assert!(verbose.debug());

        let quiet_map = resolver_for(&quiet).resolve_all(&schema_types())?;
        let verbose_map = resolver_for(&verbose).resolve_all(&schema_types())?;
        assert_eq!(quiet_map, verbose_map);
        assert!(verbose_map.get("Comment").unwrap().is_unresolved());

        Ok(())
    }

    #[test]
    fn reports_first_failing_type_by_name() -> Result<()> {
        let config = ResolverConfig::builder()
            .add_source(
                SourceModule::new("db.ts", "dbt")
                    .with_type_match(FnTypeMatcher::new(|_| {
                        Err(TypeMatchError::Custom("boom".to_string()))
                    })),
            )
            .build()?;
        let resolver = resolver_for(&config);

        let err = resolver.resolve_all(&schema_types()).unwrap_err();
        assert!(matches!(
            err,
            TypegenError::TypeMatch { ref type_name, .. } if type_name == "Comment",
        ));

        Ok(())
    }
}
