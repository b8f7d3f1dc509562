//! Routing properties over synthetic registries

use std::sync::Arc;
use steerkit_capabilities::{CapabilityTable, EnvironmentSnapshot};
use steerkit_registry::ModuleRegistry;
use steerkit_router::{
    ContentSource, FsContentSource, Loader, Matcher, MatcherConfig, ModuleLoadError, Query, Router,
    RouterConfig, Session, SessionStore, GUIDANCE_UNAVAILABLE_NOTICE,
};
use steerkit_types::{Category, ContentRef, KnowledgeModule, RegistryError, Violation};

fn inline(id: &str, category: Category, priority: i32, keywords: &[&str]) -> KnowledgeModule {
    KnowledgeModule::new(id, category, keywords, ContentRef::Inline(format!("# {id}")))
        .with_priority(priority)
}

fn registry() -> ModuleRegistry {
    ModuleRegistry::new(
        vec![
            inline("general-guidance", Category::General, 100, &["ui"]),
            inline("forms", Category::Forms, 30, &["form", "form validation"]),
            inline("accessibility", Category::Accessibility, 10, &["accessible", "screen reader"]),
            inline("components", Category::Components, 20, &["component library", "table"]),
            inline("layout", Category::Layout, 30, &["dashboard", "table"]),
            inline("testing", Category::Testing, 40, &["form", "test"]),
        ],
        "general-guidance",
    )
    .unwrap()
}

const QUERIES: &[&str] = &[
    "",
    "xyzzyunmatchable",
    "accessible form validation for a dashboard table",
    "Which component library has a good TABLE?",
    "test the form",
    "screen reader, form, table, dashboard, ui, test",
];

#[test]
fn test_determinism() {
    let registry = registry();
    let matcher = Matcher::default();
    for text in QUERIES {
        let query = Query::new(*text);
        let first = matcher.match_query(&query, &registry);
        for _ in 0..5 {
            assert_eq!(matcher.match_query(&query, &registry), first);
        }
    }
}

#[test]
fn test_bound_respected() {
    let registry = registry();
    for k in 1..=4 {
        let matcher = Matcher::new(MatcherConfig {
            max_modules: k,
            min_score: 1,
        });
        for text in QUERIES {
            let results = matcher.match_query(&Query::new(*text), &registry);
            assert!(!results.is_empty());
            assert!(results.len() <= k, "{text:?} returned {} > {k}", results.len());
        }
    }
}

#[test]
fn test_scores_descend() {
    let registry = registry();
    let matcher = Matcher::new(MatcherConfig {
        max_modules: 10,
        min_score: 1,
    });
    for text in QUERIES {
        let results = matcher.match_query(&Query::new(*text), &registry);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_longer_phrases_outrank_generic_words() {
    let registry = registry();
    let results = Matcher::default().match_query(&Query::new("form validation"), &registry);
    assert_eq!(results[0].module_id, "forms");
    assert_eq!(results[0].score, 3);
    assert_eq!(results[1].module_id, "testing");
}

#[test]
fn test_idempotent_load_through_matcher() {
    let registry = registry();
    let loader = Loader::new(FsContentSource);
    let mut session = Session::new();
    let matches = Matcher::default().match_query(&Query::new("accessible"), &registry);

    let first = loader.load(&matches, &mut session, &registry);
    assert_eq!(first.documents.len(), 1);
    assert_eq!(first.documents[0].content, "# accessibility");

    let second = loader.load(&matches, &mut session, &registry);
    assert!(second.documents.is_empty());
    assert_eq!(
        session
            .loaded_module_ids()
            .iter()
            .filter(|id| *id == "accessibility")
            .count(),
        1
    );
}

#[test]
fn test_injected_violations_are_reported() {
    let mut modules = registry().modules().to_vec();
    modules.push(inline("forms", Category::Forms, 1, &["input"]));
    modules.push(inline("empty", Category::Layout, 1, &[]));

    let err: RegistryError = ModuleRegistry::new(modules, "general-guidance").unwrap_err();
    assert!(err
        .violations
        .contains(&Violation::DuplicateModuleId { id: "forms".into() }));
    assert!(err.violations.contains(&Violation::EmptyKeywords {
        module_id: "empty".into()
    }));
}

struct Flaky;

impl ContentSource for Flaky {
    fn resolve(&self, module: &KnowledgeModule) -> Result<String, ModuleLoadError> {
        if module.category == Category::Forms {
            Err(ModuleLoadError::new(&module.id, "storage offline"))
        } else {
            FsContentSource.resolve(module)
        }
    }
}

#[test]
fn test_unavailable_module_never_aborts_turn() {
    let router = Router::new(
        Arc::new(registry()),
        Arc::new(CapabilityTable::empty()),
        RouterConfig::default(),
        Flaky,
    );
    let mut store = SessionStore::new();
    let id = store.open();
    let session = store.get_mut(&id).unwrap();

    let report = router.turn(
        session,
        router.parse_query("accessible form"),
        &EnvironmentSnapshot::default(),
    );
    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].module_id, "forms");
    assert_eq!(report.notices, vec![GUIDANCE_UNAVAILABLE_NOTICE.to_string()]);
    assert!(!session.is_loaded("forms"));
    assert_eq!(session.turn_history().len(), 1);
}

#[test]
fn test_sessions_are_independent() {
    let router = Router::new(
        Arc::new(registry()),
        Arc::new(CapabilityTable::empty()),
        RouterConfig::default(),
        FsContentSource,
    );
    let env = EnvironmentSnapshot::default();
    let mut store = SessionStore::new();
    let a = store.open();
    let b = store.open();

    let first = router.turn(store.get_mut(&a).unwrap(), router.parse_query("table"), &env);
    assert_eq!(first.documents.len(), 2);

    let other = router.turn(store.get_mut(&b).unwrap(), router.parse_query("table"), &env);
    assert_eq!(other.documents.len(), 2);

    let repeat = router.turn(store.get_mut(&a).unwrap(), router.parse_query("table"), &env);
    assert!(repeat.documents.is_empty());

    store.close(&a);
    assert!(store.get(&a).is_none());
    assert_eq!(store.get(&b).unwrap().loaded_module_ids().len(), 2);
}

#[test]
fn test_non_string_json_input_falls_back() {
    let router = Router::new(
        Arc::new(registry()),
        Arc::new(CapabilityTable::empty()),
        RouterConfig::default(),
        FsContentSource,
    );
    let mut session = Session::new();
    let input = router.parse_json_query(&serde_json::json!({"prompt": 7}));

    let report = router.turn(&mut session, input, &EnvironmentSnapshot::default());
    assert_eq!(report.rejected.as_deref(), Some("query must be a string, got number"));
    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].module_id, "general-guidance");
    assert_eq!(session.loaded_module_ids(), ["general-guidance"]);
}
