//! Structural checks over a set of knowledge modules

use regex::Regex;
use std::collections::{HashMap, HashSet};
use steerkit_types::{Category, KnowledgeModule, Violation};

/// Check module invariants, returning every violation found
///
/// Keyword duplicates are only reported within a category; the same phrase
/// may deliberately trigger modules in different categories.
pub fn validate_modules(modules: &[KnowledgeModule], default_module: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut keyword_owners: HashMap<(Category, &str), &str> = HashMap::new();
    let id_re = Regex::new(r"^[a-z0-9-]+$").ok();

    for module in modules {
        if !seen_ids.insert(module.id.as_str()) {
            violations.push(Violation::DuplicateModuleId {
                id: module.id.clone(),
            });
        }

        if id_re.as_ref().is_some_and(|re| !re.is_match(&module.id)) {
            violations.push(Violation::InvalidModuleId {
                id: module.id.clone(),
            });
        }

        if module.keywords.is_empty() {
            violations.push(Violation::EmptyKeywords {
                module_id: module.id.clone(),
            });
        }

        for keyword in &module.keywords {
            if keyword.trim().is_empty() {
                violations.push(Violation::EmptyKeyword {
                    module_id: module.id.clone(),
                });
                continue;
            }

            match keyword_owners.get(&(module.category, keyword.as_str())) {
                Some(first) if *first != module.id => {
                    violations.push(Violation::DuplicateKeyword {
                        keyword: keyword.clone(),
                        category: module.category,
                        first: (*first).to_string(),
                        second: module.id.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    keyword_owners.insert((module.category, keyword.as_str()), module.id.as_str());
                }
            }
        }
    }

    if !seen_ids.contains(default_module) {
        violations.push(Violation::UnknownDefaultModule {
            id: default_module.to_string(),
        });
    }

    violations
}
