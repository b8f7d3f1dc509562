//! Keyword phrase matching and scoring

use std::cmp::Ordering;
use steerkit_registry::ModuleRegistry;
use steerkit_types::{KnowledgeModule, MatchResult};
use tracing::debug;

use crate::query::Query;

/// Default cap on modules selected per turn
pub const DEFAULT_MAX_MODULES: usize = 3;

/// Matcher tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Hard cap on modules returned per turn, applied after sorting
    pub max_modules: usize,
    /// Minimum score a module needs to be selected
    pub min_score: u32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_modules: DEFAULT_MAX_MODULES,
            min_score: 1,
        }
    }
}

/// Scores registry modules against queries
///
/// Stateless: the same query and registry always yield the same ordered result.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher; `max_modules` and `min_score` are raised to at least 1
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config: MatcherConfig {
                max_modules: config.max_modules.max(1),
                min_score: config.min_score.max(1),
            },
        }
    }

    /// Effective configuration
    pub fn config(&self) -> MatcherConfig {
        self.config
    }

    /// Score one module; `None` when no keyword is present
    ///
    /// Each matched keyword contributes its word count, so specific phrases
    /// outweigh single generic words.
    pub fn score(&self, query: &Query, module: &KnowledgeModule) -> Option<MatchResult> {
        let matched_keywords: Vec<String> = module
            .keywords
            .iter()
            .filter(|keyword| contains_phrase(query.normalized(), keyword))
            .cloned()
            .collect();

        if matched_keywords.is_empty() {
            return None;
        }

        let score = matched_keywords
            .iter()
            .map(|keyword| u32::try_from(keyword.split(' ').count()).unwrap_or(u32::MAX))
            .fold(0u32, u32::saturating_add);

        Some(MatchResult {
            module_id: module.id.clone(),
            score,
            matched_keywords,
        })
    }

    /// Select modules for a query
    ///
    /// Ordered by score descending, then priority ascending, then registration
    /// order; capped at `max_modules`. Never empty: when nothing clears the
    /// threshold the registry's default module is returned alone.
    pub fn match_query(&self, query: &Query, registry: &ModuleRegistry) -> Vec<MatchResult> {
        let mut scored: Vec<(usize, i32, MatchResult)> = registry
            .modules()
            .iter()
            .enumerate()
            .filter_map(|(position, module)| {
                self.score(query, module)
                    .filter(|result| result.score >= self.config.min_score)
                    .map(|result| (position, module.priority, result))
            })
            .collect();

        scored.sort_by(|a, b| rank(a, b));
        scored.truncate(self.config.max_modules);

        if scored.is_empty() {
            debug!(
                "No module matched '{}', falling back to '{}'",
                query.normalized(),
                registry.default_module()
            );
            return vec![MatchResult::fallback(registry.default_module())];
        }

        for (_, _, result) in &scored {
            debug!(
                "Matched module '{}' (score {}, keywords {:?})",
                result.module_id, result.score, result.matched_keywords
            );
        }

        scored.into_iter().map(|(_, _, result)| result).collect()
    }
}

fn rank(a: &(usize, i32, MatchResult), b: &(usize, i32, MatchResult)) -> Ordering {
    b.2.score
        .cmp(&a.2.score)
        .then(a.1.cmp(&b.1))
        .then(a.0.cmp(&b.0))
}

/// True if `phrase` occurs in `text` with word boundaries on both sides
///
/// Overlapping occurrences are all tried, so an unbounded first hit does not
/// hide a bounded one that starts inside it.
fn contains_phrase(text: &str, phrase: &str) -> bool {
    let Some(first) = phrase.chars().next() else {
        return false;
    };

    let mut from = 0;
    while let Some(offset) = text[from..].find(phrase) {
        let start = from + offset;
        let end = start + phrase.len();
        let bounded_before = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let bounded_after = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if bounded_before && bounded_after {
            return true;
        }
        from = start + first.len_utf8();
    }
    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use steerkit_types::{Category, ContentRef};

    fn module(id: &str, category: Category, priority: i32, keywords: &[&str]) -> KnowledgeModule {
        KnowledgeModule::new(id, category, keywords, ContentRef::Inline(String::new()))
            .with_priority(priority)
    }

    fn registry() -> ModuleRegistry {
        ModuleRegistry::new(
            vec![
                module("general-guidance", Category::General, 100, &["ui", "ux"]),
                module("forms", Category::Forms, 20, &["form", "validation"]),
                module(
                    "accessibility",
                    Category::Accessibility,
                    10,
                    &["accessible", "screen reader", "screen readers"],
                ),
                module("form-testing", Category::Testing, 30, &["form"]),
                module("layout", Category::Layout, 30, &["form"]),
            ],
            "general-guidance",
        )
        .unwrap()
    }

    #[test]
    fn test_contains_phrase_boundaries() {
        assert!(contains_phrase("make a form accessible", "form"));
        assert!(!contains_phrase("transform the data", "form"));
        assert!(!contains_phrase("formatting rules", "form"));
        assert!(contains_phrase("form-level errors", "form"));
        assert!(contains_phrase("for screen readers", "screen readers"));
        assert!(!contains_phrase("for screen readers", "screen reader"));
        assert!(contains_phrase("informal form", "form"));
        assert!(!contains_phrase("screen  reader", "screen reader"));
        assert!(!contains_phrase("anything", ""));
    }

    #[test]
    fn test_contains_phrase_overlapping_occurrence() {
        assert!(contains_phrase("xab ab ab", "ab ab"));
        assert!(contains_phrase("xform form", "form"));
        assert!(contains_phrase("xüber über über", "über über"));
        assert!(!contains_phrase("xab ab abx", "ab ab"));
    }

    #[test]
    fn test_phrase_weight() {
        let matcher = Matcher::default();
        let result = matcher
            .score(
                &Query::new("Accessible form for screen readers"),
                &registry().modules()[2],
            )
            .unwrap();
        assert_eq!(result.matched_keywords, vec!["accessible", "screen readers"]);
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_ordering_and_tie_break() {
        let matcher = Matcher::new(MatcherConfig {
            max_modules: 10,
            min_score: 1,
        });
        let results = matcher.match_query(
            &Query::new("Help me make this form accessible for screen readers"),
            &registry(),
        );
        let ids: Vec<_> = results.iter().map(|r| r.module_id.as_str()).collect();
        // accessibility scores 3; the three "form" modules tie at 1 and are
        // ordered by priority, then registration order.
        assert_eq!(ids, vec!["accessibility", "forms", "form-testing", "layout"]);
    }

    #[test]
    fn test_bound_applied_after_sorting() {
        let matcher = Matcher::new(MatcherConfig {
            max_modules: 2,
            min_score: 1,
        });
        let results = matcher.match_query(&Query::new("accessible form"), &registry());
        let ids: Vec<_> = results.iter().map(|r| r.module_id.as_str()).collect();
        assert_eq!(ids, vec!["accessibility", "forms"]);
    }

    #[test]
    fn test_min_score_threshold() {
        let matcher = Matcher::new(MatcherConfig {
            max_modules: 3,
            min_score: 2,
        });
        let results = matcher.match_query(&Query::new("a form"), &registry());
        assert_eq!(results, vec![MatchResult::fallback("general-guidance")]);
    }

    #[test]
    fn test_fallback_on_empty_and_unmatched() {
        let matcher = Matcher::default();
        for text in ["", "xyzzyunmatchable"] {
            let results = matcher.match_query(&Query::new(text), &registry());
            assert_eq!(results, vec![MatchResult::fallback("general-guidance")]);
        }
    }

    #[test]
    fn test_zero_config_is_clamped() {
        let matcher = Matcher::new(MatcherConfig {
            max_modules: 0,
            min_score: 0,
        });
        assert_eq!(
            matcher.config(),
            MatcherConfig {
                max_modules: 1,
                min_score: 1
            }
        );
    }
}
