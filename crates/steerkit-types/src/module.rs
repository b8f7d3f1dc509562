use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default priority for modules that do not declare one
pub const DEFAULT_PRIORITY: i32 = 100;

/// Fixed set of knowledge module categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    General,
    Accessibility,
    DesignSystem,
    Components,
    Layout,
    Forms,
    Interaction,
    Performance,
    Testing,
    Tooling,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Accessibility => "accessibility",
            Category::DesignSystem => "design-system",
            Category::Components => "components",
            Category::Layout => "layout",
            Category::Forms => "forms",
            Category::Interaction => "interaction",
            Category::Performance => "performance",
            Category::Testing => "testing",
            Category::Tooling => "tooling",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a module's body lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRef {
    /// Steering file on disk; the body follows the front matter
    File(PathBuf),
    /// Content held in memory
    Inline(String),
}

/// A keyword-triggered unit of guidance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeModule {
    pub id: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: i32,
    /// Normalized trigger phrases, in declaration order
    pub keywords: Vec<String>,
    pub content: ContentRef,
}

impl KnowledgeModule {
    /// Build a module, normalizing and de-duplicating its keywords
    pub fn new(
        id: impl Into<String>,
        category: Category,
        keywords: impl IntoIterator<Item = impl AsRef<str>>,
        content: ContentRef,
    ) -> Self {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = normalize_keyword(keyword.as_ref());
            if !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        Self {
            id: id.into(),
            description: None,
            category,
            priority: DEFAULT_PRIORITY,
            keywords: normalized,
            content,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// One-line listing: "- id [category]: description"
    pub fn to_summary(&self) -> String {
        match &self.description {
            Some(description) => format!("- {} [{}]: {}", self.id, self.category, description),
            None => format!("- {} [{}]", self.id, self.category),
        }
    }
}

/// Lowercase, trim and collapse internal whitespace to single spaces
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome of scoring one module against one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub module_id: String,
    pub score: u32,
    pub matched_keywords: Vec<String>,
}

impl MatchResult {
    /// Result used when nothing matched and the default module is surfaced
    pub fn fallback(module_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            score: 0,
            matched_keywords: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.matched_keywords.is_empty()
    }
}
