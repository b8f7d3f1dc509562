//! Steering file definition and parsing
//!
//! Each knowledge module is a markdown file with YAML front matter

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use steerkit_types::module::DEFAULT_PRIORITY;
use steerkit_types::{Category, ContentRef, KnowledgeModule};

const FRONT_MATTER_PATTERN: &str = r"^---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*(?:\r?\n([\s\S]*))?$";

/// Module metadata extracted from YAML front matter
#[derive(Debug, Clone, Deserialize)]
pub struct SteeringFrontMatter {
    /// Module id; the file stem is used when omitted
    #[serde(default)]
    pub id: Option<String>,
    /// One-line summary of what the module covers
    #[serde(default)]
    pub description: Option<String>,
    /// Module category
    pub category: Category,
    /// Tie-break priority, lower first
    #[serde(default)]
    pub priority: Option<i32>,
    /// Trigger phrases
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Parse steering file content into front matter and body
pub fn parse_steering_content(content: &str) -> Result<(SteeringFrontMatter, String)> {
    let (yaml_str, body) = split_front_matter(content)?;

    let front_matter: SteeringFrontMatter =
        serde_yaml::from_str(yaml_str).with_context(|| "Failed to parse YAML front matter")?;

    Ok((front_matter, body.to_string()))
}

/// Return the body of a steering file without its front matter
pub fn strip_front_matter(content: &str) -> Result<String> {
    let (_, body) = split_front_matter(content)?;
    Ok(body.to_string())
}

fn split_front_matter(content: &str) -> Result<(&str, &str)> {
    let front_matter_re = Regex::new(FRONT_MATTER_PATTERN)
        .map_err(|e| anyhow!("Failed to compile regex: {}", e))?;

    let captures = front_matter_re
        .captures(content)
        .ok_or_else(|| anyhow!("No valid YAML front matter found"))?;

    let yaml_str = captures
        .get(1)
        .ok_or_else(|| anyhow!("Failed to extract front matter"))?
        .as_str();

    let body = captures.get(2).map_or("", |m| m.as_str());

    Ok((yaml_str, body))
}

/// Load a module's metadata from a steering file (the body stays on disk)
pub fn module_from_file(path: &Path) -> Result<KnowledgeModule> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    let (front_matter, _) = parse_steering_content(&content)
        .with_context(|| format!("Failed to parse steering file {:?}", path))?;

    let id = match front_matter.id {
        Some(id) => id,
        None => path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Cannot derive module id from {:?}", path))?,
    };

    let mut module = KnowledgeModule::new(
        id,
        front_matter.category,
        &front_matter.keywords,
        ContentRef::File(path.to_path_buf()),
    )
    .with_priority(front_matter.priority.unwrap_or(DEFAULT_PRIORITY));

    if let Some(description) = front_matter.description {
        module = module.with_description(description);
    }

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steering_content() {
        let content = r#"---
id: accessibility
description: WCAG and assistive technology guidance
category: accessibility
priority: 10
keywords:
  - accessibility
  - Screen Reader
---

# Accessibility

Use semantic HTML first.
"#;

        let (front_matter, body) = parse_steering_content(content).unwrap();
        assert_eq!(front_matter.id.as_deref(), Some("accessibility"));
        assert_eq!(front_matter.category, Category::Accessibility);
        assert_eq!(front_matter.priority, Some(10));
        assert_eq!(front_matter.keywords, vec!["accessibility", "Screen Reader"]);
        assert!(body.contains("# Accessibility"));
    }

    #[test]
    fn test_parse_without_body() {
        let content = "---\ncategory: general\nkeywords: [help]\n---";
        let (front_matter, body) = parse_steering_content(content).unwrap();
        assert_eq!(front_matter.category, Category::General);
        assert!(body.is_empty());
    }

    #[test]
    fn test_missing_front_matter() {
        assert!(parse_steering_content("# Just markdown\n").is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let content = "---\ncategory: astrology\nkeywords: [stars]\n---\nbody\n";
        assert!(parse_steering_content(content).is_err());
    }

    #[test]
    fn test_strip_front_matter() {
        let content = "---\ncategory: forms\n---\nValidate on blur.\n";
        assert_eq!(strip_front_matter(content).unwrap(), "Validate on blur.\n");
    }

    #[test]
    fn test_module_from_file_defaults_id_to_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responsive-layout.md");
        fs::write(
            &path,
            "---\ncategory: layout\nkeywords:\n  - Responsive\n  - breakpoint\n---\nbody\n",
        )
        .unwrap();

        let module = module_from_file(&path).unwrap();
        assert_eq!(module.id, "responsive-layout");
        assert_eq!(module.category, Category::Layout);
        assert_eq!(module.priority, DEFAULT_PRIORITY);
        assert_eq!(module.keywords, vec!["responsive", "breakpoint"]);
        assert_eq!(module.content, ContentRef::File(path));
    }
}
