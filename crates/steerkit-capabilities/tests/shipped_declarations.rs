//! Tests against the capability declarations shipped in the repository

use std::path::PathBuf;
use steerkit_capabilities::{
    available_capabilities, CapabilityConfig, CapabilityTable, EnvironmentSnapshot,
};

fn shipped_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../mcp.json")
}

#[test]
fn test_shipped_declarations_parse() {
    let config = CapabilityConfig::load(&shipped_path()).expect("mcp.json should parse");
    let names: Vec<_> = config.descriptors().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["design-file-access", "browser-automation"]);
}

#[test]
fn test_shipped_table_gating() {
    let table = CapabilityTable::from_file(&shipped_path()).expect("mcp.json should validate");

    let design = table.get("design-file-access").expect("declared");
    assert_eq!(design.server, "figma");
    assert_eq!(design.required_env, vec!["FIGMA_API_KEY"]);
    assert_eq!(design.connector.command_line(), "npx -y figma-developer-mcp --stdio");

    let mut env = EnvironmentSnapshot::default();
    let unavailable: Vec<_> = available_capabilities(&table, &env)
        .into_iter()
        .filter(|status| !status.is_available())
        .map(|status| status.name)
        .collect();
    assert_eq!(unavailable, vec!["design-file-access"]);

    env.set("FIGMA_API_KEY", "figd_test");
    assert!(available_capabilities(&table, &env)
        .iter()
        .all(|status| status.is_available()));
}
