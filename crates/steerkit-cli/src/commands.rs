use anyhow::{Context, Result};
use std::io::{self, BufRead, Read, Write};
use std::process::ExitCode;
use std::sync::Arc;
use steerkit_capabilities::{Availability, CapabilityStatus, EnvironmentSnapshot};
use steerkit_router::{ContentPack, FsContentSource, Router, Session, SessionStore, TurnReport};
use steerkit_types::RegistryError;
use tracing::info;

use crate::config::Config;

/// Exit code when the registry or capability table has violations
const EXIT_VIOLATIONS: u8 = 1;

/// Check every invariant and print all violations, one per line
pub fn validate(config: &Config) -> Result<ExitCode> {
    let report = ContentPack::check(&config.pack_paths(), &config.router.default_module)?;

    if report.is_ok() {
        println!("registry and capability table are valid");
        return Ok(ExitCode::SUCCESS);
    }

    for violation in &report.violations {
        println!("{violation}");
    }
    println!("{} violation(s) found", report.violations.len());
    Ok(ExitCode::from(EXIT_VIOLATIONS))
}

pub fn modules(config: &Config) -> Result<ExitCode> {
    let Some(router) = build_router(config)? else {
        return Ok(ExitCode::from(EXIT_VIOLATIONS));
    };
    print!("{}", router.registry().generate_listing());
    Ok(ExitCode::SUCCESS)
}

pub fn route(
    config: &Config,
    words: &[String],
    from_stdin: bool,
    json: bool,
    show_content: bool,
) -> Result<ExitCode> {
    let Some(router) = build_router(config)? else {
        return Ok(ExitCode::from(EXIT_VIOLATIONS));
    };

    let input = if from_stdin {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        router.parse_json_bytes(&buffer)
    } else {
        router.parse_query(&words.join(" "))
    };

    let mut session = Session::new();
    let report = router.turn(&mut session, input, &EnvironmentSnapshot::from_process());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, show_content);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn capabilities(config: &Config, json: bool) -> Result<ExitCode> {
    let Some(router) = build_router(config)? else {
        return Ok(ExitCode::from(EXIT_VIOLATIONS));
    };

    let statuses = router.capabilities(&EnvironmentSnapshot::from_process());
    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else if statuses.is_empty() {
        println!("No tool integrations declared");
    } else {
        for status in &statuses {
            println!("{}", describe(status));
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Interactive loop: one session, one turn per line, fresh environment each turn
///
/// Lines are read as raw bytes so a line that is not UTF-8 only rejects its
/// own turn.
pub fn chat(config: &Config, session_id: Option<&str>) -> Result<ExitCode> {
    let Some(router) = build_router(config)? else {
        return Ok(ExitCode::from(EXIT_VIOLATIONS));
    };

    let mut sessions = SessionStore::new();
    let id = match session_id {
        Some(id) => id.to_string(),
        None => sessions.open(),
    };
    let session = sessions.open_with(&id);
    info!("Chat session {} started", session.id());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .context("Failed to read stdin")?;
        if read == 0 {
            break;
        }
        let text = trim_line_ending(&line);

        let report = router.turn(
            session,
            router.parse_bytes(text),
            &EnvironmentSnapshot::from_process(),
        );

        let selected: Vec<_> = report.matches.iter().map(|m| m.module_id.as_str()).collect();
        let loaded: Vec<_> = report.documents.iter().map(|d| d.module_id.as_str()).collect();
        writeln!(
            stdout,
            "turn {}: selected [{}], newly loaded [{}]",
            session.turn_history().len(),
            selected.join(", "),
            loaded.join(", ")
        )?;
        for notice in &report.notices {
            writeln!(stdout, "  note: {notice}")?;
        }
        stdout.flush()?;
    }

    writeln!(
        stdout,
        "session {}: {} module(s) in context",
        session.id(),
        session.loaded_module_ids().len()
    )?;
    Ok(ExitCode::SUCCESS)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Load the content pack, printing violations instead of failing hard
fn build_router(config: &Config) -> Result<Option<Router>> {
    let pack = match ContentPack::load(&config.pack_paths(), &config.router.default_module) {
        Ok(pack) => pack,
        Err(e) => {
            let err = e.downcast::<RegistryError>()?;
            eprintln!("Cannot start: {err}");
            for violation in &err.violations {
                eprintln!("  {violation}");
            }
            return Ok(None);
        }
    };

    Ok(Some(Router::new(
        Arc::new(pack.registry),
        Arc::new(pack.capabilities),
        config.router_config(),
        FsContentSource,
    )))
}

fn describe(status: &CapabilityStatus) -> String {
    match &status.availability {
        Availability::Available => format!("available    {} ({})", status.name, status.server),
        Availability::Unavailable { missing } => format!(
            "unavailable  {} ({}): missing {}",
            status.name,
            status.server,
            missing.join(", ")
        ),
    }
}

fn print_report(report: &TurnReport, show_content: bool) {
    if let Some(reason) = &report.rejected {
        println!("Query rejected: {reason}");
    }

    println!("Selected modules:");
    for result in &report.matches {
        if result.is_fallback() {
            println!("  {} (default)", result.module_id);
        } else {
            println!(
                "  {}  score {}  [{}]",
                result.module_id,
                result.score,
                result.matched_keywords.join(", ")
            );
        }
    }

    for document in &report.documents {
        println!(
            "Loaded {} ({}, {} bytes)",
            document.module_id,
            document.category,
            document.content.len()
        );
        if show_content {
            println!("{}", document.content);
        }
    }

    for failure in &report.failed {
        println!("Failed: {failure}");
    }

    for status in &report.capabilities {
        println!("{}", describe(status));
    }

    for notice in &report.notices {
        println!("Note: {notice}");
    }
}
