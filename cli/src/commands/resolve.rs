//! Location resolution command

use anyhow::{bail, Result};
use colored::Colorize;
use rotta_core::{NavigationController, NavigationError, Resolved};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct ResolveRow<'a> {
    location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved: Option<Resolved>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Resolve each location and report the matching route.
///
/// Fails when at least one location could not be resolved.
pub fn resolve_command(
    controller: &NavigationController,
    locations: &[String],
    json: bool,
) -> Result<()> {
    info!(count = locations.len(), "Resolving locations");

    let outcomes: Vec<(&str, Result<Resolved, NavigationError>)> = locations
        .iter()
        .map(|location| (location.as_str(), controller.resolve(location)))
        .collect();
    let unresolved = outcomes.iter().filter(|(_, r)| r.is_err()).count();

    if json {
        let rows: Vec<ResolveRow> = outcomes
            .into_iter()
            .map(|(location, outcome)| match outcome {
                Ok(resolved) => ResolveRow {
                    location,
                    resolved: Some(resolved),
                    error: None,
                },
                Err(e) => ResolveRow {
                    location,
                    resolved: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for (location, outcome) in &outcomes {
            match outcome {
                Ok(resolved) => println!("{} -> {}", location, describe(resolved)),
                Err(e) if e.is_not_found() => {
                    println!("{} -> {}", location, "not found".red())
                }
                Err(e) => println!("{} -> {}", location, e.to_string().red()),
            }
        }
    }

    if unresolved > 0 {
        bail!("{} location(s) could not be resolved", unresolved);
    }
    Ok(())
}

/// One-line description of a resolution
pub fn describe(resolved: &Resolved) -> String {
    let mut line = format!(
        "{} ({})",
        resolved.name().as_str().green(),
        resolved.route.view
    );
    if !resolved.params.is_empty() {
        let params: Vec<String> = resolved
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        line.push_str(&format!(" [{}]", params.join(", ")));
    }
    if resolved.fallback {
        line.push_str(&format!(" {}", "(fallback)".yellow()));
    }
    line
}
