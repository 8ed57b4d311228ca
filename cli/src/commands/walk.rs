//! Scripted navigation command

use super::resolve::describe;
use anyhow::{bail, Result};
use colored::Colorize;
use rotta_core::{NavigationController, NavigationError, Params};
use tracing::info;

/// A single navigation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Back,
    Forward,
    Named(String),
    Location(String),
}

impl Step {
    /// Parse `back`, `forward`, `@name` or a location
    pub fn parse(raw: &str) -> Self {
        match raw {
            "back" => Step::Back,
            "forward" => Step::Forward,
            _ => match raw.strip_prefix('@') {
                Some(name) => Step::Named(name.to_string()),
                None => Step::Location(raw.to_string()),
            },
        }
    }
}

/// Replay navigation steps, printing the current route after each one.
///
/// Failed steps leave the current route unchanged; the command fails at the
/// end if any step failed.
pub fn walk_command(controller: &mut NavigationController, steps: &[String]) -> Result<()> {
    info!(steps = steps.len(), "Replaying navigation");

    let mut failures = 0;
    for raw in steps {
        let outcome: Result<(), NavigationError> = match Step::parse(raw) {
            Step::Back => {
                if controller.back().is_none() {
                    println!("{} -> {}", raw, "no previous entry".yellow());
                }
                Ok(())
            }
            Step::Forward => {
                if controller.forward().is_none() {
                    println!("{} -> {}", raw, "no next entry".yellow());
                }
                Ok(())
            }
            Step::Named(name) => controller.push_named(&name, &Params::new()).map(|_| ()),
            Step::Location(location) => controller.push(&location).map(|_| ()),
        };

        if let Err(e) = outcome {
            failures += 1;
            println!("{} -> {}", raw, e.to_string().red());
            continue;
        }

        match controller.current() {
            Some(current) => println!(
                "{} -> {} at {}",
                raw,
                describe(current),
                controller.mode().href(controller.base(), &current.location.path)
            ),
            None => println!("{} -> {}", raw, "nowhere".dimmed()),
        }
    }

    if failures > 0 {
        bail!("{} navigation step(s) failed", failures);
    }
    Ok(())
}
