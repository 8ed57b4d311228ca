//! Route table consistency check

use anyhow::{bail, Result};
use colored::Colorize;
use rotta_core::{route_table, TableVersion};
use tracing::{info, warn};

/// Build every table version and verify each extends the previous one
pub fn check_command(active: TableVersion) -> Result<()> {
    info!(active = %active, "Checking route tables");

    let mut failures = 0;
    for version in TableVersion::ALL {
        let marker = if version == active { "*" } else { " " };
        let table = match route_table(version) {
            Ok(table) => table,
            Err(e) => {
                warn!(version = %version, error = %e, "route table is misconfigured");
                println!("{} {} {}", marker, version, e.to_string().red());
                failures += 1;
                continue;
            }
        };

        let (extension, extends) = match version.previous() {
            Some(previous) => {
                let previous_table = route_table(previous)?;
                if table.strictly_extends(&previous_table) {
                    (format!(", extends {}", previous), true)
                } else {
                    warn!(
                        version = %version,
                        previous = %previous,
                        "route table does not extend its predecessor"
                    );
                    failures += 1;
                    (format!(", {} {}", "does not extend".red(), previous), false)
                }
            }
            None => (String::new(), true),
        };

        let status = if extends { "✓".green() } else { "✗".red() };
        println!(
            "{} {} {} routes{} {}",
            marker,
            version,
            table.len(),
            extension,
            status
        );
    }

    if failures > 0 {
        bail!("{} route table check(s) failed", failures);
    }
    Ok(())
}
