//! Route listing command

use anyhow::Result;
use colored::Colorize;
use rotta_core::{NavigationController, Params, RouteDescriptor};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct RouteRow<'a> {
    #[serde(flatten)]
    route: &'a RouteDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<String>,
}

/// List the routes of the active table
pub fn routes_command(controller: &NavigationController, json: bool) -> Result<()> {
    info!(routes = controller.table().len(), "Listing routes");

    let rows: Vec<RouteRow> = controller
        .table()
        .iter()
        .map(|route| RouteRow {
            route,
            // Parameterized routes have no concrete href without params
            href: controller.href(route.name.as_str(), &Params::new()).ok(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} ({} history, base {})",
        "Routes".bold(),
        controller.mode(),
        controller.base()
    );
    let width = rows
        .iter()
        .map(|row| row.route.path.as_str().len())
        .max()
        .unwrap_or(0);
    for row in &rows {
        println!(
            "  {:<width$}  {}  {}  {}  {}",
            row.route.path.as_str(),
            row.route.name.as_str().green(),
            row.route.view.name().cyan(),
            row.route.title().unwrap_or("-"),
            row.href.as_deref().unwrap_or("-").dimmed(),
            width = width
        );
    }

    Ok(())
}
