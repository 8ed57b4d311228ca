//! Application route table
//!
//! New pages are added by appending a registration here. Existing entries
//! are never reordered or altered, so each version extends the previous one.

use crate::error::ConfigError;
use crate::router::{RouteDescriptor, RouteTable, RouteTableBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Views mounted by the application shell
pub mod views {
    use crate::router::ViewRef;

    pub const HOME: ViewRef = ViewRef::new("HomeView");
    pub const PREFERITI: ViewRef = ViewRef::new("PreferitiView");
    pub const MAPPAMONDO: ViewRef = ViewRef::new("MappamondoView");
}

/// Published versions of the route table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableVersion {
    V1,
    #[default]
    V2,
}

impl TableVersion {
    pub const ALL: [TableVersion; 2] = [TableVersion::V1, TableVersion::V2];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableVersion::V1 => "v1",
            TableVersion::V2 => "v2",
        }
    }

    /// The version this one extends, if any
    pub fn previous(&self) -> Option<TableVersion> {
        match self {
            TableVersion::V1 => None,
            TableVersion::V2 => Some(TableVersion::V1),
        }
    }
}

impl fmt::Display for TableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(TableVersion::V1),
            "v2" | "2" => Ok(TableVersion::V2),
            other => Err(ConfigError::UnknownTableVersion {
                version: other.to_string(),
            }),
        }
    }
}

fn register_v1(builder: RouteTableBuilder) -> Result<RouteTableBuilder, ConfigError> {
    builder
        .register_route(RouteDescriptor::new("/", "Home", views::HOME)?.with_meta("title", "Home"))?
        .register_route(
            RouteDescriptor::new("/preferiti", "Preferiti", views::PREFERITI)?
                .with_meta("title", "Preferiti"),
        )
}

fn register_v2(builder: RouteTableBuilder) -> Result<RouteTableBuilder, ConfigError> {
    register_v1(builder)?.register_route(
        RouteDescriptor::new("/mappamondo", "mappamondo", views::MAPPAMONDO)?
            .with_meta("title", "Mappamondo"),
    )
}

/// Build the application route table for a version
pub fn route_table(version: TableVersion) -> Result<RouteTable, ConfigError> {
    let builder = RouteTable::builder();
    let builder = match version {
        TableVersion::V1 => register_v1(builder)?,
        TableVersion::V2 => register_v2(builder)?,
    };
    Ok(builder.build())
}
