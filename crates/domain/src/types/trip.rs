//! Trip entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::Location;

/// A single ignition-on to ignition-off journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trip {
    pub id: String,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub mojio_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    /// Kilometres
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub start_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_location: Option<Location>,
    #[serde(default)]
    pub end_location: Option<Location>,
    #[serde(default)]
    pub max_speed: Option<f64>,
    #[serde(default)]
    pub idling_count: Option<u32>,
}
