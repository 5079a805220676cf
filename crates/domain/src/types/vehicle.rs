//! Vehicle entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::Location;

/// A vehicle registered under the authenticated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vehicle {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "VIN")]
    pub vin: Option<String>,
    #[serde(default)]
    pub license_plate: Option<String>,
    /// Id of the device currently installed in the vehicle
    #[serde(default)]
    pub mojio_id: Option<String>,
    #[serde(default)]
    pub current_trip: Option<String>,
    #[serde(default)]
    pub ignition_on: Option<bool>,
    #[serde(default)]
    pub odometer: Option<f64>,
    #[serde(default)]
    pub fuel_level: Option<f64>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Mutable fields accepted by the vehicle update operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VehicleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "VIN")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
}
