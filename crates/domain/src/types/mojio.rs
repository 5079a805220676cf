//! Mojio device entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A telematics device plugged into a vehicle's diagnostic port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Mojio {
    pub id: String,
    #[serde(default, rename = "IMEI")]
    pub imei: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub connected_state: Option<bool>,
    #[serde(default)]
    pub last_contact_time: Option<DateTime<Utc>>,
}

/// Payload used to claim a device for the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MojioClaim {
    #[serde(rename = "IMEI")]
    pub imei: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
