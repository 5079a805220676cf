use serde::{Deserialize, Serialize};

/// Geographic position reported by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub heading: Option<f64>,
    pub altitude: Option<f64>,
}
