//! Static description of the Mojio v2 REST operations
//!
//! Each operation maps a name to an HTTP method, a path template and the
//! parameters it knows about. Parameters not declared here are still
//! accepted and sent as query parameters.

use std::collections::HashMap;

use mojio_domain::{MojioError, Result};
use once_cell::sync::Lazy;
use reqwest::Method;

/// Operation names understood by [`ServiceDescription::mojio_v2`].
pub mod operations {
    pub const GET_ME: &str = "GetMe";
    pub const GET_VEHICLES: &str = "GetVehicles";
    pub const GET_VEHICLE: &str = "GetVehicle";
    pub const UPDATE_VEHICLE: &str = "UpdateVehicle";
    pub const GET_VEHICLE_TRIPS: &str = "GetVehicleTrips";
    pub const GET_TRIPS: &str = "GetTrips";
    pub const GET_TRIP: &str = "GetTrip";
    pub const GET_MOJIOS: &str = "GetMojios";
    pub const GET_MOJIO: &str = "GetMojio";
    pub const CLAIM_MOJIO: &str = "ClaimMojio";
    pub const DELETE_MOJIO: &str = "DeleteMojio";
}

/// Where a parameter is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Query,
    Path,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub location: ParamLocation,
    pub required: bool,
}

impl ParamSpec {
    const fn query(name: &'static str) -> Self {
        Self { name, location: ParamLocation::Query, required: false }
    }

    const fn path(name: &'static str) -> Self {
        Self { name, location: ParamLocation::Path, required: true }
    }

    const fn body(name: &'static str, required: bool) -> Self {
        Self { name, location: ParamLocation::Body, required }
    }
}

/// What a successful response body holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Entity,
    List,
    Empty,
}

#[derive(Debug, Clone)]
pub struct OperationSpec {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    pub response: ResponseShape,
}

impl OperationSpec {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn location_of(&self, name: &str) -> ParamLocation {
        self.param(name).map_or(ParamLocation::Query, |p| p.location)
    }
}

const LIST_PARAMS: &[ParamSpec] = &[
    ParamSpec::query("filter"),
    ParamSpec::query("top"),
    ParamSpec::query("skip"),
    ParamSpec::query("select"),
    ParamSpec::query("sortBy"),
    ParamSpec::query("desc"),
];

const NO_PARAMS: &[ParamSpec] = &[];

const ID_PARAM: &[ParamSpec] = &[ParamSpec::path("id")];

const ID_LIST_PARAMS: &[ParamSpec] = &[
    ParamSpec::path("id"),
    ParamSpec::query("filter"),
    ParamSpec::query("top"),
    ParamSpec::query("skip"),
    ParamSpec::query("select"),
    ParamSpec::query("sortBy"),
    ParamSpec::query("desc"),
];

const UPDATE_VEHICLE_PARAMS: &[ParamSpec] = &[
    ParamSpec::path("id"),
    ParamSpec::body("Name", false),
    ParamSpec::body("VIN", false),
    ParamSpec::body("LicensePlate", false),
];

const CLAIM_MOJIO_PARAMS: &[ParamSpec] =
    &[ParamSpec::body("IMEI", true), ParamSpec::body("Name", false)];

/// Named operations of one API version.
#[derive(Debug)]
pub struct ServiceDescription {
    version: &'static str,
    operations: HashMap<&'static str, OperationSpec>,
}

static MOJIO_V2: Lazy<ServiceDescription> = Lazy::new(|| {
    use operations::*;

    let ops = [
        (GET_ME, Method::GET, "/me", NO_PARAMS, ResponseShape::Entity),
        (GET_VEHICLES, Method::GET, "/vehicles", LIST_PARAMS, ResponseShape::List),
        (GET_VEHICLE, Method::GET, "/vehicles/{id}", ID_PARAM, ResponseShape::Entity),
        (UPDATE_VEHICLE, Method::PUT, "/vehicles/{id}", UPDATE_VEHICLE_PARAMS, ResponseShape::Entity),
        (GET_VEHICLE_TRIPS, Method::GET, "/vehicles/{id}/trips", ID_LIST_PARAMS, ResponseShape::List),
        (GET_TRIPS, Method::GET, "/trips", LIST_PARAMS, ResponseShape::List),
        (GET_TRIP, Method::GET, "/trips/{id}", ID_PARAM, ResponseShape::Entity),
        (GET_MOJIOS, Method::GET, "/mojios", LIST_PARAMS, ResponseShape::List),
        (GET_MOJIO, Method::GET, "/mojios/{id}", ID_PARAM, ResponseShape::Entity),
        (CLAIM_MOJIO, Method::PUT, "/mojios", CLAIM_MOJIO_PARAMS, ResponseShape::Entity),
        (DELETE_MOJIO, Method::DELETE, "/mojios/{id}", ID_PARAM, ResponseShape::Empty),
    ];

    let operations = ops
        .into_iter()
        .map(|(name, method, path, params, response)| {
            (name, OperationSpec { name, method, path, params, response })
        })
        .collect();

    ServiceDescription { version: "v2", operations }
});

impl ServiceDescription {
    /// The built-in description of the v2 API. Built once per process.
    pub fn mojio_v2() -> &'static Self {
        &MOJIO_V2
    }

    pub const fn version(&self) -> &'static str {
        self.version
    }

    /// Look up an operation by name.
    ///
    /// # Errors
    /// Returns [`MojioError::Validation`] for an unknown name.
    pub fn operation(&self, name: &str) -> Result<&OperationSpec> {
        self.operations
            .get(name)
            .ok_or_else(|| MojioError::Validation(format!("unknown operation: {name}")))
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_path_placeholder_is_a_path_param() {
        for name in ServiceDescription::mojio_v2().operation_names() {
            let op = ServiceDescription::mojio_v2().operation(name).unwrap();
            for spec in op.params.iter().filter(|p| p.location == ParamLocation::Path) {
                assert!(op.path.contains(&format!("{{{}}}", spec.name)), "{name} misses {{{}}}", spec.name);
            }
            assert_eq!(
                op.path.matches('{').count(),
                op.params.iter().filter(|p| p.location == ParamLocation::Path).count(),
                "{name}"
            );
        }
    }

    #[test]
    fn list_operations_are_marked() {
        let desc = ServiceDescription::mojio_v2();
        for name in [operations::GET_VEHICLES, operations::GET_TRIPS, operations::GET_MOJIOS] {
            assert_eq!(desc.operation(name).unwrap().response, ResponseShape::List);
        }
        assert_eq!(desc.operation(operations::DELETE_MOJIO).unwrap().method, Method::DELETE);
    }

    #[test]
    fn unknown_operation_is_a_validation_error() {
        let err = ServiceDescription::mojio_v2().operation("GetSpaceships").unwrap_err();
        assert!(matches!(err, MojioError::Validation(_)));
    }

    #[test]
    fn undeclared_params_default_to_query() {
        let op = ServiceDescription::mojio_v2().operation(operations::GET_VEHICLE).unwrap();
        assert_eq!(op.location_of("id"), ParamLocation::Path);
        assert_eq!(op.location_of("expand"), ParamLocation::Query);
    }
}
