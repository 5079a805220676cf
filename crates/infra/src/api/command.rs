//! Command lifecycle: validate, dispatch, process
//!
//! A [`Command`] is one named operation plus its parameters. It is
//! single-use: once dispatched it either holds a result or has failed.

use std::fmt;
use std::marker::PhantomData;

use mojio_domain::{MojioError, Result};
use reqwest::header::HeaderMap;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::params::{render_value, Params};
use super::registry::{OperationSpec, ParamLocation, ResponseShape};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Per-kind behavior plugged into the generic command lifecycle.
pub trait CommandKind {
    /// What a successful response is turned into.
    type Output;

    /// Response shape the kind can materialize.
    const SHAPE: ResponseShape;

    /// Normalize or reject parameters. Runs before required-parameter
    /// checks.
    fn validate(params: &mut Params) -> Result<()> {
        let _ = params;
        Ok(())
    }

    /// Turn a 2xx response into the output value.
    fn materialize(response: &HttpResponse) -> Result<Self::Output>;
}

/// A single entity decoded from the JSON body.
pub struct Single<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned> CommandKind for Single<T> {
    type Output = T;
    const SHAPE: ResponseShape = ResponseShape::Entity;

    fn materialize(response: &HttpResponse) -> Result<T> {
        response.json()
    }
}

/// Success carries no payload worth decoding.
pub struct NoContent;

impl CommandKind for NoContent {
    type Output = ();
    const SHAPE: ResponseShape = ResponseShape::Empty;

    fn materialize(_response: &HttpResponse) -> Result<()> {
        Ok(())
    }
}

/// Fully read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    /// Drain a reqwest response into memory.
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| MojioError::from(InfraError::from(e)))?;
        Ok(Self { status, headers, body })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| MojioError::from(InfraError::from(e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandState {
    Created,
    Validated,
    Dispatched,
    Succeeded,
    Failed,
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "created",
            Self::Validated => "validated",
            Self::Dispatched => "dispatched",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

pub struct Command<K: CommandKind> {
    operation: &'static OperationSpec,
    params: Params,
    state: CommandState,
    response: Option<HttpResponse>,
    result: Option<K::Output>,
}

impl<K: CommandKind> fmt::Debug for Command<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("operation", &self.operation.name)
            .field("params", &self.params)
            .field("state", &self.state)
            .field("status", &self.response.as_ref().map(|r| r.status))
            .finish_non_exhaustive()
    }
}

impl<K: CommandKind> Command<K> {
    /// Bind parameters to an operation.
    ///
    /// # Errors
    /// Returns [`MojioError::Validation`] if the kind cannot decode what
    /// the operation returns, e.g. a single-entity command for a list
    /// operation.
    pub fn new(operation: &'static OperationSpec, params: Params) -> Result<Self> {
        if operation.response != K::SHAPE {
            return Err(MojioError::Validation(format!(
                "operation {} returns {:?}, command expects {:?}",
                operation.name,
                operation.response,
                K::SHAPE
            )));
        }

        Ok(Self { operation, params, state: CommandState::Created, response: None, result: None })
    }

    pub fn name(&self) -> &'static str {
        self.operation.name
    }

    pub fn operation(&self) -> &'static OperationSpec {
        self.operation
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Set a parameter.
    ///
    /// # Errors
    /// Returns [`MojioError::Internal`] once the command has been dispatched.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        if !matches!(self.state, CommandState::Created | CommandState::Validated) {
            return Err(self.reuse_error());
        }
        self.params.insert(key.into(), value.into());
        self.state = CommandState::Created;
        Ok(())
    }

    pub const fn state(&self) -> CommandState {
        self.state
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    /// Output of a successful dispatch.
    pub fn result(&self) -> Option<&K::Output> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<K::Output> {
        self.result
    }

    /// Normalize parameters and check that required ones are present.
    ///
    /// Kind-specific normalization runs first, then the required-parameter
    /// check. Running it again on a validated command is a no-op.
    ///
    /// # Errors
    /// Returns [`MojioError::Validation`] and moves the command to
    /// [`CommandState::Failed`] if parameters are rejected.
    pub fn validate(&mut self) -> Result<()> {
        match self.state {
            CommandState::Validated => return Ok(()),
            CommandState::Created => {}
            _ => return Err(self.reuse_error()),
        }

        let outcome = K::validate(&mut self.params).and_then(|()| self.check_required());
        match outcome {
            Ok(()) => {
                self.state = CommandState::Validated;
                Ok(())
            }
            Err(err) => {
                debug!(operation = self.name(), error = %err, "command rejected");
                self.state = CommandState::Failed;
                Err(err)
            }
        }
    }

    fn check_required(&self) -> Result<()> {
        for spec in self.operation.params.iter().filter(|p| p.required) {
            match self.params.get(spec.name) {
                None | Some(Value::Null) => {
                    return Err(MojioError::Validation(format!(
                        "{} requires parameter {}",
                        self.operation.name, spec.name
                    )))
                }
                Some(Value::String(s)) if spec.location == ParamLocation::Path && s.is_empty() => {
                    return Err(MojioError::Validation(format!(
                        "{} parameter {} must not be empty",
                        self.operation.name, spec.name
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Assemble the HTTP request from the operation and parameters.
    pub(crate) fn build_request(&self, http: &HttpClient, base_url: &str) -> Result<RequestBuilder> {
        let mut path = self.operation.path.to_string();
        let mut query: Vec<(&str, String)> = Vec::new();
        let mut body = Map::new();

        for (name, value) in &self.params {
            match self.operation.location_of(name) {
                ParamLocation::Path => {
                    let rendered = render_value(value)?;
                    path = path.replace(&format!("{{{name}}}"), &urlencoding::encode(&rendered));
                }
                ParamLocation::Body => {
                    body.insert(name.clone(), value.clone());
                }
                ParamLocation::Query => {
                    if !value.is_null() {
                        query.push((name.as_str(), render_value(value)?));
                    }
                }
            }
        }

        if path.contains('{') {
            return Err(MojioError::Validation(format!(
                "{} has unresolved path parameters: {path}",
                self.operation.name
            )));
        }

        let url = format!("{}{}", base_url.trim_end_matches('/'), path);
        let mut request = http.request(self.operation.method.clone(), url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        if !body.is_empty() {
            request = request.json(&body);
        }
        Ok(request)
    }

    pub(crate) fn mark_dispatched(&mut self) -> Result<()> {
        if self.state != CommandState::Validated {
            return Err(self.reuse_error());
        }
        self.state = CommandState::Dispatched;
        Ok(())
    }

    pub(crate) fn fail(&mut self) {
        self.state = CommandState::Failed;
    }

    /// Classify the response: 2xx materializes the result, anything else
    /// is a [`MojioError::Response`].
    ///
    /// # Errors
    /// Returns the response error, a decode error, or
    /// [`MojioError::Internal`] if the command was not dispatched.
    pub fn process(&mut self, response: HttpResponse) -> Result<&K::Output> {
        if self.state != CommandState::Dispatched {
            return Err(self.reuse_error());
        }

        let outcome = if response.is_success() {
            K::materialize(&response)
        } else {
            warn!(
                operation = self.name(),
                status = response.status.as_u16(),
                "unexpected response status"
            );
            Err(MojioError::Response { status: response.status.as_u16(), body: response.body.clone() })
        };
        self.response = Some(response);

        match outcome {
            Ok(output) => {
                self.state = CommandState::Succeeded;
                Ok(self.result.insert(output))
            }
            Err(err) => {
                self.state = CommandState::Failed;
                Err(err)
            }
        }
    }

    fn reuse_error(&self) -> MojioError {
        MojioError::Internal(format!("command {} is already {}", self.operation.name, self.state))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::api::registry::{operations, ServiceDescription};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        #[serde(rename = "Name")]
        name: String,
    }

    fn op(name: &str) -> &'static OperationSpec {
        ServiceDescription::mojio_v2().operation(name).unwrap()
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => Params::new(),
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.to_string(),
        }
    }

    fn dispatched(name: &str) -> Command<Single<Named>> {
        let mut command = Command::new(op(name), params(json!({"id": "v1"}))).unwrap();
        command.validate().unwrap();
        command.mark_dispatched().unwrap();
        command
    }

    #[test]
    fn missing_required_param_fails_validation() {
        let mut command: Command<Single<Named>> = Command::new(op(operations::GET_VEHICLE), Params::new()).unwrap();

        let err = command.validate().unwrap_err();

        assert!(matches!(err, MojioError::Validation(_)));
        assert_eq!(command.state(), CommandState::Failed);
    }

    #[test]
    fn shape_mismatch_is_rejected_up_front() {
        let err = Command::<Single<Named>>::new(op(operations::GET_VEHICLES), Params::new()).unwrap_err();
        assert!(matches!(err, MojioError::Validation(_)));
    }

    #[test]
    fn success_populates_result() {
        let mut command = dispatched(operations::GET_VEHICLE);

        let name = &command.process(response(200, r#"{"Name":"Civic"}"#)).unwrap().name;

        assert_eq!(name, "Civic");
        assert_eq!(command.state(), CommandState::Succeeded);
        assert_eq!(command.response().unwrap().status, StatusCode::OK);
    }

    #[test]
    fn any_2xx_counts_as_success() {
        let mut command = dispatched(operations::GET_VEHICLE);
        assert!(command.process(response(201, r#"{"Name":"x"}"#)).is_ok());
    }

    #[test]
    fn non_2xx_is_a_response_error_with_body() {
        let mut command = dispatched(operations::GET_VEHICLE);

        let err = command.process(response(404, "not here")).unwrap_err();

        assert_eq!(err, MojioError::Response { status: 404, body: "not here".to_string() });
        assert!(command.result().is_none());
        assert_eq!(command.state(), CommandState::Failed);
    }

    #[test]
    fn redirect_status_is_not_success() {
        let mut command = dispatched(operations::GET_VEHICLE);
        let err = command.process(response(304, "")).unwrap_err();
        assert_eq!(err.status(), Some(304));
    }

    #[test]
    fn undecodable_success_body_is_a_decode_error() {
        let mut command = dispatched(operations::GET_VEHICLE);
        let err = command.process(response(200, "<html>")).unwrap_err();
        assert!(matches!(err, MojioError::Decode(_)));
    }

    #[test]
    fn dispatched_command_cannot_be_reused() {
        let mut command = dispatched(operations::GET_VEHICLE);
        command.process(response(200, r#"{"Name":"x"}"#)).unwrap();

        assert!(matches!(command.set("id", "v2"), Err(MojioError::Internal(_))));
        assert!(matches!(command.validate(), Err(MojioError::Internal(_))));
        assert!(matches!(command.mark_dispatched(), Err(MojioError::Internal(_))));
        assert!(matches!(
            command.process(response(200, r#"{"Name":"y"}"#)),
            Err(MojioError::Internal(_))
        ));
    }

    #[test]
    fn process_before_dispatch_is_rejected() {
        let mut command: Command<Single<Named>> =
            Command::new(op(operations::GET_VEHICLE), params(json!({"id": "v1"}))).unwrap();
        assert!(matches!(command.process(response(200, "{}")), Err(MojioError::Internal(_))));
    }

    #[test]
    fn request_places_params_by_location() {
        let http = HttpClient::new().unwrap();
        let mut command: Command<Single<Named>> = Command::new(
            op(operations::UPDATE_VEHICLE),
            params(json!({"id": "a b/c", "Name": "Civic", "expand": "trips"})),
        )
        .unwrap();
        command.validate().unwrap();

        let request = command.build_request(&http, "https://api.moj.io/v2/").unwrap().build().unwrap();

        assert_eq!(request.method(), reqwest::Method::PUT);
        assert_eq!(request.url().path(), "/v2/vehicles/a%20b%2Fc");
        assert_eq!(request.url().query(), Some("expand=trips"));
        let body: Value =
            serde_json::from_slice(request.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(body, json!({"Name": "Civic"}));
    }

    #[test]
    fn no_content_ignores_body() {
        let mut command: Command<NoContent> =
            Command::new(op(operations::DELETE_MOJIO), params(json!({"id": "m1"}))).unwrap();
        command.validate().unwrap();
        command.mark_dispatched().unwrap();

        command.process(response(204, "")).unwrap();

        assert_eq!(command.state(), CommandState::Succeeded);
    }
}
