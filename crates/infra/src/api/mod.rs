//! Mojio REST API client
//!
//! Operations are looked up by name in a static service description,
//! bound to parameters as a [`Command`], and dispatched through
//! [`ApiClient`].
//!
//! # Architecture
//!
//! - Every request goes through the shared `HttpClient` and its decorators
//! - OAuth grants are exchanged through a pluggable `TokenExchange`
//! - List operations normalize filter criteria and paging before dispatch
//! - Non-2xx responses surface as `MojioError::Response`; nothing is retried

pub mod auth;
pub mod client;
pub mod command;
pub mod commands;
pub mod list;
pub mod params;
pub mod registry;
pub mod result_list;

pub use auth::Credentials;
pub use client::{ApiClient, ApiClientBuilder};
pub use command::{Command, CommandKind, CommandState, HttpResponse, NoContent, Single};
pub use commands::ApiCommands;
pub use list::GetList;
pub use params::{Filter, ListQuery, Params};
pub use registry::{operations, OperationSpec, ParamLocation, ParamSpec, ResponseShape, ServiceDescription};
pub use result_list::ResultList;
