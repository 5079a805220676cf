//! List operations: filter criteria, paging, typed result lists

use std::marker::PhantomData;

use mojio_domain::Result;
use serde::de::DeserializeOwned;

use super::command::{CommandKind, HttpResponse};
use super::params::{normalize_criteria, normalize_page, Params};
use super::registry::ResponseShape;
use super::result_list::ResultList;

/// Command kind for operations returning a collection of `T`.
///
/// Before the required-parameter check it rewrites a mapping `filter` into
/// `field=value;...` form and turns `page`/`pageSize` into `top`/`skip`.
pub struct GetList<T>(PhantomData<fn() -> T>);

impl<T> GetList<T> {
    pub fn validate_criteria(params: &mut Params) -> Result<()> {
        normalize_criteria(params)
    }

    pub fn validate_page(params: &mut Params) -> Result<()> {
        normalize_page(params)
    }
}

impl<T: DeserializeOwned> CommandKind for GetList<T> {
    type Output = ResultList<T>;
    const SHAPE: ResponseShape = ResponseShape::List;

    fn validate(params: &mut Params) -> Result<()> {
        Self::validate_criteria(params)?;
        Self::validate_page(params)
    }

    fn materialize(response: &HttpResponse) -> Result<ResultList<T>> {
        ResultList::from_json(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use mojio_domain::MojioError;
    use serde_json::{json, Value};

    use super::*;
    use crate::api::command::{Command, CommandState};
    use crate::api::registry::{operations, ServiceDescription};
    use crate::http::HttpClient;

    fn list_command(value: Value) -> Command<GetList<Value>> {
        let op = ServiceDescription::mojio_v2().operation(operations::GET_VEHICLES).unwrap();
        let Value::Object(map) = value else { unreachable!() };
        Command::new(op, map.into_iter().collect()).unwrap()
    }

    #[test]
    fn validate_normalizes_filter_and_page() {
        let mut command = list_command(json!({"filter": {"status": "on"}, "page": 2, "pageSize": 5}));

        command.validate().unwrap();

        assert_eq!(command.get("filter"), Some(&json!("status=on")));
        assert_eq!(command.get("top"), Some(&json!(5)));
        assert_eq!(command.get("skip"), Some(&json!(5)));
        assert!(command.get("page").is_none());
        assert!(command.get("pageSize").is_none());
    }

    #[test]
    fn bad_page_stops_the_command() {
        let mut command = list_command(json!({"page": "x"}));

        assert!(matches!(command.validate(), Err(MojioError::Validation(_))));
        assert_eq!(command.state(), CommandState::Failed);
    }

    #[test]
    fn normalized_params_reach_the_query_string() {
        let http = HttpClient::new().unwrap();
        let mut command = list_command(json!({"filter": {"a": 1, "b": [2, 3]}, "page": 3}));
        command.validate().unwrap();

        let request = command.build_request(&http, "https://api.moj.io/v2").unwrap().build().unwrap();
        let pairs: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();

        assert_eq!(
            pairs,
            vec![
                ("filter".to_string(), "a=1;b=2,3".to_string()),
                ("top".to_string(), "10".to_string()),
                ("skip".to_string(), "20".to_string()),
            ]
        );
    }
}
