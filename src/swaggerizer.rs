//! Route aggregation.
//!
//! Folds an ordered list of [`Route`] declarations into a [`Document`]:
//! tags are registered, models and response models are reflected into
//! definitions, and each route's operation is merged into its path.
//!
//! # Example
//!
//! ```
//! use swaggerize::swagger::Document;
//! use swaggerize::swaggerizer::{swaggerize, Route};
//!
//! swaggerize::swagger_model! {
//!     pub struct GetUser {
//!         #[swagger("required:true;in:path;name:username")]
//!         pub username: String,
//!     }
//! }
//!
//! let mut doc = Document::new("myapi.example.com", "/");
//! let routes = vec![Route::new("user", "/user/{username}", "get").model::<GetUser>()];
//! let json = swaggerize(&mut doc, &routes).unwrap();
//! assert!(json.contains("\"/user/{username}\""));
//! ```

use crate::error::Result;
use crate::model::{Describe, ModelDescriptor};
use crate::reflector::{reflect, Reflection};
use crate::swagger::{self, Document, Header, HttpMethod, Operation, Parameter, PathMethods, Schema, Tag};
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Media type used when a route declares no produces/consumes list
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Key and description of the response synthesized for routes without responses
pub const DEFAULT_RESPONSE_NAME: &str = "default";
pub const DEFAULT_RESPONSE_DESCRIPTION: &str = "Default response";

/// One operation to add to the document
#[derive(Debug, Clone, Default)]
pub struct Route {
    /// Tag name; empty for none
    pub group: String,
    /// URL path, e.g. `/user/{username}`
    pub path: String,
    /// HTTP verb, case-insensitive
    pub verb: String,
    /// Request body / parameter model
    pub model: Option<ModelDescriptor>,
    pub responses: Vec<Response>,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
    pub summary: String,
    pub description: String,
}

/// A declared response of a route
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Status code or "default"
    pub name: String,
    pub description: String,
    /// Body model, reflected into a definition
    pub model: Option<ModelDescriptor>,
    pub headers: Vec<ResponseHeader>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ResponseHeader {
    pub name: String,
    #[serde(rename = "type")]
    pub header_type: String,
    pub format: String,
    pub description: String,
}

impl Route {
    pub fn new(group: impl Into<String>, path: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            path: path.into(),
            verb: verb.into(),
            ..Self::default()
        }
    }

    /// Use `T` as the route's model
    pub fn model<T: Describe>(self) -> Self {
        self.model_descriptor(T::describe())
    }

    pub fn model_descriptor(mut self, model: ModelDescriptor) -> Self {
        self.model = Some(model);
        self
    }

    pub fn response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    pub fn produces(mut self, media_type: impl Into<String>) -> Self {
        self.produces.push(media_type.into());
        self
    }

    pub fn consumes(mut self, media_type: impl Into<String>) -> Self {
        self.consumes.push(media_type.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Response {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn model<T: Describe>(self) -> Self {
        self.model_descriptor(T::describe())
    }

    pub fn model_descriptor(mut self, model: ModelDescriptor) -> Self {
        self.model = Some(model);
        self
    }

    pub fn header(mut self, header: ResponseHeader) -> Self {
        self.headers.push(header);
        self
    }
}

/// Fold `routes` into `doc` and return the document as compact JSON.
///
/// # Arguments
///
/// * `doc` - The document to extend, usually fresh from [`Document::new`]
/// * `routes` - Route declarations, applied in order
///
/// # Returns
///
/// The serialized document.
///
/// # Errors
///
/// Any error of [`aggregate`], in which case `doc` is left untouched. The
/// encoder's error is returned as-is if serialization fails.
pub fn swaggerize(doc: &mut Document, routes: &[Route]) -> Result<String> {
    aggregate(doc, routes)?;
    let json = serde_json::to_string(doc)?;
    Ok(json)
}

/// Fold `routes` into `doc` in order, without serializing.
///
/// Later routes win: a verb already present on a path is replaced, and a
/// definition with an already used name overwrites the earlier one.
///
/// The pass is all-or-nothing. Routes are applied to a copy of `doc`, which
/// replaces it only once every route went through.
///
/// # Errors
///
/// Returns [`Error::NotARecord`](crate::error::Error::NotARecord) if a route
/// or response model is not a record type.
pub fn aggregate(doc: &mut Document, routes: &[Route]) -> Result<()> {
    info!("Aggregating {} routes", routes.len());
    let mut staged = doc.clone();
    for route in routes {
        add_route(&mut staged, route)?;
    }
    *doc = staged;
    Ok(())
}

fn add_route(doc: &mut Document, route: &Route) -> Result<()> {
    debug!("Adding route: {} {}", route.verb, route.path);

    if !route.group.is_empty() {
        doc.add_tag(Tag {
            name: route.group.clone(),
            ..Tag::default()
        });
    }

    let produces = or_default_media_type(&route.produces);
    let consumes = or_default_media_type(&route.consumes);

    let reflection = route.model.as_ref().map(reflect).transpose()?;

    let mut operation = Operation {
        tags: if route.group.is_empty() {
            Vec::new()
        } else {
            vec![route.group.clone()]
        },
        summary: route.summary.clone(),
        description: route.description.clone(),
        ..Operation::default()
    };

    let (responses, response_definitions) = build_responses(&route.responses)?;
    operation.responses = responses;
    for reflection in response_definitions {
        doc.add_definition(reflection.name, reflection.definition);
    }

    let method = HttpMethod::parse(&route.verb);

    if let Some(Reflection {
        name,
        definition,
        parameters,
    }) = reflection
    {
        doc.add_definition(name.clone(), definition);

        if method != Some(HttpMethod::Get) {
            operation.produces = produces;
            operation.consumes = consumes;
            operation.add_parameter(Parameter::body(&name));
        }

        for parameter in parameters {
            operation.add_parameter(Parameter {
                format: String::new(),
                ..parameter
            });
        }
    }

    match method {
        Some(method) => {
            doc.add_path(route.path.clone(), PathMethods::single(method, operation));
        }
        None => warn!(
            "Unsupported verb {:?} on {}, operation dropped",
            route.verb, route.path
        ),
    }

    Ok(())
}

fn or_default_media_type(media_types: &[String]) -> Vec<String> {
    if media_types.is_empty() {
        vec![DEFAULT_MEDIA_TYPE.to_string()]
    } else {
        media_types.to_vec()
    }
}

/// Response map for a route plus the reflected response models to register
fn build_responses(
    responses: &[Response],
) -> Result<(BTreeMap<String, swagger::Response>, Vec<Reflection>)> {
    let mut map = BTreeMap::new();
    let mut definitions = Vec::new();

    if responses.is_empty() {
        map.insert(
            DEFAULT_RESPONSE_NAME.to_string(),
            swagger::Response {
                description: DEFAULT_RESPONSE_DESCRIPTION.to_string(),
                ..swagger::Response::default()
            },
        );
        return Ok((map, definitions));
    }

    for response in responses {
        let mut entry = swagger::Response {
            description: response.description.clone(),
            headers: response
                .headers
                .iter()
                .map(|h| {
                    (
                        h.name.clone(),
                        Header {
                            header_type: h.header_type.clone(),
                            format: h.format.clone(),
                            description: h.description.clone(),
                            ..Header::default()
                        },
                    )
                })
                .collect(),
            ..swagger::Response::default()
        };

        if let Some(model) = &response.model {
            let reflection = reflect(model)?;
            entry.schema = Some(Schema::reference(&reflection.name));
            definitions.push(reflection);
        }

        map.insert(response.name.clone(), entry);
    }

    Ok((map, definitions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    crate::swagger_model! {
        struct Message {
            #[swagger("required:true;in:query;")]
            message_id: String,
            service_id: i32,
            service_name: String,
            sno: String,
        }
    }

    crate::swagger_model! {
        struct GetStatus {
            #[swagger("required:true;in:query;multiple:true;enum:['available','pending','sold']")]
            status: Vec<String>,
        }
    }

    crate::swagger_model! {
        struct GetUser {
            #[swagger("required:true;in:path;name:username")]
            username: String,
        }
    }

    crate::swagger_model! {
        struct PutUser {
            #[swagger("required:true;in:path;name:username")]
            username: String,
            email: String,
        }
    }

    crate::swagger_model! {
        struct PutUserResponse {
            success: bool,
            error: String,
        }
    }

    crate::swagger_model! {
        struct Ping {}
    }

    fn run(routes: &[Route]) -> Value {
        let mut doc = Document::new("myapi.example.com", "/");
        let json = swaggerize(&mut doc, routes).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_get_route_has_no_body_parameter() {
        let value = run(&[Route::new("user", "/user/{username}", "get").model::<GetUser>()]);

        let get = &value["paths"]["/user/{username}"]["get"];
        assert_eq!(
            get["parameters"],
            json!([{"in": "path", "name": "username", "required": true, "type": "string"}])
        );
        assert!(get.get("produces").is_none());
        assert!(get.get("consumes").is_none());
        assert_eq!(
            value["definitions"]["GetUser"]["properties"]["username"]["type"],
            "string"
        );
    }

    #[test]
    fn test_post_route_gets_body_then_annotated_parameters() {
        let value = run(&[Route::new("send", "/send/message", "POST").model::<Message>()]);

        let post = &value["paths"]["/send/message"]["post"];
        assert_eq!(post["tags"], json!(["send"]));
        assert_eq!(post["produces"], json!(["application/json"]));
        assert_eq!(post["consumes"], json!(["application/json"]));
        assert_eq!(
            post["parameters"],
            json!([
                {"in": "body", "name": "body", "required": true, "schema": {"$ref": "#/definitions/Message"}},
                {"in": "query", "name": "message_id", "required": true, "type": "string"}
            ])
        );
    }

    #[test]
    fn test_custom_media_types() {
        let route = Route::new("send", "/send", "put")
            .model::<Message>()
            .produces("application/xml")
            .consumes("text/plain");
        let value = run(&[route]);

        let put = &value["paths"]["/send"]["put"];
        assert_eq!(put["produces"], json!(["application/xml"]));
        assert_eq!(put["consumes"], json!(["text/plain"]));
    }

    #[test]
    fn test_default_response_synthesis() {
        let value = run(&[Route::new("ping", "/ping", "get").model::<Ping>()]);

        assert_eq!(
            value["paths"]["/ping"]["get"]["responses"],
            json!({"default": {"description": "Default response"}})
        );
        let definitions = value["definitions"].as_object().unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(value["definitions"]["Ping"], json!({"type": "object"}));
        assert!(value["paths"]["/ping"]["get"].get("parameters").is_none());
    }

    #[test]
    fn test_response_models_become_definitions() {
        let route = Route::new("user", "/user/{username}", "put")
            .model::<PutUser>()
            .response(Response::new("default", "The default response when everything is ok"))
            .response(Response::new("200", "The user has been put").model::<PutUserResponse>());
        let value = run(&[route]);

        let responses = &value["paths"]["/user/{username}"]["put"]["responses"];
        assert_eq!(
            responses["default"],
            json!({"description": "The default response when everything is ok"})
        );
        assert_eq!(
            responses["200"]["schema"]["$ref"],
            "#/definitions/PutUserResponse"
        );
        assert_eq!(
            value["definitions"]["PutUserResponse"]["properties"],
            json!({
                "error": {"type": "string", "format": "string"},
                "success": {"type": "boolean", "format": "bool"}
            })
        );
        assert!(value["definitions"].get("PutUser").is_some());
    }

    #[test]
    fn test_response_headers() {
        let route = Route::new("", "/limits", "get").response(
            Response::new("200", "ok").header(ResponseHeader {
                name: "X-Rate-Limit".to_string(),
                header_type: "integer".to_string(),
                format: "int32".to_string(),
                description: "Calls per hour".to_string(),
            }),
        );
        let value = run(&[route]);

        assert_eq!(
            value["paths"]["/limits"]["get"]["responses"]["200"]["headers"],
            json!({"X-Rate-Limit": {"type": "integer", "format": "int32", "description": "Calls per hour"}})
        );
    }

    #[test]
    fn test_verbs_merge_on_same_path() {
        let value = run(&[
            Route::new("user", "/user/{username}", "get").model::<GetUser>(),
            Route::new("user", "/user/{username}", "post").model::<PutUser>(),
            Route::new("user", "/user/{username}", "delete").model::<GetUser>(),
        ]);

        let path = value["paths"]["/user/{username}"].as_object().unwrap();
        let mut verbs: Vec<_> = path.keys().cloned().collect();
        verbs.sort();
        assert_eq!(verbs, vec!["delete", "get", "post"]);
        assert_eq!(value["tags"], json!([{"name": "user"}]));
    }

    #[test]
    fn test_enum_and_collection_format_reach_operation() {
        let value = run(&[Route::new("status", "/status", "get").model::<GetStatus>()]);

        assert_eq!(
            value["paths"]["/status"]["get"]["parameters"],
            json!([{
                "in": "query",
                "name": "status",
                "required": true,
                "enum": ["available", "pending", "sold"],
                "type": "string",
                "collectionFormat": "multi"
            }])
        );
        assert_eq!(
            value["definitions"]["GetStatus"]["properties"]["status"]["enum"],
            json!(["available", "pending", "sold"])
        );
    }

    #[test]
    fn test_unsupported_verb_is_dropped() {
        let mut doc = Document::new("host", "/");
        aggregate(&mut doc, &[Route::new("misc", "/misc", "patch").model::<Ping>()]).unwrap();

        assert!(doc.paths.is_empty());
        assert_eq!(doc.tags.len(), 1);
        assert!(doc.definitions.contains_key("Ping"));
    }

    #[test]
    fn test_route_without_model_or_group() {
        let mut doc = Document::new("host", "/");
        aggregate(&mut doc, &[Route::new("", "/health", "get")]).unwrap();

        assert!(doc.tags.is_empty());
        assert!(doc.definitions.is_empty());
        let get = doc.paths["/health"].get.as_ref().unwrap();
        assert!(get.tags.is_empty());
        assert!(get.parameters.is_empty());
        assert!(get.responses.contains_key("default"));
    }

    #[test]
    fn test_non_record_model_fails_whole_pass() {
        let mut doc = Document::new("host", "/");
        let route = Route::new("x", "/x", "post").model_descriptor(ModelDescriptor::new("i64"));

        let err = swaggerize(&mut doc, &[route]).unwrap_err();
        assert!(matches!(err, Error::NotARecord(_)));
    }

    #[test]
    fn test_summary_and_description() {
        let route = Route::new("", "/health", "get")
            .summary("Health check")
            .description("Returns 200 when the service is up");
        let value = run(&[route]);

        let get = &value["paths"]["/health"]["get"];
        assert_eq!(get["summary"], "Health check");
        assert_eq!(get["description"], "Returns 200 when the service is up");
    }

    #[test]
    fn test_failed_pass_leaves_document_untouched() {
        let mut doc = Document::new("host", "/");
        aggregate(&mut doc, &[Route::new("ping", "/ping", "get").model::<Ping>()]).unwrap();
        let before = doc.clone();

        let routes = [
            Route::new("send", "/send/message", "post").model::<Message>(),
            Route::new("bad", "/bad", "post").model_descriptor(ModelDescriptor::new("i64")),
        ];
        let err = aggregate(&mut doc, &routes).unwrap_err();

        assert!(matches!(err, Error::NotARecord(ref n) if n == "i64"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_bad_response_model_leaves_document_untouched() {
        let mut doc = Document::new("host", "/");
        let route = Route::new("user", "/user", "put")
            .model::<PutUser>()
            .response(Response::new("200", "ok").model_descriptor(ModelDescriptor::new("bool")));

        assert!(swaggerize(&mut doc, &[route]).is_err());
        assert_eq!(doc, Document::new("host", "/"));
    }
}
