//! Swagger 2.0 document model.
//!
//! Plain data types mirroring the Swagger 2.0 wire format, plus the few
//! insertion helpers that keep the document consistent while routes are folded
//! into it: tags stay unique by name, definitions are replaced by name, and a
//! path keeps the verbs it already has when a new verb is merged in.
//!
//! Every optional field is skipped during serialization when it is empty.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of every `$ref` pointing into the document's definitions.
pub const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

fn is_false(value: &bool) -> bool {
    !*value
}

/// Root Swagger 2.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Swagger version, always "2.0"
    pub swagger: String,
    pub info: Info,
    pub host: String,
    pub base_path: String,
    /// Tags in first-insertion order, unique by name
    pub tags: Vec<Tag>,
    pub schemes: Vec<String>,
    /// URL path -> operations on that path
    pub paths: BTreeMap<String, PathMethods>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, Definition>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_definitions: BTreeMap<String, SecurityDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

/// API metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Info {
    pub description: String,
    pub version: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub terms_of_service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: String,
    pub url: String,
}

/// A named group of operations. Identity is the name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tag {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalDocs {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// HTTP verbs a path can carry in this model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Case-insensitive verb lookup; anything other than get/post/put/delete is `None`.
    pub fn parse(verb: &str) -> Option<Self> {
        match verb.trim().to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

/// One slot per supported verb on a single path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathMethods {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

impl PathMethods {
    /// A verb set with exactly one populated slot
    pub fn single(method: HttpMethod, operation: Operation) -> Self {
        let mut methods = Self::default();
        *methods.slot_mut(method) = Some(operation);
        methods
    }

    pub fn slot(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Delete => &mut self.delete,
        }
    }

    /// Takes the first populated slot in post, get, put, delete order.
    fn take_first(self) -> Option<(HttpMethod, Operation)> {
        let PathMethods {
            post,
            get,
            put,
            delete,
        } = self;
        post.map(|op| (HttpMethod::Post, op))
            .or_else(|| get.map(|op| (HttpMethod::Get, op)))
            .or_else(|| put.map(|op| (HttpMethod::Put, op)))
            .or_else(|| delete.map(|op| (HttpMethod::Delete, op)))
    }
}

/// One verb's operation on a path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operation_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Response>,
}

impl Operation {
    /// Append a parameter, keeping declaration order
    pub fn add_parameter(&mut self, parameter: Parameter) -> &mut Self {
        self.parameters.push(parameter);
        self
    }
}

/// An operation parameter.
///
/// Either a primitive (`type`/`format`) or, for `in: body`, a `schema`
/// referencing a definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameter {
    #[serde(rename = "$ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,
    /// query, header, path, formdata or body
    #[serde(rename = "in", skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub param_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub collection_format: String,
}

impl Parameter {
    /// The required `body` parameter pointing at a definition
    pub fn body(definition_name: &str) -> Self {
        Self {
            location: "body".to_string(),
            name: "body".to_string(),
            required: true,
            schema: Some(Schema::reference(definition_name)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub exclusive_maximum: bool,
}

impl Schema {
    /// A `$ref` schema pointing at `#/definitions/<name>`
    pub fn reference(definition_name: &str) -> Self {
        Self {
            reference: format!("{}{}", DEFINITIONS_REF_PREFIX, definition_name),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(rename = "$ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Header>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    #[serde(rename = "$ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub header_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityDefinition {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// query or header
    #[serde(rename = "in", skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub authorization_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub flow: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, String>,
}

/// A reusable named object schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definition {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub definition_type: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<DefinitionXml>,
}

impl Definition {
    /// An empty `object` definition
    pub fn object() -> Self {
        Self {
            definition_type: "object".to_string(),
            ..Self::default()
        }
    }

    /// Insert or replace a property by name
    pub fn add_property(&mut self, name: impl Into<String>, property: Property) -> &mut Self {
        self.properties.insert(name.into(), property);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    #[serde(rename = "$ref", skip_serializing_if = "String::is_empty")]
    pub reference: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub property_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    /// Element schema when the property is an array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Property>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub exclusive_maximum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    #[serde(skip_serializing_if = "is_false")]
    pub unique_items: bool,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionXml {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(skip_serializing_if = "is_false")]
    pub attribute: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub wrapped: bool,
}

impl Document {
    /// Create an empty document for the given host and base path
    pub fn new(host: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            swagger: "2.0".to_string(),
            info: Info::default(),
            host: host.into(),
            base_path: base_path.into(),
            tags: Vec::new(),
            schemes: Vec::new(),
            paths: BTreeMap::new(),
            definitions: BTreeMap::new(),
            security_definitions: BTreeMap::new(),
            external_docs: None,
        }
    }

    pub fn set_info(&mut self, info: Info) -> &mut Self {
        self.info = info;
        self
    }

    /// Append a tag unless one with the same name is already present
    pub fn add_tag(&mut self, tag: Tag) -> &mut Self {
        if self.tags.iter().any(|existing| existing.name == tag.name) {
            debug!("Tag {} already registered", tag.name);
        } else {
            debug!("Registering tag: {}", tag.name);
            self.tags.push(tag);
        }
        self
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) -> &mut Self {
        self.tags = tags;
        self
    }

    /// Store a definition under `name`, replacing any previous one
    pub fn add_definition(&mut self, name: impl Into<String>, definition: Definition) -> &mut Self {
        let name = name.into();
        if self.definitions.insert(name.clone(), definition).is_some() {
            debug!("Definition {} replaced", name);
        }
        self
    }

    pub fn set_definitions(&mut self, definitions: BTreeMap<String, Definition>) -> &mut Self {
        self.definitions = definitions;
        self
    }

    /// Add operations to a path.
    ///
    /// An unseen path takes the whole verb set. A known path only receives the
    /// first populated verb of `methods`, checked in post, get, put, delete
    /// order; the other verbs already on the path are left alone.
    pub fn add_path(&mut self, path: impl Into<String>, methods: PathMethods) -> &mut Self {
        let path = path.into();
        match self.paths.get_mut(&path) {
            Some(existing) => {
                if let Some((method, operation)) = methods.take_first() {
                    debug!("Merging {} into existing path {}", method.as_str(), path);
                    *existing.slot_mut(method) = Some(operation);
                }
            }
            None => {
                debug!("Adding path {}", path);
                self.paths.insert(path, methods);
            }
        }
        self
    }

    pub fn set_paths(&mut self, paths: BTreeMap<String, PathMethods>) -> &mut Self {
        self.paths = paths;
        self
    }

    pub fn add_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        let scheme = scheme.into();
        if !self.schemes.contains(&scheme) {
            self.schemes.push(scheme);
        }
        self
    }

    pub fn add_security_definition(
        &mut self,
        name: impl Into<String>,
        definition: SecurityDefinition,
    ) -> &mut Self {
        self.security_definitions.insert(name.into(), definition);
        self
    }

    pub fn set_external_docs(&mut self, docs: ExternalDocs) -> &mut Self {
        self.external_docs = Some(docs);
        self
    }
}
