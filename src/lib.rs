//! Swaggerize - Swagger 2.0 documents from route declarations and typed models.
//!
//! A route names a group (tag), a path, an HTTP verb, an optional model and
//! its responses. Models are record types whose fields are reflected into
//! definition properties; fields carrying an annotation such as
//! `#[swagger("required:true;in:query")]` additionally become operation
//! parameters.
//!
//! # Architecture
//!
//! 1. [`swagger`] - Swagger 2.0 document types and their insertion rules
//! 2. [`annotation`] - Parser for the field annotation mini-language
//! 3. [`model`] - The [`model::Describe`] capability and the [`swagger_model!`] macro
//! 4. [`reflector`] - Turns a model into a definition and its parameters
//! 5. [`swaggerizer`] - Folds routes into a document and renders it
//! 6. [`manifest`] - Routes and metadata declared in a YAML/JSON file
//! 7. [`scanner`], [`parser`], [`resolver`] - Find models by name in Rust sources
//! 8. [`serializer`] - Pretty JSON / YAML output
//!
//! # Example Usage
//!
//! ```
//! use swaggerize::swagger::Document;
//! use swaggerize::swaggerizer::{swaggerize, Response, Route};
//!
//! swaggerize::swagger_model! {
//!     pub struct PutUser {
//!         #[swagger("required:true;in:path;name:username")]
//!         pub username: String,
//!         pub email: String,
//!     }
//! }
//!
//! swaggerize::swagger_model! {
//!     pub struct PutUserResponse {
//!         pub success: bool,
//!         pub error: String,
//!     }
//! }
//!
//! let mut doc = Document::new("myapi.example.com", "/");
//! let routes = vec![Route::new("user", "/user/{username}", "put")
//!     .model::<PutUser>()
//!     .response(Response::new("200", "The user has been put").model::<PutUserResponse>())];
//!
//! let json = swaggerize(&mut doc, &routes).unwrap();
//! assert!(json.contains("#/definitions/PutUserResponse"));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which drives the manifest workflow.

pub mod annotation;
pub mod cli;
pub mod error;
pub mod manifest;
pub mod model;
pub mod parser;
pub mod reflector;
pub mod resolver;
pub mod scanner;
pub mod serializer;
pub mod swagger;
pub mod swaggerizer;
