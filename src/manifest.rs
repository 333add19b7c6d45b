//! Route manifest: a YAML (or JSON) file declaring document metadata and the
//! routes to describe, with models referenced by type name.
//!
//! ```yaml
//! host: myapi.example.com
//! basePath: /
//! info:
//!   title: My API Example
//!   license: { name: Choose a license, url: "https://choosealicense.com/" }
//! routes:
//!   - group: user
//!     route: /user/{username}
//!     verb: put
//!     model: PutUser
//!     responses:
//!       - name: "200"
//!         description: The user has been put
//!         model: PutUserResponse
//! ```

use crate::error::Result;
use crate::resolver::ModelResolver;
use crate::swagger::{Document, ExternalDocs, Info, SecurityDefinition, Tag};
use crate::swaggerizer::{Response, ResponseHeader, Route};
use anyhow::Context;
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub schemes: Vec<String>,
    /// Tags registered before any route, e.g. to give them descriptions
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub security_definitions: BTreeMap<String, SecurityDefinition>,
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

fn default_base_path() -> String {
    "/".to_string()
}

/// A route as written in the manifest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteEntry {
    pub group: String,
    #[serde(alias = "path")]
    pub route: String,
    pub verb: String,
    /// Model type name
    pub model: Option<String>,
    pub summary: String,
    pub description: String,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
    pub responses: Vec<ResponseEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseEntry {
    pub name: String,
    pub description: String,
    pub model: Option<String>,
    pub headers: Vec<ResponseHeader>,
}

impl Manifest {
    /// Read a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        debug!("Loading manifest: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Parse manifest text. JSON is accepted as well, being valid YAML.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(content)?;
        debug!("Manifest declares {} routes", manifest.routes.len());
        Ok(manifest)
    }

    /// An empty document carrying the manifest's metadata and tags
    pub fn document(&self) -> Document {
        let mut doc = Document::new(self.host.clone(), self.base_path.clone());
        doc.set_info(self.info.clone());
        for scheme in &self.schemes {
            doc.add_scheme(scheme.clone());
        }
        for tag in &self.tags {
            doc.add_tag(tag.clone());
        }
        for (name, definition) in &self.security_definitions {
            doc.add_security_definition(name.clone(), definition.clone());
        }
        if let Some(docs) = &self.external_docs {
            doc.set_external_docs(docs.clone());
        }
        doc
    }

    /// Turn the route entries into [`Route`]s, resolving model names.
    ///
    /// # Arguments
    ///
    /// * `resolver` - Looks up the models named by routes and responses
    ///
    /// # Errors
    ///
    /// Returns the first resolution error, e.g. [`Error::UnknownModel`](crate::error::Error::UnknownModel)
    /// for a name no source defines.
    pub fn routes(&self, resolver: &mut ModelResolver) -> Result<Vec<Route>> {
        self.routes
            .iter()
            .map(|entry| entry.to_route(resolver))
            .collect()
    }
}

impl RouteEntry {
    fn to_route(&self, resolver: &mut ModelResolver) -> Result<Route> {
        let responses = self
            .responses
            .iter()
            .map(|response| -> Result<Response> {
                Ok(Response {
                    name: response.name.clone(),
                    description: response.description.clone(),
                    model: response
                        .model
                        .as_deref()
                        .map(|name| resolver.describe(name))
                        .transpose()?,
                    headers: response.headers.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Route {
            group: self.group.clone(),
            path: self.route.clone(),
            verb: self.verb.clone(),
            model: self
                .model
                .as_deref()
                .map(|name| resolver.describe(name))
                .transpose()?,
            responses,
            produces: self.produces.clone(),
            consumes: self.consumes.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
        })
    }
}
