use crate::error::{Error, Result};
use crate::model::{render_type, FieldDescriptor, FieldKind, ModelDescriptor};
use crate::parser::ParsedSource;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;
use syn::visit::Visit;

/// Name of the field attribute carrying an annotation: `#[swagger("...")]`
const ANNOTATION_ATTRIBUTE: &str = "swagger";
/// Macro whose invocations define describable structs
const MODEL_MACRO: &str = "swagger_model";

/// Builds [`ModelDescriptor`]s from struct definitions in parsed source files.
///
/// Both plain `struct` items and `swagger_model! { ... }` invocations are
/// recognized, including those nested in inline modules. The first definition
/// found, in file order, wins.
pub struct ModelResolver {
    sources: Vec<ParsedSource>,
    /// Descriptors already built, by type name
    cache: HashMap<String, ModelDescriptor>,
}

/// What a name turned out to be in the sources
enum Lookup {
    Struct(syn::ItemStruct),
    Enum,
}

impl ModelResolver {
    /// Creates a resolver over already parsed source files.
    ///
    /// # Arguments
    ///
    /// * `sources` - Parsed files, searched in order when a name is looked up
    pub fn new(sources: Vec<ParsedSource>) -> Self {
        debug!("Initializing ModelResolver with {} files", sources.len());
        Self {
            sources,
            cache: HashMap::new(),
        }
    }

    /// Describe the record type called `name`.
    ///
    /// # Arguments
    ///
    /// * `name` - Bare type name, e.g. `PutUser`
    ///
    /// # Returns
    ///
    /// The fields of the first matching definition, cached for later calls.
    ///
    /// # Errors
    ///
    /// [`Error::NotARecord`] for primitives, enums and tuple structs,
    /// [`Error::UnknownModel`] when no source defines `name`, and
    /// [`Error::ParseError`] for a malformed `#[swagger]` attribute.
    pub fn describe(&mut self, name: &str) -> Result<ModelDescriptor> {
        if let Some(cached) = self.cache.get(name) {
            debug!("Model {} found in cache", name);
            return Ok(cached.clone());
        }

        if FieldKind::is_primitive_name(name) {
            return Err(Error::NotARecord(name.to_string()));
        }

        let (path, item) = self
            .sources
            .iter()
            .find_map(|source| {
                ModelFinder::find(&source.syntax_tree, name).map(|item| (source.path.as_path(), item))
            })
            .ok_or_else(|| {
                warn!("Could not resolve model: {}", name);
                Error::UnknownModel(name.to_string())
            })?;

        let item_struct = match item {
            Lookup::Struct(item_struct) => item_struct,
            Lookup::Enum => return Err(Error::NotARecord(name.to_string())),
        };
        debug!("Found model {} in {}", name, path.display());

        let descriptor = describe_struct(path, &item_struct)?;
        self.cache.insert(name.to_string(), descriptor.clone());
        Ok(descriptor)
    }
}

/// Walks a syntax tree looking for the first item that defines `name`.
///
/// Inline modules are descended into; `swagger_model!` invocations are
/// parsed as the struct they wrap.
struct ModelFinder<'n> {
    name: &'n str,
    found: Option<Lookup>,
}

impl<'n> ModelFinder<'n> {
    fn find(file: &syn::File, name: &'n str) -> Option<Lookup> {
        let mut finder = Self { name, found: None };
        finder.visit_file(file);
        finder.found
    }
}

impl<'ast> Visit<'ast> for ModelFinder<'_> {
    fn visit_item_struct(&mut self, node: &'ast syn::ItemStruct) {
        if self.found.is_none() && node.ident == self.name {
            self.found = Some(Lookup::Struct(node.clone()));
        }
    }

    fn visit_item_enum(&mut self, node: &'ast syn::ItemEnum) {
        if self.found.is_none() && node.ident == self.name {
            self.found = Some(Lookup::Enum);
        }
    }

    fn visit_item_macro(&mut self, node: &'ast syn::ItemMacro) {
        if self.found.is_some() || !is_model_macro(&node.mac.path) {
            return;
        }
        match syn::parse2::<syn::ItemStruct>(node.mac.tokens.clone()) {
            Ok(item_struct) if item_struct.ident == self.name => {
                self.found = Some(Lookup::Struct(item_struct));
            }
            Ok(_) => {}
            Err(e) => debug!("Unparseable {}! invocation: {}", MODEL_MACRO, e),
        }
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        if self.found.is_none() {
            syn::visit::visit_item_mod(self, node);
        }
    }
}

fn is_model_macro(path: &syn::Path) -> bool {
    path.segments
        .last()
        .map(|segment| segment.ident == MODEL_MACRO)
        .unwrap_or(false)
}

fn describe_struct(path: &Path, item_struct: &syn::ItemStruct) -> Result<ModelDescriptor> {
    let name = item_struct.ident.to_string();
    let mut descriptor = ModelDescriptor::new(name.clone());

    match &item_struct.fields {
        syn::Fields::Named(named) => {
            for field in &named.named {
                let Some(ident) = &field.ident else { continue };
                let annotation = field_annotation(path, &field.attrs)?;
                descriptor = descriptor.field(FieldDescriptor::new(
                    ident.to_string(),
                    &render_type(&field.ty),
                    annotation.as_deref(),
                ));
            }
        }
        syn::Fields::Unit => {}
        syn::Fields::Unnamed(_) => return Err(Error::NotARecord(name)),
    }

    debug!("Described {} with {} fields", descriptor.name, descriptor.fields.len());
    Ok(descriptor)
}

/// The string inside `#[swagger("...")]`, if the field has one
fn field_annotation(path: &Path, attrs: &[syn::Attribute]) -> Result<Option<String>> {
    for attr in attrs {
        if !attr.path().is_ident(ANNOTATION_ATTRIBUTE) {
            continue;
        }
        let literal: syn::LitStr = attr.parse_args().map_err(|e| Error::ParseError {
            file: path.to_path_buf(),
            message: format!("expected #[{}(\"...\")]: {}", ANNOTATION_ATTRIBUTE, e),
        })?;
        return Ok(Some(literal.value()));
    }
    Ok(None)
}
