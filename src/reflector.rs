use crate::annotation::parse_annotation;
use crate::error::{Error, Result};
use crate::model::{FieldDescriptor, FieldKind, ModelDescriptor};
use crate::swagger::{Definition, Parameter, Property};
use log::debug;

/// Schema derived from one model
#[derive(Debug, Clone, PartialEq)]
pub struct Reflection {
    /// Definition name, the model's bare type name
    pub name: String,
    pub definition: Definition,
    /// Parameters from annotated fields, in field order
    pub parameters: Vec<Parameter>,
}

/// Reflect a model into an object definition plus its annotated parameters.
///
/// Unannotated fields only become definition properties, keyed by the field
/// name. Annotated fields become both a property (keyed by the parameter name,
/// which `name:` may override) and a parameter. A model without fields yields
/// an empty `object` definition.
///
/// # Arguments
///
/// * `model` - The fields of the record type to reflect
///
/// # Returns
///
/// A [`Reflection`] holding the definition name, the definition and the
/// parameters in field order.
///
/// # Errors
///
/// Returns [`Error::NotARecord`] when the descriptor's name is not an
/// identifier or names a primitive type.
pub fn reflect(model: &ModelDescriptor) -> Result<Reflection> {
    if !is_record_name(&model.name) {
        return Err(Error::NotARecord(model.name.clone()));
    }

    debug!("Reflecting model: {} ({} fields)", model.name, model.fields.len());

    let mut definition = Definition::object();
    let mut parameters = Vec::new();

    for field in &model.fields {
        let (property_type, format) = infer_type(field);
        let mut property = Property {
            property_type: property_type.to_string(),
            format,
            ..Property::default()
        };

        let mut key = field.name.clone();
        if let Some(options) = field.annotation.as_deref().and_then(parse_annotation) {
            if let Some(name) = options.name {
                key = name;
            }
            debug!("Field {} is a {:?} parameter named {}", field.name, options.location, key);

            property.enumeration = options.enumeration.clone();
            parameters.push(Parameter {
                location: options.location,
                name: key.clone(),
                required: options.required,
                enumeration: options.enumeration,
                param_type: property_type.to_string(),
                format: field.type_name.clone(),
                collection_format: options.collection_format,
                ..Parameter::default()
            });
        }

        definition.add_property(key, property);
    }

    Ok(Reflection {
        name: model.name.clone(),
        definition,
        parameters,
    })
}

/// Schema type and format for a field.
///
/// Kinds without a fixed format use the lower-cased declared type name.
fn infer_type(field: &FieldDescriptor) -> (&'static str, String) {
    let (schema_type, format) = match field.kind {
        FieldKind::Bool => ("boolean", None),
        FieldKind::String => ("string", None),
        FieldKind::Int32 => ("integer", Some("int32")),
        FieldKind::Int64 => ("long", Some("int64")),
        FieldKind::Float64 => ("float", Some("float")),
        FieldKind::Other => ("string", None),
    };

    let format = format
        .map(str::to_string)
        .unwrap_or_else(|| field.type_name.to_lowercase());
    (schema_type, format)
}

fn is_record_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && !FieldKind::is_primitive_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Describe;
    use pretty_assertions::assert_eq;

    crate::swagger_model! {
        struct GetStatus {
            #[swagger("required:true;in:query;multiple:true;enum:['a','b']")]
            status: Vec<String>,
        }
    }

    crate::swagger_model! {
        struct Message {
            #[swagger("required:true;in:query;")]
            message_id: String,
            service_id: i32,
            service_name: String,
            total: i64,
            ratio: f64,
            small: f32,
            active: bool,
        }
    }

    crate::swagger_model! {
        struct GetUser {
            #[swagger("required:true;in:path;name:uname")]
            username: String,
        }
    }

    crate::swagger_model! {
        struct Empty {}
    }

    #[test]
    fn test_annotation_round_trip() {
        let reflection = reflect(&GetStatus::describe()).unwrap();

        assert_eq!(reflection.name, "GetStatus");
        assert_eq!(reflection.parameters.len(), 1);

        let param = &reflection.parameters[0];
        assert!(param.required);
        assert_eq!(param.location, "query");
        assert_eq!(param.collection_format, "multi");
        assert_eq!(param.enumeration, vec!["a", "b"]);
        assert_eq!(param.name, "status");

        let property = &reflection.definition.properties["status"];
        assert_eq!(property.enumeration, vec!["a", "b"]);
    }

    #[test]
    fn test_type_inference_table() {
        let reflection = reflect(&Message::describe()).unwrap();
        let props = &reflection.definition.properties;

        let pair = |key: &str| {
            (
                props[key].property_type.as_str(),
                props[key].format.as_str(),
            )
        };
        assert_eq!(pair("message_id"), ("string", "string"));
        assert_eq!(pair("service_id"), ("integer", "int32"));
        assert_eq!(pair("total"), ("long", "int64"));
        assert_eq!(pair("ratio"), ("float", "float"));
        assert_eq!(pair("small"), ("string", "f32"));
        assert_eq!(pair("active"), ("boolean", "bool"));
        assert_eq!(reflection.definition.definition_type, "object");
    }

    #[test]
    fn test_unannotated_fields_are_not_parameters() {
        let reflection = reflect(&Message::describe()).unwrap();

        assert_eq!(reflection.parameters.len(), 1);
        assert_eq!(reflection.parameters[0].name, "message_id");
        assert_eq!(reflection.parameters[0].param_type, "string");
        assert_eq!(reflection.definition.properties.len(), 7);
    }

    #[test]
    fn test_name_override_keys_property_and_parameter() {
        let reflection = reflect(&GetUser::describe()).unwrap();

        assert_eq!(reflection.parameters[0].name, "uname");
        assert!(reflection.definition.properties.contains_key("uname"));
        assert!(!reflection.definition.properties.contains_key("username"));
    }

    #[test]
    fn test_other_kind_uses_lowercased_type_name() {
        let reflection = reflect(&GetStatus::describe()).unwrap();
        let property = &reflection.definition.properties["status"];

        assert_eq!(property.property_type, "string");
        assert_eq!(property.format, "vec<string>");
        assert_eq!(reflection.parameters[0].format, "Vec<String>");
    }

    #[test]
    fn test_empty_model() {
        let reflection = reflect(&Empty::describe()).unwrap();

        assert_eq!(reflection.name, "Empty");
        assert!(reflection.definition.properties.is_empty());
        assert!(reflection.parameters.is_empty());
    }

    #[test]
    fn test_non_record_is_rejected() {
        for name in ["", "u32", "String", "Vec<String>", "9lives"] {
            let err = reflect(&ModelDescriptor::new(name)).unwrap_err();
            assert!(matches!(err, Error::NotARecord(ref n) if n == name), "{}", name);
        }
    }
}
