//! Field-level description of record types.
//!
//! The reflector only needs to enumerate a record's fields: name, declared
//! type and annotation. [`Describe`] is how a Rust type hands that over.
//! Implement it by hand, generate it with [`swagger_model!`](crate::swagger_model),
//! or let [`ModelResolver`](crate::resolver::ModelResolver) derive descriptors
//! from source files.

/// A record type that can list its fields for schema reflection
pub trait Describe {
    fn describe() -> ModelDescriptor;
}

/// The fields of one record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Bare type name, used as the definition name
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style field append
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn of<T: Describe>() -> Self {
        T::describe()
    }
}

/// One field of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Declared type as written, without whitespace (e.g. `Vec<String>`)
    pub type_name: String,
    pub kind: FieldKind,
    /// Raw annotation string, if the field carries one
    pub annotation: Option<String>,
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    ///
    /// # Arguments
    ///
    /// * `name` - The field's identifier
    /// * `type_name` - The declared type as source text, e.g. `Vec<std::string::String>`
    /// * `annotation` - The raw `#[swagger("...")]` string, if any
    ///
    /// The type text is normalized the way [`render_type`] prints it, so a
    /// descriptor built from `stringify!` output equals one built from a
    /// parsed syntax tree.
    pub fn new(name: impl Into<String>, type_name: &str, annotation: Option<&str>) -> Self {
        let type_name = normalize_type_name(type_name);
        Self {
            name: name.into(),
            kind: FieldKind::from_type_name(&type_name),
            type_name,
            annotation: annotation.map(str::to_string),
        }
    }
}

/// Coarse runtime kind of a field, as far as schema inference cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    String,
    /// 32-bit or platform-width integer
    Int32,
    Int64,
    Float64,
    Other,
}

impl FieldKind {
    /// Classify a declared type name. Module paths are ignored for plain types.
    pub fn from_type_name(type_name: &str) -> Self {
        let base = if type_name.contains('<') {
            type_name
        } else {
            type_name.rsplit("::").next().unwrap_or(type_name)
        };

        match base {
            "bool" => FieldKind::Bool,
            "String" | "str" | "&str" | "char" => FieldKind::String,
            "i32" | "u32" | "isize" | "usize" => FieldKind::Int32,
            "i64" | "u64" => FieldKind::Int64,
            "f64" => FieldKind::Float64,
            _ => FieldKind::Other,
        }
    }

    /// Whether a bare type name denotes a primitive rather than a record
    pub fn is_primitive_name(name: &str) -> bool {
        FieldKind::from_type_name(name) != FieldKind::Other
            || matches!(
                name,
                "i8" | "i16" | "i128" | "u8" | "u16" | "u128" | "f32" | "()"
            )
    }
}

fn normalize_type_name(type_name: &str) -> String {
    match syn::parse_str::<syn::Type>(type_name) {
        Ok(ty) => render_type(&ty),
        Err(_) => type_name.chars().filter(|c| !c.is_whitespace()).collect(),
    }
}

/// Declared type as text: `Vec<String>`, `&str`, `Option<Vec<u8>>`.
///
/// Module paths and lifetimes are dropped.
pub fn render_type(ty: &syn::Type) -> String {
    match ty {
        syn::Type::Path(type_path) => render_path(&type_path.path),
        syn::Type::Reference(reference) => format!("&{}", render_type(&reference.elem)),
        syn::Type::Slice(slice) => format!("[{}]", render_type(&slice.elem)),
        syn::Type::Array(array) => format!("[{}]", render_type(&array.elem)),
        syn::Type::Tuple(tuple) => {
            let elems: Vec<String> = tuple.elems.iter().map(render_type).collect();
            format!("({})", elems.join(","))
        }
        syn::Type::Paren(paren) => render_type(&paren.elem),
        syn::Type::Group(group) => render_type(&group.elem),
        _ => "unknown".to_string(),
    }
}

fn render_path(path: &syn::Path) -> String {
    let Some(segment) = path.segments.last() else {
        return "unknown".to_string();
    };
    let name = segment.ident.to_string();

    if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
        let inner: Vec<String> = args
            .args
            .iter()
            .filter_map(|arg| match arg {
                syn::GenericArgument::Type(ty) => Some(render_type(ty)),
                _ => None,
            })
            .collect();
        if !inner.is_empty() {
            return format!("{}<{}>", name, inner.join(","));
        }
    }
    name
}

/// Define a struct and implement [`Describe`](crate::model::Describe) for it.
///
/// Each field may carry one `#[swagger("...")]` annotation, which is consumed
/// by the macro and does not reach the generated struct. Every other
/// attribute, doc comments included, is passed through on both the struct
/// and its fields.
///
/// ```
/// use swaggerize::model::Describe;
///
/// swaggerize::swagger_model! {
///     #[derive(Debug, Default)]
///     pub struct GetUser {
///         /// Login name
///         #[swagger("required:true;in:path;name:username")]
///         pub username: String,
///     }
/// }
///
/// let model = GetUser::describe();
/// assert_eq!(model.name, "GetUser");
/// assert_eq!(model.fields[0].annotation.as_deref(), Some("required:true;in:path;name:username"));
/// ```
#[macro_export]
macro_rules! swagger_model {
    // First `swagger("...")` among a field's attributes
    (@annotation) => { ::core::option::Option::None };
    (@annotation [swagger($annotation:literal)] $($rest:tt)*) => {
        ::core::option::Option::Some($annotation)
    };
    (@annotation $skip:tt $($rest:tt)*) => { $crate::swagger_model!(@annotation $($rest)*) };

    // Struct emission. Each pending field is
    // `{ [unsorted attributes] [kept attributes] vis name: type }`.
    (@struct [$($meta:tt)*] [$vis:vis] $name:ident [$($fields:tt)*]) => {
        $($meta)*
        $vis struct $name {
            $($fields)*
        }
    };
    (@struct $meta:tt $vis:tt $name:ident [$($fields:tt)*]
        { [[swagger $($dropped:tt)*] $($attrs:tt)*] [$($kept:tt)*] $field_vis:vis $field:ident : $field_ty:ty }
        $($rest:tt)*
    ) => {
        $crate::swagger_model!(@struct $meta $vis $name [$($fields)*]
            { [$($attrs)*] [$($kept)*] $field_vis $field : $field_ty }
            $($rest)*
        );
    };
    (@struct $meta:tt $vis:tt $name:ident [$($fields:tt)*]
        { [[$($attr:tt)*] $($attrs:tt)*] [$($kept:tt)*] $field_vis:vis $field:ident : $field_ty:ty }
        $($rest:tt)*
    ) => {
        $crate::swagger_model!(@struct $meta $vis $name [$($fields)*]
            { [$($attrs)*] [$($kept)* #[$($attr)*]] $field_vis $field : $field_ty }
            $($rest)*
        );
    };
    (@struct $meta:tt $vis:tt $name:ident [$($fields:tt)*]
        { [] [$($kept:tt)*] $field_vis:vis $field:ident : $field_ty:ty }
        $($rest:tt)*
    ) => {
        $crate::swagger_model!(@struct $meta $vis $name
            [$($fields)* $($kept)* $field_vis $field : $field_ty,]
            $($rest)*
        );
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$($field_attr:tt)*])*
                $field_vis:vis $field:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $crate::swagger_model!(@struct [$(#[$meta])*] [$vis] $name []
            $( { [$([$($field_attr)*])*] [] $field_vis $field : $field_ty } )*
        );

        impl $crate::model::Describe for $name {
            fn describe() -> $crate::model::ModelDescriptor {
                $crate::model::ModelDescriptor::new(stringify!($name))
                    $(
                        .field($crate::model::FieldDescriptor::new(
                            stringify!($field),
                            stringify!($field_ty),
                            $crate::swagger_model!(@annotation $([$($field_attr)*])*),
                        ))
                    )*
            }
        }
    };
}
