//! Source generation for Strata context types.
//!
//! A [`ContextGenerator`] turns a validated [`Model`] into the source of a
//! context module: one entity set per entity type plus the configuration
//! methods that declare keys and relationships. Dialects plug in through the
//! two required hooks on the trait.
mod sql_server;

#[cfg(test)]
mod tests;

use convert_case::{Case, Casing};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use std::collections::BTreeMap;
use strata_core::model::{EntityType, Model, PrimaryKey, Property};
use syn::{Ident, ext::IdentExt, parse::Parser};
use thiserror::Error as ThisError;

// re-exports
pub use sql_server::SqlServerContextGenerator;

/// Leading text of the generated comment header.
pub const CONNECTION_HEADER: &str = "Generated using Connection String: ";

/// Modules glob-imported at the top of every generated context module.
pub const DEFAULT_USES: [&str; 2] = ["strata::context", "strata::metadata"];

// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: [&str; 5] = ["_", "crate", "self", "Self", "super"];

///
/// CodegenError
///

#[derive(Debug, ThisError)]
pub enum CodegenError {
    #[error("{kind} name '{name}' is not a valid identifier")]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("no generated type name for entity '{0}'")]
    MissingTypeName(String),

    #[error("generated type name '{type_name}' is used by both '{first}' and '{second}'")]
    DuplicateTypeName {
        type_name: String,
        first: String,
        second: String,
    },
}

///
/// ScaffoldRequest
///
/// Everything one generation run needs: the model, the generated type name
/// of each entity, and the names of the output module and context type.
///

#[derive(Clone, Debug)]
pub struct ScaffoldRequest<'a> {
    model: &'a Model,
    type_names: BTreeMap<String, String>,
    module: String,
    context: String,
    connection_string: String,
}

impl<'a> ScaffoldRequest<'a> {
    #[must_use]
    pub fn new(
        model: &'a Model,
        module: impl Into<String>,
        context: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            model,
            type_names: BTreeMap::new(),
            module: module.into(),
            context: context.into(),
            connection_string: connection_string.into(),
        }
    }

    /// Map `entity` to the type name used for it in generated code.
    #[must_use]
    pub fn with_type_name(
        mut self,
        entity: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        self.type_names.insert(entity.into(), type_name.into());
        self
    }

    #[must_use]
    pub fn with_type_names<I, K, V>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.type_names
            .extend(names.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub const fn model(&self) -> &'a Model {
        self.model
    }

    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub fn module_ident(&self) -> Result<Ident, CodegenError> {
        parse_ident("module", &self.module)
    }

    pub fn context_ident(&self) -> Result<Ident, CodegenError> {
        parse_ident("context", &self.context)
    }

    /// Generated type identifier for the entity named `entity`.
    pub fn type_ident(&self, entity: &str) -> Result<Ident, CodegenError> {
        let name = self
            .type_names
            .get(entity)
            .ok_or_else(|| CodegenError::MissingTypeName(entity.to_string()))?;

        parse_ident("type", name)
    }
}

///
/// ContextGenerator
///
/// Every step of context generation is a provided method so a dialect can
/// override any of them; only key ordering and foreign-key configuration
/// have to be supplied.
///

pub trait ContextGenerator {
    /// Sort position of `property` when emitting the key lambda for `key`.
    fn primary_key_property_order(&self, key: &PrimaryKey, property: &Property) -> usize;

    /// Statements configuring the foreign keys of `entity`, placed inside
    /// the entity's configuration closure (where `entity` is in scope).
    fn generate_foreign_keys_configuration(
        &self,
        request: &ScaffoldRequest<'_>,
        entity: &EntityType,
    ) -> Result<TokenStream, CodegenError>;

    /// Full source text of the context module.
    fn generate(&self, request: &ScaffoldRequest<'_>) -> Result<String, CodegenError> {
        let module = request.module_ident()?;
        let uses = self.generate_uses();
        let properties = self.generate_properties(request)?;
        let methods = self.generate_methods(request)?;

        let tokens = quote! {
            pub mod #module {
                #uses
                #properties
                #methods
            }
        };

        let mut source = self.generate_comment_header(request);
        source.push_str(&tokens.to_string());
        source.push('\n');

        tracing::debug!(
            module = %module,
            entities = request.model().entity_types().len(),
            bytes = source.len(),
            "generated context source"
        );

        Ok(source)
    }

    /// One `//` line per line of the connection string, so line breaks in
    /// it cannot end the comment.
    fn generate_comment_header(&self, request: &ScaffoldRequest<'_>) -> String {
        let mut header = String::from("//\n");

        for (i, line) in request.connection_string().split(['\r', '\n']).enumerate() {
            let prefix = if i == 0 { CONNECTION_HEADER } else { "" };
            header.push_str(&format!("// {prefix}{line}\n"));
        }
        header.push_str("//\n\n");

        header
    }

    fn generate_uses(&self) -> TokenStream {
        let mut tokens = quote!();

        for path in DEFAULT_USES {
            let segments = path.split("::").map(|s| format_ident!("{s}"));
            tokens.extend(quote! {
                use #(#segments::)* *;
            });
        }

        tokens
    }

    /// The context struct, one entity set per entity type.
    fn generate_properties(
        &self,
        request: &ScaffoldRequest<'_>,
    ) -> Result<TokenStream, CodegenError> {
        let context = request.context_ident()?;
        let mut fields = quote!();

        for (_, ty) in self.ordered_entity_types(request)? {
            let field = field_ident(&ty.unraw().to_string())?;
            fields.extend(quote! {
                pub #field: EntitySet<#ty>,
            });
        }

        Ok(quote! {
            pub struct #context {
                #fields
            }
        })
    }

    fn generate_methods(
        &self,
        request: &ScaffoldRequest<'_>,
    ) -> Result<TokenStream, CodegenError> {
        let context = request.context_ident()?;
        let on_configuring = self.generate_on_configuring(request);
        let on_model_creating = self.generate_on_model_creating(request)?;

        Ok(quote! {
            impl Context for #context {
                #on_configuring
                #on_model_creating
            }
        })
    }

    fn generate_on_configuring(&self, request: &ScaffoldRequest<'_>) -> TokenStream {
        let connection_string = request.connection_string();

        quote! {
            fn on_configuring(&self, options: &mut ContextOptions) {
                options.use_sql_server(#connection_string);
            }
        }
    }

    fn generate_on_model_creating(
        &self,
        request: &ScaffoldRequest<'_>,
    ) -> Result<TokenStream, CodegenError> {
        let mut entities = quote!();

        for (entity, ty) in self.ordered_entity_types(request)? {
            let configuration = self.generate_entity_configuration(request, entity)?;
            entities.extend(quote! {
                model_builder.entity::<#ty>(|entity| {
                    #configuration
                });
            });
        }

        Ok(quote! {
            fn on_model_creating(&self, model_builder: &mut ModelBuilder) {
                #entities
            }
        })
    }

    fn generate_entity_configuration(
        &self,
        request: &ScaffoldRequest<'_>,
        entity: &EntityType,
    ) -> Result<TokenStream, CodegenError> {
        let mut tokens = quote!();

        if let Some(key) = entity.primary_key()
            && !key.properties().is_empty()
        {
            tokens.extend(self.generate_entity_key_configuration(key)?);
        }
        tokens.extend(self.generate_foreign_keys_configuration(request, entity)?);

        Ok(tokens)
    }

    fn generate_entity_key_configuration(
        &self,
        key: &PrimaryKey,
    ) -> Result<TokenStream, CodegenError> {
        let mut properties: Vec<&Property> =
            key.properties().iter().map(AsRef::as_ref).collect();
        properties.sort_by_key(|p| self.primary_key_property_order(key, p));

        let lambda = key_lambda(properties)?;

        Ok(quote! {
            entity.key(#lambda);
        })
    }

    /// Entity types paired with their generated type identifiers, ordered
    /// by generated type name.
    fn ordered_entity_types<'a>(
        &self,
        request: &ScaffoldRequest<'a>,
    ) -> Result<Vec<(&'a EntityType, Ident)>, CodegenError> {
        let mut ordered = request
            .model()
            .entity_types()
            .iter()
            .map(|entity| Ok((entity, request.type_ident(entity.name())?)))
            .collect::<Result<Vec<_>, CodegenError>>()?;

        ordered.sort_by_cached_key(|(_, ty)| ty.unraw().to_string());

        for pair in ordered.windows(2) {
            if pair[0].1 == pair[1].1 {
                return Err(CodegenError::DuplicateTypeName {
                    type_name: pair[0].1.to_string(),
                    first: pair[0].0.name().to_string(),
                    second: pair[1].0.name().to_string(),
                });
            }
        }

        Ok(ordered)
    }
}

/// Closure selecting `properties` from an entity value: `|e| e.id` for a
/// single property, `|e| (e.a, e.b)` otherwise.
pub fn key_lambda<'p>(
    properties: impl IntoIterator<Item = &'p Property>,
) -> Result<TokenStream, CodegenError> {
    let fields = properties
        .into_iter()
        .map(|p| field_ident(p.name()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match fields.as_slice() {
        [field] => quote!(|e| e.#field),
        fields => quote!(|e| (#(e.#fields),*)),
    })
}

/// Snake-case field identifier for a property or type name; keywords
/// come back raw (`r#type`).
pub fn field_ident(name: &str) -> Result<Ident, CodegenError> {
    parse_ident("field", &name.to_case(Case::Snake))
}

fn parse_ident(kind: &'static str, name: &str) -> Result<Ident, CodegenError> {
    if let Ok(ident) = syn::parse_str::<Ident>(name) {
        return Ok(ident);
    }

    // a lone keyword parses through `parse_any`; anything else is invalid
    match Ident::parse_any.parse_str(name) {
        Ok(_) if !NON_RAW_KEYWORDS.contains(&name) => Ok(Ident::new_raw(name, Span::call_site())),
        _ => Err(CodegenError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        }),
    }
}
