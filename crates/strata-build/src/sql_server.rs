use crate::{CodegenError, ContextGenerator, ScaffoldRequest, key_lambda};
use proc_macro2::TokenStream;
use quote::quote;
use strata_core::model::{EntityType, PrimaryKey, Property};

///
/// SqlServerContextGenerator
///
/// SQL Server dialect. Key properties keep their key ordinal position and
/// every foreign key is emitted against its principal's generated type.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SqlServerContextGenerator;

impl ContextGenerator for SqlServerContextGenerator {
    fn primary_key_property_order(&self, key: &PrimaryKey, property: &Property) -> usize {
        key.ordinal_of(property).unwrap_or_else(|| property.index())
    }

    fn generate_foreign_keys_configuration(
        &self,
        request: &ScaffoldRequest<'_>,
        entity: &EntityType,
    ) -> Result<TokenStream, CodegenError> {
        let mut tokens = quote!();

        for fk in entity.foreign_keys() {
            let principal = request.type_ident(fk.principal_entity())?;
            let lambda = key_lambda(fk.properties().iter().map(AsRef::as_ref))?;

            tokens.extend(quote! {
                entity.foreign_key::<#principal>(#lambda);
            });
        }

        Ok(tokens)
    }
}
