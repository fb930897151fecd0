mod expand;
mod schema;

use proc_macro2::TokenStream;

/// Expands `#[derive(Entity)]`.
pub fn generate_entity(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let entity = schema::Entity::from_ast(&item)?;

    Ok(expand::entity(&entity))
}

/// Expands `#[derive(Enum)]`.
pub fn generate_enum(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemEnum = syn::parse2(input)?;
    let enumeration = schema::Enumeration::from_ast(&item)?;

    Ok(expand::enumeration(&enumeration))
}
