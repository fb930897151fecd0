extern crate proc_macro;

use proc_macro::TokenStream;

/// Maps a struct with named fields onto a table.
///
/// Struct attribute: `#[table = "name"]`. Field attributes: `#[key]`,
/// `#[auto]`, `#[column("name")]`, `#[read_only]` and `#[skip]`. Mapped
/// field types must implement `Primitive`, `Clone` and `Default`.
#[proc_macro_derive(Entity, attributes(key, auto, column, read_only, skip, table))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    match quill_codegen::generate_entity(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Stores a fieldless enum by variant name. `#[column("name")]` on a variant
/// overrides the stored name.
#[proc_macro_derive(Enum, attributes(column))]
pub fn derive_enum(input: TokenStream) -> TokenStream {
    match quill_codegen::generate_enum(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
