mod definition;
mod enumeration;
mod fields;
mod load;
mod util;

use crate::schema::{Entity, Enumeration};

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The entity being expanded
    entity: &'a Entity,

    /// Path prefix for quill types
    quill: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let quill = &self.quill;
        let vis = &self.entity.vis;
        let ident = &self.entity.ident;
        let fields_struct_ident = &self.entity.fields_struct_ident;

        let definition = self.expand_definition();
        let field_values = self.expand_field_values();
        let load = self.expand_load();
        let fields_struct = self.expand_fields_struct();

        wrap_in_const(quote! {
            impl #quill::Entity for #ident {
                type Fields = #fields_struct_ident;

                #definition

                fn fields() -> #fields_struct_ident {
                    #fields_struct_ident { _private: () }
                }

                #field_values

                #load
            }

            impl #ident {
                #vis fn fields() -> #fields_struct_ident {
                    <Self as #quill::Entity>::fields()
                }
            }

            #fields_struct
        })
    }
}

pub(super) fn entity(entity: &Entity) -> TokenStream {
    Expand {
        entity,
        quill: quote!(_quill::codegen_support),
    }
    .expand()
}

pub(super) fn enumeration(enumeration: &Enumeration) -> TokenStream {
    wrap_in_const(enumeration::expand(
        enumeration,
        &quote!(_quill::codegen_support),
    ))
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use quill as _quill;
            #code
        };
    }
}
