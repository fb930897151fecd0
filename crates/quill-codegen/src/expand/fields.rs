use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// `{Entity}Fields`: one method per member returning its typed path.
    pub(super) fn expand_fields_struct(&self) -> TokenStream {
        let quill = &self.quill;
        let vis = &self.entity.vis;
        let fields_struct_ident = &self.entity.fields_struct_ident;

        let methods = self.entity.members.iter().map(|member| {
            let ident = &member.ident;
            let name = &member.name;
            let ty = &member.ty;

            quote! {
                #vis fn #ident(&self) -> #quill::Path<#ty> {
                    #quill::Path::new(#name)
                }
            }
        });

        quote! {
            #vis struct #fields_struct_ident {
                _private: (),
            }

            impl #fields_struct_ident {
                #( #methods )*
            }
        }
    }
}
