use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_load(&self) -> TokenStream {
        let quill = &self.quill;
        let entity_name = &self.entity.name;
        let values = util::ident("values");

        let members = self.entity.members.iter().map(|member| {
            let ident = &member.ident;
            let name = &member.name;

            quote! {
                #ident: #quill::load_member(
                    #entity_name,
                    #name,
                    #values.next().flatten(),
                )?,
            }
        });

        let skipped = self.entity.skipped.iter().map(|ident| {
            quote!(#ident: #quill::Default::default(),)
        });

        quote! {
            fn load(#values: #quill::Vec<#quill::Option<#quill::Value>>) -> #quill::Result<Self> {
                let mut #values = #values.into_iter();

                Ok(Self {
                    #( #members )*
                    #( #skipped )*
                })
            }
        }
    }
}
