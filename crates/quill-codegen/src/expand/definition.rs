use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_definition(&self) -> TokenStream {
        let quill = &self.quill;
        let name = &self.entity.name;
        let def = util::ident("def");

        let table = self.entity.attr.table.as_ref().map(|table| {
            quote!(#def = #def.table(#table);)
        });

        let members = self.entity.members.iter().map(|member| {
            let member_name = &member.name;
            let ty = &member.ty;
            let key = member.attrs.key;
            let auto = member.attrs.auto;
            let read_only = member.attrs.read_only;
            let column = match &member.attrs.column {
                Some(column) => {
                    let name = &column.name;
                    quote!(#quill::Option::Some(#name.into()))
                }
                None => quote!(#quill::Option::None),
            };

            quote! {
                #def.members.push(#quill::MemberDef {
                    name: #member_name.into(),
                    ty: <#ty as #quill::Primitive>::ty(),
                    nullable: <#ty as #quill::Primitive>::nullable(),
                    column: #column,
                    key: #key,
                    auto: #auto,
                    read_only: #read_only,
                });
            }
        });

        quote! {
            fn definition() -> #quill::EntityDef {
                let mut #def = #quill::EntityDef::new(#name);
                #table
                #( #members )*
                #def
            }
        }
    }

    pub(super) fn expand_field_values(&self) -> TokenStream {
        let quill = &self.quill;

        let values = self.entity.members.iter().map(|member| {
            let ident = &member.ident;
            let ty = &member.ty;

            quote! {
                <#ty as #quill::Primitive>::into_value(
                    ::std::clone::Clone::clone(&self.#ident)
                )
            }
        });

        quote! {
            fn field_values(&self) -> #quill::Vec<#quill::Value> {
                ::std::vec![ #( #values ),* ]
            }
        }
    }
}
