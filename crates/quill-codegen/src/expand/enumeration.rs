use crate::schema::Enumeration;

use proc_macro2::TokenStream;
use quote::quote;

/// `Primitive` and `IntoExpr` for a fieldless enum. Values are stored by
/// variant name and load from a name (ignoring case) or a variant index.
pub(super) fn expand(enumeration: &Enumeration, quill: &TokenStream) -> TokenStream {
    let ident = &enumeration.ident;
    let name = &enumeration.name;

    let variant_names = enumeration.variants.iter().map(|variant| &variant.name);

    let arms = enumeration.variants.iter().enumerate().map(|(index, variant)| {
        let variant_ident = &variant.ident;
        let variant_name = &variant.name;
        quote!(#ident::#variant_ident => #quill::ValueEnum::new(#index, #variant_name),)
    });

    // Unit variants match by value and by reference alike
    let to_value = quote! {
        #quill::Value::Enum(match self {
            #( #arms )*
        })
    };

    let from_index = enumeration.variants.iter().enumerate().map(|(index, variant)| {
        let variant_ident = &variant.ident;
        quote!(#index => ::std::result::Result::Ok(#ident::#variant_ident),)
    });

    quote! {
        impl #quill::Primitive for #ident {
            fn ty() -> #quill::Type {
                #quill::Type::Enum(#quill::TypeEnum::new(#name, [ #( #variant_names ),* ]))
            }

            fn load(value: #quill::Value) -> #quill::Result<Self> {
                let #quill::Value::Enum(value) = <Self as #quill::Primitive>::ty().cast(value)? else {
                    return ::std::result::Result::Err(#quill::Error::from_args(
                        ::std::format_args!("expected a variant of {}", #name)
                    ));
                };

                match value.variant {
                    #( #from_index )*
                    _ => ::std::result::Result::Err(#quill::Error::from_args(
                        ::std::format_args!("{} has no variant {}", #name, value.variant)
                    )),
                }
            }

            fn into_value(self) -> #quill::Value {
                #to_value
            }
        }

        impl #quill::IntoExpr<#ident> for #ident {
            fn into_expr(self) -> #quill::Expr<#ident> {
                #quill::Expr::from_untyped(#to_value)
            }

            fn by_ref(&self) -> #quill::Expr<#ident> {
                #quill::Expr::from_untyped(#to_value)
            }
        }
    }
}
