use super::ErrorSet;

/// A fieldless enum stored by variant name.
#[derive(Debug)]
pub(crate) struct Enumeration {
    pub(crate) ident: syn::Ident,
    pub(crate) name: String,
    pub(crate) variants: Vec<Variant>,
}

#[derive(Debug)]
pub(crate) struct Variant {
    pub(crate) ident: syn::Ident,

    /// Stored name: `#[column("..")]` on the variant, else the variant name
    pub(crate) name: String,
}

impl Enumeration {
    pub(crate) fn from_ast(ast: &syn::ItemEnum) -> syn::Result<Self> {
        let mut errs = ErrorSet::new();

        if !ast.generics.params.is_empty() {
            errs.push(syn::Error::new_spanned(&ast.generics, "enums cannot be generic"));
        }

        if ast.variants.is_empty() {
            errs.push(syn::Error::new_spanned(&ast.ident, "enum has no variants"));
        }

        let mut variants: Vec<Variant> = vec![];

        for variant in &ast.variants {
            if !matches!(variant.fields, syn::Fields::Unit) {
                errs.push(syn::Error::new_spanned(
                    variant,
                    "only fieldless variants are supported",
                ));
                continue;
            }

            let mut name = variant.ident.to_string();

            for attr in &variant.attrs {
                if attr.path().is_ident("column") {
                    match attr.parse_args::<syn::LitStr>() {
                        Ok(lit) => name = lit.value(),
                        Err(err) => errs.push(err),
                    }
                }
            }

            if variants.iter().any(|v| v.name.eq_ignore_ascii_case(&name)) {
                errs.push(syn::Error::new_spanned(
                    variant,
                    format!("variant name `{name}` is not unique ignoring case"),
                ));
                continue;
            }

            variants.push(Variant {
                ident: variant.ident.clone(),
                name,
            });
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            ident: ast.ident.clone(),
            name: ast.ident.to_string(),
            variants,
        })
    }
}
