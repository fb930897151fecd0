use super::{Column, ErrorSet};

#[derive(Debug)]
pub(crate) struct Member {
    /// Index of the member among the entity's mapped members
    pub(crate) index: usize,

    /// The struct field
    pub(crate) ident: syn::Ident,

    /// Member name, the field name as written
    pub(crate) name: String,

    pub(crate) ty: syn::Type,

    pub(crate) attrs: MemberAttr,
}

#[derive(Debug, Default)]
pub(crate) struct MemberAttr {
    /// `#[key]`
    pub(crate) key: bool,

    /// `#[auto]`
    pub(crate) auto: bool,

    /// `#[read_only]`
    pub(crate) read_only: bool,

    /// `#[skip]`
    pub(crate) skip: bool,

    /// `#[column("name")]`
    pub(crate) column: Option<Column>,
}

impl MemberAttr {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let mut errs = ErrorSet::new();
        let mut attrs = Self::default();

        for attr in &field.attrs {
            let flag = if attr.path().is_ident("key") {
                &mut attrs.key
            } else if attr.path().is_ident("auto") {
                &mut attrs.auto
            } else if attr.path().is_ident("read_only") {
                &mut attrs.read_only
            } else if attr.path().is_ident("skip") {
                &mut attrs.skip
            } else if attr.path().is_ident("column") {
                if attrs.column.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[column] attribute"));
                } else {
                    match Column::from_ast(attr) {
                        Ok(column) => attrs.column = Some(column),
                        Err(err) => errs.push(err),
                    }
                }
                continue;
            } else {
                continue;
            };

            if let Err(err) = attr.meta.require_path_only() {
                errs.push(err);
            } else if *flag {
                let name = attr.path().get_ident().map(ToString::to_string).unwrap_or_default();
                errs.push(syn::Error::new_spanned(attr, format!("duplicate #[{name}] attribute")));
            } else {
                *flag = true;
            }
        }

        if attrs.skip && (attrs.key || attrs.auto || attrs.read_only || attrs.column.is_some()) {
            errs.push(syn::Error::new_spanned(
                field,
                "#[skip] fields cannot carry other mapping attributes",
            ));
        }

        match errs.collect() {
            Some(err) => Err(err),
            None => Ok(attrs),
        }
    }
}
