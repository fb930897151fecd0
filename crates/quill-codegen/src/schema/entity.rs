use super::{EntityAttr, ErrorSet, Member, MemberAttr};

#[derive(Debug)]
pub(crate) struct Entity {
    /// Entity visibility
    pub(crate) vis: syn::Visibility,

    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Entity name, the type name as written
    pub(crate) name: String,

    pub(crate) attr: EntityAttr,

    /// Mapped members, in declaration order
    pub(crate) members: Vec<Member>,

    /// Fields marked `#[skip]`, initialized with their default on load
    pub(crate) skipped: Vec<syn::Ident>,

    /// `{Entity}Fields`
    pub(crate) fields_struct_ident: syn::Ident,
}

impl Entity {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "entity fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "entities cannot be generic",
            ));
        }

        let mut errs = ErrorSet::new();
        let attr = match EntityAttr::from_ast(&ast.attrs) {
            Ok(attr) => attr,
            Err(err) => {
                errs.push(err);
                EntityAttr::default()
            }
        };

        let mut members = vec![];
        let mut skipped = vec![];

        for field in &node.named {
            let Some(ident) = &field.ident else {
                continue;
            };

            let attrs = match MemberAttr::from_ast(field) {
                Ok(attrs) => attrs,
                Err(err) => {
                    errs.push(err);
                    continue;
                }
            };

            if attrs.skip {
                skipped.push(ident.clone());
                continue;
            }

            members.push(Member {
                index: members.len(),
                ident: ident.clone(),
                name: unraw(ident),
                ty: field.ty.clone(),
                attrs,
            });
        }

        if members.is_empty() {
            errs.push(syn::Error::new_spanned(
                &ast.ident,
                "entity has no mapped fields",
            ));
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            vis: ast.vis.clone(),
            ident: ast.ident.clone(),
            name: unraw(&ast.ident),
            attr,
            members,
            skipped,
            fields_struct_ident: quote::format_ident!("{}Fields", ast.ident),
        })
    }
}

/// The identifier without a `r#` prefix.
fn unraw(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(name) => name.to_string(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_members_and_skips() {
        let item: syn::ItemStruct = syn::parse_quote! {
            #[table = "people"]
            struct Person {
                #[key]
                #[auto]
                id: i64,

                #[column("FullName")]
                name: String,

                #[skip]
                cache: Vec<u8>,

                #[read_only]
                r#type: String,
            }
        };

        let entity = Entity::from_ast(&item).unwrap();
        assert_eq!(entity.name, "Person");
        assert_eq!(entity.attr.table.as_ref().unwrap().value(), "people");
        assert_eq!(entity.fields_struct_ident, "PersonFields");

        let names = entity.members.iter().map(|m| m.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["id", "name", "type"]);
        assert!(entity.members[0].attrs.key && entity.members[0].attrs.auto);
        assert_eq!(entity.members[1].attrs.column.as_ref().unwrap().name.value(), "FullName");
        assert!(entity.members[2].attrs.read_only);
        assert_eq!(entity.members[2].index, 2);
        assert_eq!(entity.skipped, ["cache"]);
    }

    #[test]
    fn rejects_tuple_structs_and_duplicates() {
        let item: syn::ItemStruct = syn::parse_quote!(struct Pair(i32, i32););
        assert!(Entity::from_ast(&item).is_err());

        let item: syn::ItemStruct = syn::parse_quote! {
            struct Person {
                #[key]
                #[key]
                id: i64,
            }
        };
        let err = Entity::from_ast(&item).unwrap_err();
        assert!(err.to_string().contains("duplicate #[key]"));
    }

    #[test]
    fn skip_excludes_other_attributes() {
        let item: syn::ItemStruct = syn::parse_quote! {
            struct Person {
                id: i64,
                #[skip]
                #[key]
                other: i64,
            }
        };
        assert!(Entity::from_ast(&item).is_err());
    }
}
