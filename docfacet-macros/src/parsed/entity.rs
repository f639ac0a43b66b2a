use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Error, Fields, Generics, Ident, LitStr, Path, Result, Type};

use super::ParsedField;

pub(crate) struct ParsedEntity {
    ident: Ident,
    generics: Generics,
    name: String,
    owned_by: Option<Path>,
    unique: bool,
    document_root: bool,
    shadows: Vec<ShadowSpec>,
    fields: Vec<ParsedField>,
}

/// A field that exists only in the mapping, declared with `shadow(...)`.
struct ShadowSpec {
    name: LitStr,
    ty: Type,
    is_key: bool,
}

impl ParsedEntity {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut parsed = Self {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            name: input.ident.to_string(),
            owned_by: None,
            unique: false,
            document_root: false,
            shadows: Vec::new(),
            fields: Vec::new(),
        };

        for attr in &input.attrs {
            if attr.path().is_ident("docfacet") {
                parsed.parse_container_attr(attr)?;
            }
        }

        parsed.fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .map(ParsedField::from_field)
                    .collect::<Result<Vec<_>>>()?,
                _ => return Err(Error::new(input.ident.span(), "DocumentEntity requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "DocumentEntity can only be derived for structs")),
        };

        parsed.validate()?;
        Ok(parsed)
    }

    fn parse_container_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                self.name = value.value();
            } else if meta.path.is_ident("owned_by") {
                let path: Path = meta.value()?.parse()?;
                if path.is_ident("Self") || path.is_ident(&self.ident) {
                    return Err(meta.error("an entity cannot be owned by itself"));
                }
                self.owned_by = Some(path);
            } else if meta.path.is_ident("unique") {
                self.unique = true;
            } else if meta.path.is_ident("document_root") {
                self.document_root = true;
            } else if meta.path.is_ident("shadow") {
                let mut name = None;
                let mut ty = None;
                let mut is_key = false;
                meta.parse_nested_meta(|item| {
                    if item.path.is_ident("name") {
                        name = Some(item.value()?.parse::<LitStr>()?);
                    } else if item.path.is_ident("ty") {
                        ty = Some(item.value()?.parse::<Type>()?);
                    } else if item.path.is_ident("key") {
                        is_key = true;
                    } else {
                        return Err(item.error("expected `name`, `ty` or `key`"));
                    }
                    Ok(())
                })?;
                let name = name.ok_or_else(|| meta.error("shadow(...) requires `name = \"...\"`"))?;
                let ty = ty.ok_or_else(|| meta.error("shadow(...) requires `ty = <type>`"))?;
                self.shadows.push(ShadowSpec { name, ty, is_key });
            } else {
                return Err(meta.error("unsupported docfacet container attribute"));
            }
            Ok(())
        })
    }

    fn validate(&self) -> Result<()> {
        let has_link = self.fields.iter().any(|field| field.is_link);
        if self.owned_by.is_none() {
            if let Some(field) = self.fields.iter().find(|field| field.is_link) {
                return Err(Error::new(
                    field.ident.span(),
                    "#[docfacet(link)] requires #[docfacet(owned_by = ...)] on the struct",
                ));
            }
            if self.unique {
                return Err(Error::new(
                    self.ident.span(),
                    "#[docfacet(unique)] requires #[docfacet(owned_by = ...)]",
                ));
            }
        } else if !has_link {
            return Err(Error::new(
                self.ident.span(),
                "owned entities need at least one field marked #[docfacet(link)]",
            ));
        }

        for shadow in &self.shadows {
            let clash = self.fields.iter().any(|field| !field.skip && field.name == shadow.name.value());
            let repeated = self
                .shadows
                .iter()
                .filter(|other| other.name.value() == shadow.name.value())
                .count()
                > 1;
            if clash || repeated {
                return Err(Error::new(
                    shadow.name.span(),
                    format!("field `{}` is declared more than once", shadow.name.value()),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let ident = &self.ident;
        let name = LitStr::new(&self.name, ident.span());
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let mut statements = Vec::new();
        let mut key_vars = Vec::new();
        let mut link_vars = Vec::new();

        for (index, field) in self.fields.iter().filter(|field| !field.skip).enumerate() {
            let var = format_ident!("__docfacet_field_{}", index);
            let field_name = LitStr::new(&field.name, field.ident.span());
            let ty = &field.ty;
            statements.push(quote! {
                let #var = model.add_field(
                    __docfacet_entity,
                    #field_name,
                    <#ty as ::docfacet::ValueTyped>::VALUE_TYPE,
                )?;
            });
            statements.push(field.facet_tokens(&var));
            if field.is_key {
                key_vars.push(var.clone());
            }
            if field.is_link {
                link_vars.push(var);
            }
        }

        for (index, shadow) in self.shadows.iter().enumerate() {
            let var = format_ident!("__docfacet_shadow_{}", index);
            let shadow_name = &shadow.name;
            let ty = &shadow.ty;
            statements.push(quote! {
                let #var = model.add_shadow_field(
                    __docfacet_entity,
                    #shadow_name,
                    <#ty as ::docfacet::ValueTyped>::VALUE_TYPE,
                )?;
            });
            if shadow.is_key {
                key_vars.push(var);
            }
        }

        if !key_vars.is_empty() {
            statements.push(quote! {
                model.set_primary_key(__docfacet_entity, &[#(#key_vars),*])?;
            });
        }

        // Emitted after `add_entity`: an ownership cycle then finds this entity
        // already registered and fails in `set_ownership`.
        let owner = self.owned_by.as_ref().map(|path| {
            quote! {
                let __docfacet_owner = model.register::<#path>()?;
            }
        });
        if self.owned_by.is_some() {
            let unique = self.unique;
            statements.push(quote! {
                model.set_ownership(__docfacet_entity, __docfacet_owner, &[#(#link_vars),*], #unique)?;
            });
        }
        if self.document_root {
            statements.push(quote! {
                model.set_document_root(__docfacet_entity, true)?;
            });
        }

        quote! {
            impl #impl_generics ::docfacet::DocumentEntity for #ident #ty_generics #where_clause {
                const NAME: &'static str = #name;

                fn describe(
                    model: &mut ::docfacet::Model,
                ) -> ::core::result::Result<::docfacet::EntityId, ::docfacet::ModelError> {
                    let __docfacet_entity = model.add_entity(<Self as ::docfacet::DocumentEntity>::NAME)?;
                    #owner
                    #(#statements)*
                    ::core::result::Result::Ok(__docfacet_entity)
                }
            }
        }
    }
}
