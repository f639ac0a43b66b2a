use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Error, Field, Ident, LitInt, LitStr, Result, Type};

pub(crate) struct ParsedField {
    pub ident: Ident,
    pub name: String,
    pub ty: Type,
    pub is_key: bool,
    pub is_link: bool,
    pub skip: bool,
    wire_name: Option<LitStr>,
    full_text: Option<FullTextSpec>,
    vector: Option<VectorSpec>,
}

struct FullTextSpec {
    language: Option<LitStr>,
}

struct VectorSpec {
    dimensions: u32,
    distance: Ident,
    data_type: Ident,
}

impl ParsedField {
    pub(crate) fn from_field(field: &Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "DocumentEntity requires named fields"))?;
        let name = ident.to_string();

        let mut parsed = Self {
            ident,
            name,
            ty: field.ty.clone(),
            is_key: false,
            is_link: false,
            skip: false,
            wire_name: None,
            full_text: None,
            vector: None,
        };

        for attr in &field.attrs {
            if attr.path().is_ident("docfacet") {
                parsed.parse_field_attr(attr)?;
            }
        }

        if parsed.skip && (parsed.is_key || parsed.is_link || parsed.has_facets()) {
            return Err(Error::new(
                parsed.ident.span(),
                "#[docfacet(skip)] cannot be combined with other docfacet attributes",
            ));
        }

        Ok(parsed)
    }

    fn has_facets(&self) -> bool {
        self.wire_name.is_some() || self.full_text.is_some() || self.vector.is_some()
    }

    fn parse_field_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                set_flag(&meta, &mut self.is_key, "key")
            } else if meta.path.is_ident("link") {
                set_flag(&meta, &mut self.is_link, "link")
            } else if meta.path.is_ident("skip") {
                set_flag(&meta, &mut self.skip, "skip")
            } else if meta.path.is_ident("name") {
                if self.wire_name.is_some() {
                    return Err(meta.error("external name already set"));
                }
                self.wire_name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("full_text") {
                if self.full_text.is_some() {
                    return Err(meta.error("full_text already set"));
                }
                let mut language = None;
                if meta.input.peek(syn::token::Paren) {
                    meta.parse_nested_meta(|item| {
                        if item.path.is_ident("language") {
                            language = Some(item.value()?.parse::<LitStr>()?);
                            Ok(())
                        } else {
                            Err(item.error("expected `language = \"...\"`"))
                        }
                    })?;
                }
                self.full_text = Some(FullTextSpec { language });
                Ok(())
            } else if meta.path.is_ident("vector") {
                if self.vector.is_some() {
                    return Err(meta.error("vector already set"));
                }
                self.vector = Some(parse_vector(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unsupported docfacet field attribute"))
            }
        })
    }

    /// Statements applying declared facets to the field bound to `var`.
    pub(crate) fn facet_tokens(&self, var: &Ident) -> TokenStream2 {
        let source = quote! { ::docfacet::ConfigurationSource::DataAnnotation };
        let mut statements = Vec::new();

        if let Some(name) = &self.wire_name {
            statements.push(quote! {
                let _ = model.facets_mut(#var).set_external_name(::core::option::Option::Some(#name), #source);
            });
        }
        if let Some(full_text) = &self.full_text {
            statements.push(quote! {
                let _ = model
                    .facets_mut(#var)
                    .set_full_text_search_enabled(::core::option::Option::Some(true), #source);
            });
            if let Some(language) = &full_text.language {
                statements.push(quote! {
                    let _ = model
                        .facets_mut(#var)
                        .set_full_text_search_language(::core::option::Option::Some(#language), #source);
                });
            }
        }
        if let Some(vector) = &self.vector {
            let dimensions = vector.dimensions;
            let distance = &vector.distance;
            let data_type = &vector.data_type;
            statements.push(quote! {
                let __docfacet_vector = ::docfacet::VectorDescriptor::new(
                    #dimensions,
                    ::docfacet::DistanceFunction::#distance,
                    ::docfacet::VectorDataType::#data_type,
                )?;
                let _ = model
                    .facets_mut(#var)
                    .set_vector(::core::option::Option::Some(__docfacet_vector), #source);
            });
        }

        quote! { #(#statements)* }
    }
}

fn set_flag(meta: &ParseNestedMeta, flag: &mut bool, name: &str) -> Result<()> {
    if *flag {
        return Err(meta.error(format!("`{name}` specified more than once")));
    }
    *flag = true;
    Ok(())
}

fn parse_vector(meta: &ParseNestedMeta) -> Result<VectorSpec> {
    let mut dimensions: Option<u32> = None;
    let mut distance = Ident::new("Cosine", Span::call_site());
    let mut data_type = Ident::new("Float32", Span::call_site());

    meta.parse_nested_meta(|item| {
        if item.path.is_ident("dimensions") {
            let value: LitInt = item.value()?.parse()?;
            let parsed: u32 = value.base10_parse()?;
            if parsed == 0 {
                return Err(Error::new(value.span(), "vector dimensions must be greater than zero"));
            }
            dimensions = Some(parsed);
        } else if item.path.is_ident("distance") {
            let value: LitStr = item.value()?.parse()?;
            let variant = match value.value().as_str() {
                "cosine" => "Cosine",
                "dot_product" => "DotProduct",
                "euclidean" => "Euclidean",
                other => {
                    return Err(Error::new(
                        value.span(),
                        format!("unknown distance function `{other}`; expected cosine, dot_product or euclidean"),
                    ));
                }
            };
            distance = Ident::new(variant, value.span());
        } else if item.path.is_ident("data_type") {
            let value: LitStr = item.value()?.parse()?;
            let variant = match value.value().as_str() {
                "float32" => "Float32",
                "float16" => "Float16",
                "int8" => "Int8",
                "uint8" => "UInt8",
                other => {
                    return Err(Error::new(
                        value.span(),
                        format!("unknown vector data type `{other}`; expected float32, float16, int8 or uint8"),
                    ));
                }
            };
            data_type = Ident::new(variant, value.span());
        } else {
            return Err(item.error("expected `dimensions`, `distance` or `data_type`"));
        }
        Ok(())
    })?;

    let dimensions = dimensions.ok_or_else(|| meta.error("vector(...) requires `dimensions = N`"))?;
    Ok(VectorSpec {
        dimensions,
        distance,
        data_type,
    })
}
