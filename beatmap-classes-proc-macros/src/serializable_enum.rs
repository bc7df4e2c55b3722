use syn::*;
use quote::*;
use syn::spanned::Spanned;
use proc_macro::TokenStream;
use std::collections::HashMap;

use crate::SERIALIZE_ATTRIBUTE;

const TYPE_ATTRIBUTE: &str = "type";
const ID_ATTRIBUTE: &str = "id";
const GEN_TO_FROM_ATTRIBUTE: &str = "gen_to_from";
const DEFAULT_VARIANT_ATTRIBUTE: &str = "default_variant";


pub fn derive(ast: DeriveInput) -> TokenStream {
    let enum_name = &ast.ident;
    let enum_name_str = enum_name.to_string();

    let Data::Enum(data) = &ast.data else {
        return Error::new(ast.span(), "SerializableEnum can only be derived for enums")
            .into_compile_error()
            .into();
    };

    let mut type_ = format_ident!("u8");
    let mut should_impl_into_from_type = false;

    // find the id type, and if we should gen the conversions
    for a in ast.attrs.iter() {
        if !a.path().is_ident(SERIALIZE_ATTRIBUTE) { continue }

        if let Err(e) = a.parse_nested_meta(|meta| {
            if meta.path.is_ident(TYPE_ATTRIBUTE) {
                let value: LitStr = meta.value()?.parse()?;
                type_ = format_ident!("{}", value.value());
            } else if meta.path.is_ident(GEN_TO_FROM_ATTRIBUTE) {
                should_impl_into_from_type = true;
            } else {
                return Err(meta.error("invalid attribute"));
            }

            Ok(())
        }) {
            return e.into_compile_error().into();
        }
    }

    let mut id_map: HashMap<u16, &Ident> = HashMap::new();
    let mut default_variant: Option<&Ident> = None;

    let mut variants = Vec::new();
    let mut ids = Vec::new();

    for v in data.variants.iter() {
        let variant_name = &v.ident;
        let mut id: Option<u16> = None;
        let mut is_default = false;

        if !v.fields.is_empty() {
            return Error::new(
                v.span(),
                format!("Variant {variant_name} has fields, only fieldless variants are supported")
            ).into_compile_error().into();
        }

        // find the id of the variant
        for a in v.attrs.iter() {
            if !a.path().is_ident(SERIALIZE_ATTRIBUTE) { continue }

            if let Err(e) = a.parse_nested_meta(|meta| {
                if meta.path.is_ident(ID_ATTRIBUTE) {
                    let value: LitInt = meta.value()?.parse()?;
                    id = Some(value.base10_parse()?);
                } else if meta.path.is_ident(DEFAULT_VARIANT_ATTRIBUTE) {
                    is_default = true;
                } else {
                    return Err(meta.error("invalid attribute"));
                }

                Ok(())
            }) {
                return e.into_compile_error().into();
            }
        }

        // ensure this variant has an id
        let Some(id) = id else {
            return Error::new(
                v.span(),
                format!("Variant has no id!! {variant_name}")
            ).into_compile_error().into();
        };

        // ensure the id is free
        if let Some(variant) = id_map.insert(id, variant_name) {
            return Error::new(
                v.span(),
                format!("Id {id} already used by variant {variant}")
            ).into_compile_error().into();
        }

        if is_default {
            if let Some(existing) = default_variant {
                return Error::new(
                    v.span(),
                    format!("{existing} is already the default variant")
                ).into_compile_error().into();
            }
            default_variant = Some(variant_name);
        }

        variants.push(variant_name);
        ids.push(id);
    }

    // make sure there's something to read
    if variants.is_empty() {
        return Error::new(ast.span(), "Enum has no variants?")
            .into_compile_error()
            .into();
    }

    let unknown_arm = match default_variant {
        Some(variant) => quote! { _ => Ok(Self::#variant), },
        None => quote! {
            _ => Err(::beatmap_classes::serialization::SerializationErrorEnum::UnknownVariant {
                type_name: #enum_name_str,
                id,
            }.into()),
        },
    };

    let mut tokens = quote! {
        impl ::beatmap_classes::serialization::Serializable for #enum_name {
            fn read(sr: &mut ::beatmap_classes::serialization::SerializationReader) -> ::beatmap_classes::serialization::SerializationResult<Self> {
                let id = sr.read::<#type_>("id")? as u16;

                match id {
                    #( #ids => Ok(Self::#variants), )*
                    #unknown_arm
                }
            }

            fn write(&self, sw: &mut ::beatmap_classes::serialization::SerializationWriter) {
                let id: u16 = match self {
                    #( Self::#variants => #ids, )*
                };
                sw.write(&(id as #type_));
            }
        }
    };

    if should_impl_into_from_type {
        let Some(default_variant) = default_variant else {
            return Error::new(ast.span(), "gen_to_from needs a default_variant for unknown values")
                .into_compile_error()
                .into();
        };

        tokens.extend(quote! {
            impl From<#enum_name> for #type_ {
                fn from(value: #enum_name) -> Self {
                    match value {
                        #( #enum_name::#variants => #ids as #type_, )*
                    }
                }
            }

            impl From<#type_> for #enum_name {
                fn from(value: #type_) -> Self {
                    match value as u16 {
                        #( #ids => #enum_name::#variants, )*
                        _ => #enum_name::#default_variant,
                    }
                }
            }
        });
    }

    #[cfg(feature = "serialization_logging")]
    eprintln!("[SerializableEnum] generated for {enum_name}: {tokens}");

    tokens.into()
}
