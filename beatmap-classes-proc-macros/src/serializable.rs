use syn::*;
use quote::*;
use syn::spanned::Spanned;
use proc_macro::TokenStream;

use crate::SERIALIZE_ATTRIBUTE;

const VERSION_ATTRIBUTE: &str = "version";
const SKIP_ATTRIBUTE: &str = "skip";


pub fn derive(ast: DeriveInput) -> TokenStream {
    let struct_name = &ast.ident;
    let struct_name_str = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let Data::Struct(data) = &ast.data else {
        return Error::new(
            ast.span(),
            "Serializable can only be derived for structs, use SerializableEnum for enums"
        ).into_compile_error().into();
    };

    // check if this struct has a version attached
    let mut current_version: Option<u16> = None;
    for attr in ast.attrs.iter() {
        if !attr.path().is_ident(SERIALIZE_ATTRIBUTE) { continue }

        if let Err(e) = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(VERSION_ATTRIBUTE) {
                let value: LitInt = meta.value()?.parse()?;
                current_version = Some(value.base10_parse()?);
            } else {
                return Err(meta.error("invalid attribute"));
            }

            Ok(())
        }) {
            return e.into_compile_error().into()
        }
    }

    let mut read_fields = Vec::new();
    let mut write_fields = Vec::new();

    for field in data.fields.iter() {
        let Some(name) = field.ident.as_ref() else {
            return Error::new(field.span(), "tuple structs are not supported")
                .into_compile_error()
                .into();
        };

        let mut skip = false;
        let mut version: u16 = 0;

        // check for skip/version tags
        for a in field.attrs.iter() {
            if !a.path().is_ident(SERIALIZE_ATTRIBUTE) { continue }

            if let Err(e) = a.parse_nested_meta(|meta| {
                if meta.path.is_ident(SKIP_ATTRIBUTE) {
                    skip = true;
                } else if meta.path.is_ident(VERSION_ATTRIBUTE) {
                    let value: LitInt = meta.value()?.parse()?;
                    version = value.base10_parse()?;
                } else {
                    return Err(meta.error("invalid attribute"));
                }

                Ok(())
            }) {
                return e.into_compile_error().into();
            }
        }
        if skip { continue }

        let name_str = name.to_string();
        if version == 0 {
            read_fields.push(quote! {
                s.#name = sr.read(#name_str)?;
            });
        } else {
            read_fields.push(quote! {
                if version >= #version {
                    s.#name = sr.read(#name_str)?;
                }
            });
        }

        write_fields.push(quote! {
            sw.write(&self.#name);
        });
    }

    let (read_version_line, write_version_line) = match current_version {
        Some(v) => (
            quote! { let version = sr.read_version(#struct_name_str, #v)?; },
            quote! { sw.write_version(#v); },
        ),
        None => (
            quote! { let version = 0u16; },
            proc_macro2::TokenStream::new(),
        ),
    };

    let tokens = quote! {
        impl #impl_generics ::beatmap_classes::serialization::Serializable for #struct_name #ty_generics #where_clause {
            fn read(sr: &mut ::beatmap_classes::serialization::SerializationReader) -> ::beatmap_classes::serialization::SerializationResult<Self> where Self: Sized {
                sr.push_parent(#struct_name_str);
                let mut s = Self::default();
                #[allow(unused_variables)]
                #read_version_line

                #( #read_fields )*

                sr.pop_parent();
                Ok(s)
            }

            fn write(&self, sw: &mut ::beatmap_classes::serialization::SerializationWriter) {
                #write_version_line
                #( #write_fields )*
            }
        }
    };

    #[cfg(feature = "serialization_logging")]
    eprintln!("[Serializable] generated for {struct_name}: {tokens}");

    tokens.into()
}
