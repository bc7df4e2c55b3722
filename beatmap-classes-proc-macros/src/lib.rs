mod serializable;
mod serializable_enum;

use proc_macro::TokenStream;

/// helper attribute shared by both derives
pub(crate) const SERIALIZE_ATTRIBUTE: &str = "serialize";

/// binary read/write for structs with named fields.
///
/// the struct must implement `Default`, fields which aren't read are left at their default.
///
/// struct attributes:
/// - `#[serialize(version = N)]` writes `N` as a version header, reading refuses anything newer
///
/// field attributes:
/// - `#[serialize(skip)]` never written, left at its default when read
/// - `#[serialize(version = N)]` only read when the header version is at least `N`
#[proc_macro_derive(Serializable, attributes(serialize))]
pub fn serializable(input: TokenStream) -> TokenStream {
    let ast = match syn::parse::<syn::DeriveInput>(input) {
        Ok(ast) => ast,
        Err(e) => return e.into_compile_error().into(),
    };

    serializable::derive(ast)
}

/// binary read/write for fieldless enums, written as a numeric id
///
/// enum attributes:
/// - `#[serialize(type = "u8")]` the integer type the id is written as (default `u8`)
/// - `#[serialize(gen_to_from)]` also generate `From` conversions to and from the id type (needs a default variant)
///
/// variant attributes:
/// - `#[serialize(id = N)]` required, must be unique
/// - `#[serialize(default_variant)]` returned for unknown ids instead of an error
#[proc_macro_derive(SerializableEnum, attributes(serialize))]
pub fn serializable_enum(input: TokenStream) -> TokenStream {
    let ast = match syn::parse::<syn::DeriveInput>(input) {
        Ok(ast) => ast,
        Err(e) => return e.into_compile_error().into(),
    };

    serializable_enum::derive(ast)
}
