extern crate proc_macro;
mod field_parser;
mod macro_utils;
mod record;

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;
use syn::{parse_macro_input, DeriveInput};

/// Derives `flatbit::Fields` for a struct with named fields.
///
/// Next to the impl it emits a `<Struct>Field` enum with one variant per field. Each variant
/// carries the symbolic lookup name of the field (lower camel case of the field ident unless
/// overridden), so callers can select a field either statically or by parsing its name:
///
/// ```ignore
/// #[derive(Fields)]
/// pub struct Patient {
///     id: u32,
///     #[field(name = "lastName")]
///     last_name: String,
///     #[field(skip)]
///     cached: String,
/// }
/// ```
#[proc_macro_derive(Fields, attributes(field))]
#[proc_macro_error]
pub fn derive_fields(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let struct_ident = &ast.ident;

    #[allow(clippy::useless_conversion)]
    let stream: proc_macro2::TokenStream = match field_parser::get_field_defs(&ast) {
        Ok(field_defs) => record::expand(&ast, &field_defs),
        Err(e) => e.to_compile_error().into(),
    };
    macro_utils::submit_struct_to_stream(stream, "fields", struct_ident, "_derive.rs")
}
