use crate::field_parser::FieldDef;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

pub fn expand(ast: &DeriveInput, field_defs: &[FieldDef]) -> TokenStream {
    let struct_ident = &ast.ident;
    let vis = &ast.vis;
    let enum_ident = format_ident!("{}Field", struct_ident);

    let variants: Vec<_> = field_defs.iter().map(|f| &f.variant).collect();
    let lookup_names: Vec<_> = field_defs.iter().map(|f| f.lookup_name.as_str()).collect();
    let field_names: Vec<_> = field_defs.iter().map(|f| &f.name).collect();
    let field_types: Vec<_> = field_defs.iter().map(|f| &f.tpe).collect();
    let enum_doc = format!("Selectable fields of [`{}`].", struct_ident);

    quote! {
        #[doc = #enum_doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #vis enum #enum_ident {
            #(#variants),*
        }

        impl #enum_ident {
            pub const ALL: &'static [#enum_ident] = &[#(#enum_ident::#variants),*];

            pub fn name(&self) -> &'static str {
                match self {
                    #(#enum_ident::#variants => #lookup_names),*
                }
            }
        }

        impl ::std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for #enum_ident {
            type Err = ::flatbit::UnknownField;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    #(#lookup_names => Ok(#enum_ident::#variants),)*
                    other => Err(::flatbit::UnknownField(other.to_string())),
                }
            }
        }

        impl ::flatbit::Fields for #struct_ident {
            type Field = #enum_ident;

            fn field_value(&self, field: #enum_ident) -> ::flatbit::FieldValue {
                match field {
                    #(#enum_ident::#variants => <#field_types as ::flatbit::ToFieldValue>::to_field_value(&self.#field_names)),*
                }
            }
        }
    }
}
