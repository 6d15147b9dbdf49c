use crate::macro_utils;
use proc_macro2::Ident;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::Comma;
use syn::{Data, DeriveInput, Fields, LitStr, Type};

#[derive(Clone)]
pub struct FieldDef {
    pub name: Ident,
    pub tpe: Type,
    pub variant: Ident,
    pub lookup_name: String,
}

pub enum ParsingResult {
    Field(FieldDef),
    Skipped,
}

pub fn get_named_fields(ast: &DeriveInput) -> Result<Punctuated<syn::Field, Comma>, syn::Error> {
    match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields_named) => Ok(fields_named.named.clone()),
            _ => Err(syn::Error::new(ast.span(), "`#[derive(Fields)]` only supports structs with named fields.")),
        },
        _ => Err(syn::Error::new(ast.span(), "`#[derive(Fields)]` can only be applied to structs.")),
    }
}

fn parse_record_field(field: &syn::Field) -> Result<ParsingResult, syn::Error> {
    let field_name = field.ident.clone().ok_or_else(|| syn::Error::new(field.span(), "Unnamed fields not supported"))?;
    let mut lookup_name = macro_utils::to_camel_case(&field_name.to_string(), false);
    for attr in &field.attrs {
        if attr.path().is_ident("field") {
            let mut skip = false;
            attr.parse_nested_meta(|nested| {
                if nested.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if nested.path.is_ident("name") {
                    let lit: LitStr = nested.value()?.parse()?;
                    lookup_name = lit.value();
                    Ok(())
                } else {
                    Err(nested.error("Expected `#[field(skip)]` or `#[field(name = \"...\")]`"))
                }
            })?;
            if skip {
                return Ok(ParsingResult::Skipped);
            }
        }
    }
    if lookup_name.is_empty() {
        return Err(syn::Error::new(field.span(), "Field lookup name must not be empty"));
    }
    let variant = quote::format_ident!("{}", macro_utils::to_camel_case(&field_name.to_string(), true));
    Ok(ParsingResult::Field(FieldDef { name: field_name, tpe: field.ty.clone(), variant, lookup_name }))
}

pub fn get_field_defs(ast: &DeriveInput) -> Result<Vec<FieldDef>, syn::Error> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new(ast.generics.span(), "`#[derive(Fields)]` does not support generic structs"));
    }
    let fields = get_named_fields(ast)?;
    let mut field_defs: Vec<FieldDef> = Vec::new();
    for field in fields.iter() {
        match parse_record_field(field)? {
            ParsingResult::Field(field_def) => {
                if field_defs.iter().any(|f| f.lookup_name == field_def.lookup_name) {
                    return Err(syn::Error::new(field.span(), format!("Duplicate field lookup name `{}`", field_def.lookup_name)));
                }
                field_defs.push(field_def)
            }
            ParsingResult::Skipped => {}
        }
    }
    if field_defs.is_empty() {
        return Err(syn::Error::new(ast.span(), "At least one field must be selectable, all fields are `#[field(skip)]`"));
    }
    Ok(field_defs)
}
