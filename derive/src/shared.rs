//! Input checks and token helpers used by every derive.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Index, Type};

/// Fields of the struct being derived. Enums and unions are rejected.
pub fn struct_fields<'a>(ast: &'a DeriveInput, derive: &str) -> &'a Fields {
    match &ast.data {
        Data::Struct(s) => &s.fields,
        Data::Enum(_) => panic!("#[derive({derive})] cannot be used on enum `{}`", ast.ident),
        Data::Union(_) => panic!("#[derive({derive})] cannot be used on union `{}`", ast.ident),
    }
}

/// Accessor and type of a newtype's only field.
pub fn only_field<'a>(ast: &'a DeriveInput, derive: &str) -> (TokenStream, &'a Type) {
    let fields = struct_fields(ast, derive);
    let mut iter = fields.iter();
    match (iter.next(), iter.next()) {
        (Some(field), None) => (member(0, field), &field.ty),
        _ => panic!(
            "#[derive({derive})] needs exactly one field, `{}` has {}",
            ast.ident,
            fields.len()
        ),
    }
}

/// `name` for named fields, the position for tuple fields.
pub fn member(index: usize, field: &Field) -> TokenStream {
    match &field.ident {
        Some(ident) => quote! { #ident },
        None => {
            let index = Index::from(index);
            quote! { #index }
        }
    }
}

/// Scopes the impl in an anonymous const so `binstream` resolves even when
/// the caller renamed or did not import it.
pub fn scoped(item: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            extern crate binstream;
            #item
        };
    }
}
