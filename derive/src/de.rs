use crate::shared::{member, only_field, scoped, struct_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub fn impl_decodable(ast: &DeriveInput) -> TokenStream {
    // Struct literal fields are evaluated in source order, which is the wire order.
    let members = struct_fields(ast, "Decodable")
        .iter()
        .enumerate()
        .map(|(index, field)| member(index, field));

    decode_impl(
        ast,
        quote! {
            ::core::result::Result::Ok(Self {
                #(#members: binstream::Decodable::decode(input)?,)*
            })
        },
    )
}

pub fn impl_decodable_wrapper(ast: &DeriveInput) -> TokenStream {
    let (field, ty) = only_field(ast, "DecodableWrapper");

    decode_impl(
        ast,
        quote! { <#ty as binstream::Decodable>::decode(input).map(|v| Self { #field: v }) },
    )
}

fn decode_impl(ast: &DeriveInput, body: TokenStream) -> TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    scoped(quote! {
        impl #impl_generics binstream::Decodable for #name #ty_generics #where_clause {
            fn decode<__B: binstream::ByteOrder, __R: ::std::io::Read>(
                input: &mut binstream::Reader<__B, __R>,
            ) -> binstream::Result<Self> {
                #body
            }
        }
    })
}
