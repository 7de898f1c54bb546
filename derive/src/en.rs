use crate::shared::{member, only_field, scoped, struct_fields};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

/// Writes the fields through one writer chain, so the first failing field
/// stops the rest.
pub fn impl_encodable(ast: &DeriveInput) -> TokenStream {
    let members = struct_fields(ast, "Encodable")
        .iter()
        .enumerate()
        .map(|(index, field)| member(index, field));

    encode_impl(
        ast,
        quote! {
            out.chain()
                #(.write(&self.#members))*
                .finish()
        },
    )
}

pub fn impl_encodable_wrapper(ast: &DeriveInput) -> TokenStream {
    let (field, _) = only_field(ast, "EncodableWrapper");

    encode_impl(ast, quote! { binstream::Encodable::encode(&self.#field, out) })
}

fn encode_impl(ast: &DeriveInput, body: TokenStream) -> TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    scoped(quote! {
        impl #impl_generics binstream::Encodable for #name #ty_generics #where_clause {
            fn encode<__B: binstream::ByteOrder, __W: ::std::io::Write>(
                &self,
                out: &mut binstream::Writer<__B, __W>,
            ) -> binstream::Result<()> {
                #body
            }
        }
    })
}
