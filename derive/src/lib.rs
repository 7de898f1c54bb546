//! `#[derive(Encodable, Decodable)]` for binstream.
//!
//! Fields go on the wire in declaration order, each through its own
//! `Encodable` / `Decodable` impl. The `*Wrapper` variants forward to the
//! single field of a newtype.

#![no_std]

extern crate proc_macro;

mod de;
mod en;
mod shared;

use de::*;
use en::*;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

#[proc_macro_derive(Encodable)]
pub fn encodable(input: TokenStream) -> TokenStream {
    impl_encodable(&parse_macro_input!(input as DeriveInput)).into()
}

#[proc_macro_derive(EncodableWrapper)]
pub fn encodable_wrapper(input: TokenStream) -> TokenStream {
    impl_encodable_wrapper(&parse_macro_input!(input as DeriveInput)).into()
}

#[proc_macro_derive(Decodable)]
pub fn decodable(input: TokenStream) -> TokenStream {
    impl_decodable(&parse_macro_input!(input as DeriveInput)).into()
}

#[proc_macro_derive(DecodableWrapper)]
pub fn decodable_wrapper(input: TokenStream) -> TokenStream {
    impl_decodable_wrapper(&parse_macro_input!(input as DeriveInput)).into()
}
