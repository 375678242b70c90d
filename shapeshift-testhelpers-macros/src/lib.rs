//! The `#[shapeshift_testhelpers::test]` attribute.

use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input};

/// Marks a test and installs the test subscriber before its body runs.
///
/// ```ignore
/// #[shapeshift_testhelpers::test]
/// fn converts() {
///     // tracing output shows up, filtered by SHAPESHIFT_LOG
/// }
/// ```
///
/// A different test attribute can be passed as argument:
/// `#[shapeshift_testhelpers::test(tokio::test)]`.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(item as ItemFn);

    let test_attr = if attr.is_empty() {
        quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = proc_macro2::TokenStream::from(attr);
        quote! { #[#attr] }
    };
    let stmts = &block.stmts;

    quote! {
        #test_attr
        #(#attrs)*
        #vis #sig {
            ::shapeshift_testhelpers::setup();

            #(#stmts)*
        }
    }
    .into()
}
