//! Derive macro for `shapeshift` records.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Type, parse_macro_input};

/// Derives `Shaped`, `Reflect` and `RecordAccess` for a struct with named
/// fields, making it a record conversion target.
///
/// Field attributes:
///
/// - `#[shaped(flatten)]`: anonymous embedding. The field's own fields are
///   promoted into this record when mapping to and from key-value sources.
/// - `#[shaped(readonly)]`: emitted by record-to-map, never written by
///   map-to-record.
/// - `#[shaped(skip)]`: invisible to conversions. The field is zeroed
///   through `Default`.
///
/// # Example
///
/// ```ignore
/// #[derive(Shaped)]
/// struct Account {
///     #[shaped(flatten)]
///     base: Base,
///     password: String,
///     #[shaped(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Shaped, attributes(shaped))]
pub fn derive_shaped(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

struct FieldSpec<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    skip: bool,
    flatten: bool,
    readonly: bool,
}

fn parse_field(field: &syn::Field) -> syn::Result<FieldSpec<'_>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;

    let mut spec = FieldSpec {
        ident,
        ty: &field.ty,
        skip: false,
        flatten: false,
        readonly: false,
    };

    for attr in &field.attrs {
        if !attr.path().is_ident("shaped") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                spec.skip = true;
            } else if meta.path.is_ident("flatten") {
                spec.flatten = true;
            } else if meta.path.is_ident("readonly") {
                spec.readonly = true;
            } else {
                return Err(meta.error("unknown attribute (expected `skip`, `flatten` or `readonly`)"));
            }
            Ok(())
        })?;
    }

    if spec.skip && (spec.flatten || spec.readonly) {
        return Err(syn::Error::new_spanned(
            ident,
            "a skipped field cannot also be `flatten` or `readonly`",
        ));
    }

    Ok(spec)
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Shaped cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Shaped only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Shaped only supports structs",
            ));
        }
    };

    let specs = fields
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;
    let visible: Vec<&FieldSpec<'_>> = specs.iter().filter(|f| !f.skip).collect();

    let field_descs = visible.iter().map(|f| {
        let field_name = f.ident.to_string();
        let ty = f.ty;
        let flatten = f.flatten;
        let readonly = f.readonly;
        quote! {
            ::shapeshift::Field {
                name: #field_name,
                shape: || <#ty as ::shapeshift::Shaped>::SHAPE,
                flatten: #flatten,
                readonly: #readonly,
            }
        }
    });

    let zero_fields = specs.iter().map(|f| {
        let ident = f.ident;
        let ty = f.ty;
        if f.skip {
            quote! { #ident: ::core::default::Default::default() }
        } else {
            quote! { #ident: <#ty as ::shapeshift::Shaped>::zeroed() }
        }
    });

    let indices: Vec<usize> = (0..visible.len()).collect();
    let idents: Vec<&Ident> = visible.iter().map(|f| f.ident).collect();
    let type_name = name.to_string();

    Ok(quote! {
        impl ::shapeshift::Shaped for #name {
            const SHAPE: &'static ::shapeshift::Shape = &::shapeshift::Shape {
                type_identifier: #type_name,
                def: ::shapeshift::Def::Record(::shapeshift::RecordDef {
                    fields: &[#(#field_descs),*],
                    layout: || {
                        static LAYOUT: ::shapeshift::LayoutCell = ::shapeshift::LayoutCell::new();
                        LAYOUT.get_or_build(<#name as ::shapeshift::Shaped>::SHAPE)
                    },
                }),
            };

            fn zeroed() -> Self {
                Self {
                    #(#zero_fields),*
                }
            }
        }

        impl ::shapeshift::Reflect for #name {
            fn shape(&self) -> &'static ::shapeshift::Shape {
                <Self as ::shapeshift::Shaped>::SHAPE
            }

            fn peek(&self) -> ::shapeshift::Peek<'_> {
                ::shapeshift::Peek::Record(self)
            }

            fn poke(&mut self) -> ::shapeshift::Poke<'_> {
                ::shapeshift::Poke::Record(self)
            }

            fn set_zero(&mut self) {
                *self = <Self as ::shapeshift::Shaped>::zeroed();
            }
        }

        impl ::shapeshift::RecordAccess for #name {
            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::shapeshift::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents as &dyn ::shapeshift::Reflect),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn ::shapeshift::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents as &mut dyn ::shapeshift::Reflect),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
