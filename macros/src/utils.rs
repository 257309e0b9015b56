//! Utility functions for procedural macros
//!
//! This module contains helpers shared by the derive implementation, such as
//! resolving conversion directives and checking field types.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

/// Directive spellings accepted by `#[map(conv = "...")]`
pub const DIRECTIVES: &[&str] = &[
    "bool", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32",
    "uint64", "float32", "float64", "string", "date",
];

/// Resolve a conversion directive to its `ScalarKind` variant
pub fn directive_kind(directive: &str) -> Option<TokenStream> {
    let variant = match directive {
        "bool" => quote! { Bool },
        "int8" => quote! { Int8 },
        "int16" => quote! { Int16 },
        "int32" => quote! { Int32 },
        "int" | "int64" => quote! { Int64 },
        "uint8" => quote! { UInt8 },
        "uint16" => quote! { UInt16 },
        "uint32" => quote! { UInt32 },
        "uint" | "uint64" => quote! { UInt64 },
        "float32" => quote! { Float32 },
        "float64" => quote! { Float64 },
        "string" => quote! { String },
        "date" => quote! { Date },
        _ => return None,
    };
    Some(quote! { ::record_mapper::ScalarKind::#variant })
}

/// Check if a type is an Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
