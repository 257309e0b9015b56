//! Mappable derive macro implementation
//!
//! This module contains the implementation of the Mappable derive macro,
//! which generates the field descriptor and indexed field accessors a struct
//! needs to take part in record mapping.

use darling::{FromDeriveInput, FromField, ast};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, parse_macro_input};

use crate::utils;

/// Receiver for the struct that derives `Mappable`
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(map), supports(struct_named))]
struct MappableReceiver {
    /// The struct identifier
    ident: syn::Ident,
    generics: syn::Generics,
    /// The struct data with parsed fields
    data: ast::Data<(), MappableFieldReceiver>,
}

/// Receiver for the fields in the struct
#[derive(Debug, FromField)]
#[darling(attributes(map))]
struct MappableFieldReceiver {
    /// The field identifier
    ident: Option<syn::Ident>,
    /// The field type
    ty: syn::Type,
    /// Alias name used to pair the field with its counterpart
    #[darling(default)]
    name: Option<String>,
    /// Conversion directive
    #[darling(default)]
    conv: Option<String>,
    /// Leave the field out of mapping entirely
    #[darling(default)]
    skip: bool,
}

/// A field that takes part in mapping
struct MappedField<'a> {
    index: usize,
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    definition: TokenStream2,
}

/// Process the Mappable derive macro
pub fn process_derive_mappable(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.write_errors().into(),
    }
}

/// Expand a derive input into the trait implementations
pub fn expand(input: &DeriveInput) -> darling::Result<TokenStream2> {
    // Parse with darling
    let receiver = MappableReceiver::from_derive_input(input)?;

    // Extract the fields
    let ast::Data::Struct(fields) = &receiver.data else {
        unreachable!("Darling ensures this is a struct")
    };

    let fields = mapped_fields(fields)?;
    Ok(generate_mappable_impl(&receiver, &fields))
}

/// Validate field attributes and assign indices to the mapped fields
fn mapped_fields(
    fields: &ast::Fields<MappableFieldReceiver>,
) -> darling::Result<Vec<MappedField<'_>>> {
    let mut errors = Vec::new();
    let mut mapped = Vec::new();

    for field in fields.iter().filter(|field| !field.skip) {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        if utils::is_option_type(&field.ty) {
            errors.push(
                darling::Error::custom(
                    "optional fields cannot be mapped; mark the field with #[map(skip)]",
                )
                .with_span(&field.ty),
            );
            continue;
        }

        let directive = match field.conv.as_deref() {
            None => quote! {},
            Some(conv) => match utils::directive_kind(conv) {
                Some(kind) => quote! { .with_directive(#kind) },
                None => {
                    errors.push(
                        darling::Error::custom(format!(
                            "unknown conversion directive `{conv}`, expected one of: {}",
                            utils::DIRECTIVES.join(", ")
                        ))
                        .with_span(ident),
                    );
                    continue;
                }
            },
        };

        let alias = field
            .name
            .as_ref()
            .map(|name| quote! { .with_alias(#name) });

        let index = mapped.len();
        let name = ident.unraw().to_string();
        let ty = &field.ty;
        mapped.push(MappedField {
            index,
            ident,
            ty,
            definition: quote! {
                ::record_mapper::FieldDefinition::new(
                    #index,
                    #name,
                    <#ty as ::record_mapper::MapField>::shape(),
                )
                #alias
                #directive
            },
        });
    }

    if errors.is_empty() {
        Ok(mapped)
    } else {
        Err(darling::Error::multiple(errors))
    }
}

/// Generate the trait implementations
fn generate_mappable_impl(receiver: &MappableReceiver, fields: &[MappedField<'_>]) -> TokenStream2 {
    let struct_name = &receiver.ident;
    let type_name = struct_name.unraw().to_string();

    let mut generics = receiver.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        where_clause.predicates.push(syn::parse_quote! { Self: 'static });
        for field in fields {
            let ty = field.ty;
            where_clause
                .predicates
                .push(syn::parse_quote! { #ty: ::record_mapper::MapField });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let definitions = fields.iter().map(|field| &field.definition);
    let readers = fields.iter().map(|field| {
        let (index, ident, ty) = (field.index, field.ident, field.ty);
        quote! {
            #index => ::std::option::Option::Some(
                <#ty as ::record_mapper::MapField>::as_field(&self.#ident)
            ),
        }
    });
    let writers = fields.iter().map(|field| {
        let (index, ident, ty) = (field.index, field.ident, field.ty);
        quote! {
            #index => ::std::option::Option::Some(
                <#ty as ::record_mapper::MapField>::as_field_mut(&mut self.#ident)
            ),
        }
    });
    let zero_checks = fields.iter().map(|field| {
        let (ident, ty) = (field.ident, field.ty);
        quote! { && <#ty as ::record_mapper::MapField>::is_zero(&self.#ident) }
    });

    quote! {
        const _: () = {
            impl #impl_generics ::record_mapper::Record for #struct_name #ty_generics #where_clause {
                fn descriptor() -> ::record_mapper::RecordType {
                    ::record_mapper::RecordType::of::<Self>(
                        #type_name,
                        <Self as ::record_mapper::Record>::describe,
                    )
                }

                fn describe() -> ::std::vec::Vec<::record_mapper::FieldDefinition> {
                    ::std::vec![#(#definitions),*]
                }
            }

            impl #impl_generics ::record_mapper::reflect::Mappable for #struct_name #ty_generics #where_clause {
                fn record_type(&self) -> ::record_mapper::RecordType {
                    <Self as ::record_mapper::Record>::descriptor()
                }

                fn field(
                    &self,
                    index: usize,
                ) -> ::std::option::Option<::record_mapper::FieldRef<'_>> {
                    match index {
                        #(#readers)*
                        _ => ::std::option::Option::None,
                    }
                }

                fn field_mut(
                    &mut self,
                    index: usize,
                ) -> ::std::option::Option<::record_mapper::FieldMut<'_>> {
                    match index {
                        #(#writers)*
                        _ => ::std::option::Option::None,
                    }
                }

                fn is_zero(&self) -> bool {
                    true #(#zero_checks)*
                }
            }

            impl #impl_generics ::record_mapper::MapField for #struct_name #ty_generics #where_clause {
                fn shape() -> ::record_mapper::FieldShape {
                    ::record_mapper::FieldShape::Record(<Self as ::record_mapper::Record>::descriptor())
                }

                fn as_field(&self) -> ::record_mapper::FieldRef<'_> {
                    ::record_mapper::FieldRef::Record(self)
                }

                fn as_field_mut(&mut self) -> ::record_mapper::FieldMut<'_> {
                    ::record_mapper::FieldMut::Record(self)
                }

                fn is_zero(&self) -> bool {
                    <Self as ::record_mapper::reflect::Mappable>::is_zero(self)
                }
            }

            impl #impl_generics ::record_mapper::ElementField for #struct_name #ty_generics #where_clause {
                fn element_shape() -> ::record_mapper::ElementShape {
                    ::record_mapper::ElementShape::Record(<Self as ::record_mapper::Record>::descriptor())
                }
            }
        };
    }
}
