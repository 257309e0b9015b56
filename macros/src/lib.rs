//! Procedural macros for the record-mapper crate
//!
//! This crate provides the `Mappable` derive, which generates the field
//! descriptor and indexed accessors the mapping engine walks.

use proc_macro::TokenStream;

// Import modules
mod mappable_impl;
mod utils;

// Tests
#[cfg(test)]
mod tests;

/// Derive macro for mappable records
///
/// Generates `Record`, `Mappable`, `MapField` and `ElementField`
/// implementations for a struct with named fields.
///
/// Field options under `#[map(...)]`:
///
/// - `name = "Alias"`: pair the field by this name instead of its identifier
/// - `conv = "float64"`: interpret the value as this kind when the two sides
///   differ (`bool`, `int`, `int8`..`int64`, `uint`, `uint8`..`uint64`,
///   `float32`, `float64`, `string`, `date`)
/// - `skip`: leave the field out of mapping
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default, Mappable)]
/// struct GeoDto {
///     #[map(name = "Latitude", conv = "float64")]
///     lat: String,
///
///     #[map(name = "Longitude", conv = "float64")]
///     lng: String,
///
///     #[map(skip)]
///     cached: Option<String>,
/// }
/// ```
#[proc_macro_derive(Mappable, attributes(map))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    mappable_impl::process_derive_mappable(input)
}
