use unitprice_core::{ExtractedProductData, ProductField};

/// Builds the user-facing warnings for fields the parse could not resolve.
///
/// A field counts as missing only when it is absent from both
/// `fields_extracted` and `data`. All missing fields are reported in one
/// consolidated string, labels in canonical field order; nothing missing
/// means no warnings.
#[must_use]
pub fn build_warnings(data: &ExtractedProductData, fields_extracted: &[ProductField]) -> Vec<String> {
    let missing: Vec<&str> = ProductField::ALL
        .into_iter()
        .filter(|f| !fields_extracted.contains(f) && !data.has(*f))
        .map(ProductField::label)
        .collect();

    if missing.is_empty() {
        return Vec::new();
    }
    vec![format!("Could not find: {}", missing.join(", "))]
}
