use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the six product attributes the ingestion pipeline tries to resolve.
///
/// Variants are declared in canonical order; [`ProductField::ALL`] and every
/// list this crate produces follow that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductField {
    Name,
    Price,
    RollCount,
    SheetsPerRoll,
    SheetWidth,
    SheetHeight,
}

impl ProductField {
    pub const ALL: [ProductField; 6] = [
        ProductField::Name,
        ProductField::Price,
        ProductField::RollCount,
        ProductField::SheetsPerRoll,
        ProductField::SheetWidth,
        ProductField::SheetHeight,
    ];

    /// Human-readable label used in user-facing warnings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductField::Name => "product name",
            ProductField::Price => "price",
            ProductField::RollCount => "roll count",
            ProductField::SheetsPerRoll => "sheets per roll",
            ProductField::SheetWidth => "sheet width",
            ProductField::SheetHeight => "sheet height",
        }
    }
}

impl std::fmt::Display for ProductField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A best-effort product record pulled out of a retailer page.
///
/// Every field is independently optional: `None` means "not found on the
/// page", never zero. Extractors discard non-positive numbers before they
/// reach this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProductData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shelf price in the page's currency, e.g. `"19.97"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheets_per_roll: Option<u32>,
    /// Sheet width in inches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_width: Option<f64>,
    /// Sheet height in inches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_height: Option<f64>,
}

impl ExtractedProductData {
    /// Returns `true` when no field has been resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ProductField::ALL.iter().all(|f| !self.has(*f))
    }

    #[must_use]
    pub fn has(&self, field: ProductField) -> bool {
        match field {
            ProductField::Name => self.name.is_some(),
            ProductField::Price => self.price.is_some(),
            ProductField::RollCount => self.roll_count.is_some(),
            ProductField::SheetsPerRoll => self.sheets_per_roll.is_some(),
            ProductField::SheetWidth => self.sheet_width.is_some(),
            ProductField::SheetHeight => self.sheet_height.is_some(),
        }
    }

    /// Fields that carry a value, in canonical order.
    #[must_use]
    pub fn present_fields(&self) -> Vec<ProductField> {
        ProductField::ALL
            .into_iter()
            .filter(|f| self.has(*f))
            .collect()
    }

    /// Copies every field of `other` that is still missing here.
    ///
    /// Populated fields are never overwritten, so folding sources in
    /// priority order gives first-source-wins precedence.
    pub fn fill_missing(&mut self, other: ExtractedProductData) {
        let ExtractedProductData {
            name,
            price,
            roll_count,
            sheets_per_roll,
            sheet_width,
            sheet_height,
        } = other;

        if self.name.is_none() {
            self.name = name;
        }
        if self.price.is_none() {
            self.price = price;
        }
        if self.roll_count.is_none() {
            self.roll_count = roll_count;
        }
        if self.sheets_per_roll.is_none() {
            self.sheets_per_roll = sheets_per_roll;
        }
        if self.sheet_width.is_none() {
            self.sheet_width = sheet_width;
        }
        if self.sheet_height.is_none() {
            self.sheet_height = sheet_height;
        }
    }

    /// Folds `sources` left to right with [`Self::fill_missing`].
    #[must_use]
    pub fn merge_in_priority<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = ExtractedProductData>,
    {
        sources
            .into_iter()
            .fold(Self::default(), |mut merged, source| {
                merged.fill_missing(source);
                merged
            })
    }
}
