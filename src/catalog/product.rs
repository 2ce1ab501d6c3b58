use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Sentinel for missing/non-numeric sort columns so unordered items sort last.
pub const SORT_LAST: u32 = 9999;

/// One normalized catalog entry. Immutable after construction; the whole set
/// is rebuilt on every feed refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier derived from name + category. Not guaranteed unique
    /// (two identical name/category rows collide), but stable across reloads.
    pub id: String,
    pub name: String,
    /// Free text from the feed; matched by substring, never an enum.
    pub category: String,
    /// Ordered image URLs; may be empty, in which case the presentation
    /// layer substitutes a placeholder.
    pub images: Vec<String>,
    /// Smallest currency unit, digits-only parse of the price text.
    pub price: u32,
    pub original_price: Option<u32>,
    pub in_stock: bool,
    /// Lowercased promotional tag, e.g. "flat 50% off".
    pub tag: Option<String>,
    pub trending: bool,
    pub sort_order: u32,
    pub show_in_new_arrivals: bool,
    pub new_arrivals_sort: u32,
    pub show_in_favourites: bool,
    pub favourites_sort: u32,
}

impl Product {
    /// Deterministic short id over name + category.
    pub fn stable_id(name: &str, category: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update([0x1f]);
        hasher.update(category.as_bytes());
        let digest = hasher.finalize();
        let mut out = String::with_capacity(12);
        for byte in digest.iter().take(6) {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }

    /// True when an original price exists and exceeds the selling price.
    /// `original_price < price` is possible in the feed and deliberately
    /// left unvalidated; it simply renders as no discount.
    pub fn has_discount(&self) -> bool {
        matches!(self.original_price, Some(original) if original > self.price)
    }

    /// Percentage off, rounded to the nearest integer. 0 without a discount.
    pub fn discount_percent(&self) -> u32 {
        match self.original_price {
            Some(original) if original > self.price => {
                let saved = f64::from(original - self.price);
                (saved / f64::from(original) * 100.0).round() as u32
            }
            _ => 0,
        }
    }
}
