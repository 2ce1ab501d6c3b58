use std::collections::HashMap;

use crate::catalog::product::Product;

/// Case-insensitive substring search over name + category.
pub fn search_text(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            let haystack = format!("{}{}", p.name, p.category).to_lowercase();
            haystack.contains(&needle)
        })
        .cloned()
        .collect()
}

/// Fixed alias table consulted before the substring fallback: the selected
/// label redirects to a different canonical category. The table is data, not
/// inference, so matching stays deterministic and testable.
#[derive(Debug, Clone)]
pub struct CategoryAliases {
    redirects: HashMap<String, String>,
}

impl Default for CategoryAliases {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CategoryAliases {
    pub fn with_defaults() -> Self {
        Self { redirects: HashMap::new() }.register("Palazzos", "Tops & Dresses")
    }

    /// Register or override a redirect (selected label -> canonical category).
    pub fn register(mut self, from: impl AsRef<str>, to: impl Into<String>) -> Self {
        self.redirects
            .insert(from.as_ref().trim().to_lowercase(), to.into());
        self
    }

    /// Canonical category for a selected label, lowercased; the label itself
    /// when no redirect applies.
    pub fn resolve(&self, selected: &str) -> String {
        let key = selected.trim().to_lowercase();
        match self.redirects.get(&key) {
            Some(target) => target.trim().to_lowercase(),
            None => key,
        }
    }
}

/// Category listing: alias redirect first, then bidirectional substring
/// containment against the row category. "Bridal Lehengas" is special-cased:
/// those live under "Rental Wear" with "bridal" in the item name.
pub fn select_category(products: &[Product], aliases: &CategoryAliases, selected: &str) -> Vec<Product> {
    if segment_key(selected) == "bridallehengas" {
        return products
            .iter()
            .filter(|p| {
                p.category.trim().eq_ignore_ascii_case("Rental Wear")
                    && p.name.to_lowercase().contains("bridal")
            })
            .cloned()
            .collect();
    }

    let wanted = aliases.resolve(selected);
    products
        .iter()
        .filter(|p| {
            let row = p.category.trim().to_lowercase();
            if row.is_empty() || wanted.is_empty() {
                return false;
            }
            row.contains(&wanted) || wanted.contains(&row)
        })
        .cloned()
        .collect()
}

/// Promotional tag synonym lists, selected by a normalized URL path segment.
const FLAT50_TAGS: &[&str] = &["flat 50% off", "flat 50 off", "flat 50", "flat50"];
const COMBO_TAGS: &[&str] = &["festive combos", "festive combo", "combos", "combo"];

/// The synonym list for a promotional path segment, if recognized.
pub fn tag_set_for_segment(segment: &str) -> Option<&'static [&'static str]> {
    match segment_key(segment).as_str() {
        "flat50" | "flat50off" => Some(FLAT50_TAGS),
        "combos" | "combo" | "festivecombos" => Some(COMBO_TAGS),
        _ => None,
    }
}

/// Tag listing: exact membership of the row's normalized tag in the segment's
/// synonym list. Unknown segments select nothing.
pub fn select_tag(products: &[Product], segment: &str) -> Vec<Product> {
    let Some(tags) = tag_set_for_segment(segment) else {
        return Vec::new();
    };
    products
        .iter()
        .filter(|p| p.tag.as_deref().is_some_and(|t| tags.contains(&t)))
        .cloned()
        .collect()
}

/// Curated home sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    NewArrivals,
    Favourites,
    Trending,
}

impl Section {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match segment_key(slug).as_str() {
            "newarrivals" | "new" => Some(Self::NewArrivals),
            "favourites" | "favorites" => Some(Self::Favourites),
            "trending" => Some(Self::Trending),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::NewArrivals => "new-arrivals",
            Self::Favourites => "favourites",
            Self::Trending => "trending",
        }
    }
}

/// Section listing, ordered by the section's sort column; items without an
/// order carry the sentinel and land last. The sort is stable, so feed order
/// breaks ties.
pub fn select_section(products: &[Product], section: Section) -> Vec<Product> {
    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| match section {
            Section::NewArrivals => p.show_in_new_arrivals,
            Section::Favourites => p.show_in_favourites,
            Section::Trending => p.trending,
        })
        .cloned()
        .collect();
    out.sort_by_key(|p| match section {
        Section::NewArrivals => p.new_arrivals_sort,
        Section::Favourites => p.favourites_sort,
        Section::Trending => p.sort_order,
    });
    out
}

/// Lowercase a path segment and keep only alphanumerics, so "Flat-50",
/// "flat_50" and "flat50" all key the same list.
fn segment_key(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize::{normalize_rows, NormalizeOptions};
    use crate::feed::parse_rows;
    use crate::feed::schema::FeedSchema;

    fn catalog() -> Vec<Product> {
        let feed = "\
Item Name,Price,Category,Tag,Trending,Sort Order,Show in New Arrivals,New Arrivals Sort,Show in Favourites,Favourites Sort
Silk Saree,2499,Sarees & Dupattas,,yes,2,,,,
Cotton Kurti,799,Tops & Dresses,flat 50% off,no,,yes,2,,
Palazzo Set,999,Tops & Dresses,,no,,yes,1,yes,1
Bridal Lehenga Set,14999,Rental Wear,,no,1,,,yes,
Party Gown,4999,Rental Wear,festive combos,no,,,,,
Jute Handbag,599,Handbags,flat50,no,,yes,,,
";
        let rows = parse_rows(feed).unwrap();
        normalize_rows(&rows, &FeedSchema::with_defaults(), &NormalizeOptions::default())
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn search_matches_name_and_category_concatenation() {
        let catalog = catalog();
        let hits = search_text(&catalog, "bag");
        assert_eq!(names(&hits), vec!["Jute Handbag"]);

        let hits = search_text(&catalog, "SAREE");
        assert_eq!(names(&hits), vec!["Silk Saree"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let catalog = catalog();
        assert_eq!(search_text(&catalog, "").len(), catalog.len());
    }

    #[test]
    fn category_select_is_symmetric_substring() {
        let catalog = catalog();
        let aliases = CategoryAliases::with_defaults();

        // Selected label contained in the row category.
        let hits = select_category(&catalog, &aliases, "Saree");
        assert_eq!(names(&hits), vec!["Silk Saree"]);

        // Row category contained in the selected label.
        let hits = select_category(&catalog, &aliases, "All Sarees & Dupattas Collection");
        assert_eq!(names(&hits), vec!["Silk Saree"]);
    }

    #[test]
    fn palazzos_redirects_to_tops_and_dresses() {
        let catalog = catalog();
        let hits = select_category(&catalog, &CategoryAliases::with_defaults(), "Palazzos");
        assert_eq!(names(&hits), vec!["Cotton Kurti", "Palazzo Set"]);
    }

    #[test]
    fn bridal_lehengas_requires_rental_wear_and_bridal_name() {
        let catalog = catalog();
        let hits = select_category(&catalog, &CategoryAliases::with_defaults(), "Bridal Lehengas");
        assert_eq!(names(&hits), vec!["Bridal Lehenga Set"]);
    }

    #[test]
    fn empty_category_rows_never_match() {
        let rows = parse_rows("Item Name,Price\nMystery Item,100\n").unwrap();
        let catalog =
            normalize_rows(&rows, &FeedSchema::with_defaults(), &NormalizeOptions::default());
        let hits = select_category(&catalog, &CategoryAliases::with_defaults(), "Saree");
        assert!(hits.is_empty());
    }

    #[test]
    fn flat50_segment_selects_exactly_the_synonym_members() {
        let catalog = catalog();
        let hits = select_tag(&catalog, "flat50");
        assert_eq!(names(&hits), vec!["Cotton Kurti", "Jute Handbag"]);

        // Same list under a differently-punctuated segment.
        let hits = select_tag(&catalog, "Flat-50");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn combo_segment_selects_combo_tags_only() {
        let catalog = catalog();
        let hits = select_tag(&catalog, "combos");
        assert_eq!(names(&hits), vec!["Party Gown"]);
    }

    #[test]
    fn unknown_tag_segment_selects_nothing() {
        assert!(select_tag(&catalog(), "clearance").is_empty());
    }

    #[test]
    fn new_arrivals_orders_by_sort_column_with_sentinel_last() {
        let catalog = catalog();
        let hits = select_section(&catalog, Section::NewArrivals);
        // Palazzo Set (1), Cotton Kurti (2), Jute Handbag (no order -> last).
        assert_eq!(names(&hits), vec!["Palazzo Set", "Cotton Kurti", "Jute Handbag"]);
    }

    #[test]
    fn trending_section_filters_on_flag() {
        let catalog = catalog();
        let hits = select_section(&catalog, Section::Trending);
        assert_eq!(names(&hits), vec!["Silk Saree"]);
    }

    #[test]
    fn section_slugs_round_trip() {
        assert_eq!(Section::from_slug("new-arrivals"), Some(Section::NewArrivals));
        assert_eq!(Section::from_slug("favorites"), Some(Section::Favourites));
        assert_eq!(Section::from_slug("Trending"), Some(Section::Trending));
        assert_eq!(Section::from_slug("sale"), None);
    }
}
