use crate::catalog::product::{Product, SORT_LAST};
use crate::feed::schema::{Field, FeedSchema};
use crate::feed::RawRow;
use crate::util::env;

/// Normalization policy toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// When set, rows whose image list comes out empty are rejected. Some
    /// feed versions require at least one image, others do not; the policy
    /// is configuration, not a guess.
    pub require_image: bool,
}

impl NormalizeOptions {
    pub fn from_env() -> Self {
        Self {
            require_image: env::env_flag("FEED_REQUIRE_IMAGE", false),
        }
    }
}

/// Map one raw row to a product record, or reject it.
///
/// Rules, in order: require a name and a price field; digits-only integer
/// parse of price (0 when unparseable) and original price (None when
/// unparseable); comma-split image list with empty/"undefined" entries
/// dropped; lowercased tag and stock text with `in_stock` as a substring
/// test for "in"; `trending` only on an exact "yes"; sort columns falling
/// back to the last-place sentinel.
pub fn normalize_row(row: &RawRow, schema: &FeedSchema, options: &NormalizeOptions) -> Option<Product> {
    let name = schema.get(row, Field::Name)?;
    let price_text = schema.get(row, Field::Price)?;

    let price = parse_rupees(price_text).unwrap_or(0);
    let original_price = schema.get(row, Field::OriginalPrice).and_then(parse_rupees);

    let images = split_images(schema.get(row, Field::Images).unwrap_or_default());
    if options.require_image && images.is_empty() {
        return None;
    }

    let category = schema.get(row, Field::Category).unwrap_or_default().to_string();

    let stock_text = lower(schema.get(row, Field::StockStatus));
    let in_stock = stock_text.contains("in");

    let tag = match lower(schema.get(row, Field::Tag)) {
        t if t.is_empty() => None,
        t => Some(t),
    };

    let trending = lower(schema.get(row, Field::Trending)) == "yes";

    Some(Product {
        id: Product::stable_id(name, &category),
        name: name.to_string(),
        category,
        images,
        price,
        original_price,
        in_stock,
        tag,
        trending,
        sort_order: parse_sort(schema.get(row, Field::SortOrder)),
        show_in_new_arrivals: lower(schema.get(row, Field::ShowInNewArrivals)) == "yes",
        new_arrivals_sort: parse_sort(schema.get(row, Field::NewArrivalsSort)),
        show_in_favourites: lower(schema.get(row, Field::ShowInFavourites)) == "yes",
        favourites_sort: parse_sort(schema.get(row, Field::FavouritesSort)),
    })
}

/// Normalize every row, silently dropping rejects.
pub fn normalize_rows(rows: &[RawRow], schema: &FeedSchema, options: &NormalizeOptions) -> Vec<Product> {
    rows.iter()
        .filter_map(|row| normalize_row(row, schema, options))
        .collect()
}

/// Strip every non-digit character ("₹1,999" -> "1999") and parse.
fn parse_rupees(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn split_images(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("undefined"))
        .map(str::to_string)
        .collect()
}

fn lower(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_lowercase()
}

fn parse_sort(value: Option<&str>) -> u32 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(SORT_LAST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse_rows;

    fn normalize_feed(text: &str) -> Vec<Product> {
        let schema = FeedSchema::with_defaults();
        let rows = parse_rows(text).unwrap();
        normalize_rows(&rows, &schema, &NormalizeOptions::default())
    }

    #[test]
    fn rupee_price_parses_to_integer() {
        let products = normalize_feed("Item Name,Price\nDress,₹999\n");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, 999);
        assert_eq!(products[0].original_price, None);
        // No stock column: empty text does not contain "in".
        assert!(!products[0].in_stock);
    }

    #[test]
    fn rows_missing_name_or_price_are_dropped() {
        let products = normalize_feed(
            "Item Name,Price\n\
             ,₹999\n\
             Kurti,\n\
             Dupatta,₹450\n",
        );
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Dupatta");
    }

    #[test]
    fn unparseable_price_defaults_to_zero() {
        let products = normalize_feed("Item Name,Price,Original Price\nDress,TBD,N/A\n");
        assert_eq!(products[0].price, 0);
        assert_eq!(products[0].original_price, None);
    }

    #[test]
    fn comma_amounts_strip_to_digits() {
        let products = normalize_feed("Item Name,Price,Original Price\nLehenga,\"₹12,499\",\"₹24,999\"\n");
        assert_eq!(products[0].price, 12499);
        assert_eq!(products[0].original_price, Some(24999));
        assert!(products[0].has_discount());
    }

    #[test]
    fn image_list_splits_and_drops_junk() {
        let products =
            normalize_feed("Item Name,Price,Image URL\nDress,999,\"a.jpg, ,undefined, b.jpg\"\n");
        assert_eq!(products[0].images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    }

    #[test]
    fn require_image_toggle_rejects_imageless_rows() {
        let schema = FeedSchema::with_defaults();
        let rows = parse_rows("Item Name,Price,Image URL\nDress,999,\nSaree,450,s.jpg\n").unwrap();

        let lax = normalize_rows(&rows, &schema, &NormalizeOptions { require_image: false });
        assert_eq!(lax.len(), 2);
        assert!(lax[0].images.is_empty());

        let strict = normalize_rows(&rows, &schema, &NormalizeOptions { require_image: true });
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].name, "Saree");
    }

    #[test]
    fn stock_is_a_substring_test() {
        let products = normalize_feed(
            "Item Name,Price,Stock Status\n\
             A,100,In Stock\n\
             B,100,available in store\n\
             C,100,Sold Out\n",
        );
        assert!(products[0].in_stock);
        assert!(products[1].in_stock);
        assert!(!products[2].in_stock);
    }

    #[test]
    fn trending_requires_exact_yes() {
        let products = normalize_feed(
            "Item Name,Price,Trending\nA,100, YES \nB,100,yes please\nC,100,no\n",
        );
        assert!(products[0].trending);
        assert!(!products[1].trending);
        assert!(!products[2].trending);
    }

    #[test]
    fn tag_is_lowercased_and_trimmed() {
        let products = normalize_feed("Item Name,Price,Tag\nA,100, Flat 50% Off \nB,100,\n");
        assert_eq!(products[0].tag.as_deref(), Some("flat 50% off"));
        assert_eq!(products[1].tag, None);
    }

    #[test]
    fn sort_columns_fall_back_to_sentinel() {
        let products = normalize_feed(
            "Item Name,Price,Sort Order,New Arrivals Sort\nA,100,3,not-a-number\nB,100,,\n",
        );
        assert_eq!(products[0].sort_order, 3);
        assert_eq!(products[0].new_arrivals_sort, SORT_LAST);
        assert_eq!(products[1].sort_order, SORT_LAST);
    }

    #[test]
    fn empty_feed_normalizes_to_empty_set() {
        assert!(normalize_feed("").is_empty());
    }
}
