use std::collections::HashMap;

use crate::feed::RawRow;

/// Logical fields the normalizer reads from a feed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Price,
    OriginalPrice,
    Category,
    Images,
    StockStatus,
    Tag,
    Trending,
    SortOrder,
    ShowInNewArrivals,
    NewArrivalsSort,
    ShowInFavourites,
    FavouritesSort,
}

/// Configuration-driven header lookup: logical field -> candidate headers.
///
/// Header spelling drifts between feed versions ("Image URL" vs "Image
/// Link"), so the recognized set is configuration, not a fixed contract.
/// Aliases are tried in registration order; matching is case-insensitive on
/// trimmed header names.
#[derive(Debug, Default, Clone)]
pub struct FeedSchema {
    aliases: HashMap<Field, Vec<String>>,
}

impl FeedSchema {
    /// Build a schema seeded with every header spelling seen across feed
    /// versions.
    pub fn with_defaults() -> Self {
        Self::default()
            .register(Field::Name, &["Item Name"])
            .register(Field::Price, &["Price"])
            .register(Field::OriginalPrice, &["Original Price"])
            .register(Field::Category, &["Category"])
            .register(Field::Images, &["Image URL", "Image Link"])
            .register(Field::StockStatus, &["Stock Status"])
            .register(Field::Tag, &["Tag"])
            .register(Field::Trending, &["Trending"])
            .register(Field::SortOrder, &["Sort Order"])
            .register(Field::ShowInNewArrivals, &["Show in New Arrivals"])
            .register(Field::NewArrivalsSort, &["New Arrivals Sort"])
            .register(Field::ShowInFavourites, &["Show in Favourites"])
            .register(Field::FavouritesSort, &["Favourites Sort"])
    }

    /// Register or extend the alias list for a field.
    pub fn register(mut self, field: Field, headers: &[&str]) -> Self {
        let entry = self.aliases.entry(field).or_default();
        for header in headers {
            entry.push((*header).to_string());
        }
        self
    }

    /// First non-empty value for the field among its aliases, trimmed.
    pub fn get<'a>(&self, row: &'a RawRow, field: Field) -> Option<&'a str> {
        let aliases = self.aliases.get(&field)?;
        for alias in aliases {
            for (header, value) in row {
                if header.eq_ignore_ascii_case(alias) {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse_rows;

    #[test]
    fn resolves_either_image_header_spelling() {
        let schema = FeedSchema::with_defaults();

        let rows = parse_rows("Item Name,Image URL\nDress,a.jpg\n").unwrap();
        assert_eq!(schema.get(&rows[0], Field::Images), Some("a.jpg"));

        let rows = parse_rows("Item Name,Image Link\nDress,b.jpg\n").unwrap();
        assert_eq!(schema.get(&rows[0], Field::Images), Some("b.jpg"));
    }

    #[test]
    fn empty_values_do_not_resolve() {
        let schema = FeedSchema::with_defaults();
        let rows = parse_rows("Item Name,Price\nDress, \n").unwrap();
        assert_eq!(schema.get(&rows[0], Field::Price), None);
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let schema = FeedSchema::with_defaults();
        let rows = parse_rows("ITEM NAME,price\nDress,999\n").unwrap();
        assert_eq!(schema.get(&rows[0], Field::Name), Some("Dress"));
        assert_eq!(schema.get(&rows[0], Field::Price), Some("999"));
    }

    #[test]
    fn custom_alias_extends_defaults() {
        let schema = FeedSchema::with_defaults().register(Field::Price, &["MRP"]);
        let rows = parse_rows("Item Name,MRP\nDress,750\n").unwrap();
        assert_eq!(schema.get(&rows[0], Field::Price), Some("750"));
    }
}
