// Write-through cache mirror of the last successful fetch.
//
// The storefront never reads this back; it exists as a local copy of the
// catalog under a fixed key. Failures are the caller's to log and swallow.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::catalog::Product;
use crate::util::env;

/// Fixed key the product list is mirrored under.
pub const CACHE_KEY: &str = "momchic_products";

pub struct CacheMirror {
    conn: Mutex<Connection>,
}

impl CacheMirror {
    /// Open (or create) the mirror database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("opening cache mirror at {}", path.as_ref().display()))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .context("creating cache mirror schema")?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Mirror enabled per env (CACHE_MIRROR flag, CACHE_DB path). None when
    /// disabled; an open failure is logged and also yields None, since the
    /// mirror is optional by design.
    pub fn from_env() -> Option<Self> {
        if !env::env_flag("CACHE_MIRROR", true) {
            return None;
        }
        let path = env::env_opt("CACHE_DB").unwrap_or_else(|| "catalog_cache.sqlite3".into());
        match Self::open(&path) {
            Ok(mirror) => Some(mirror),
            Err(err) => {
                tracing::warn!(error = %err, path, "cache mirror unavailable");
                None
            }
        }
    }

    /// Replace the mirrored product list under the fixed key.
    pub fn write_products(&self, products: &[Product]) -> Result<()> {
        let payload = serde_json::to_string(products).context("serializing catalog for mirror")?;
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        conn.execute(
            "INSERT INTO kv (key, payload, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET payload = ?2, updated_at = ?3",
            params![CACHE_KEY, payload, Utc::now().to_rfc3339()],
        )
        .context("writing cache mirror")?;
        Ok(())
    }

    /// Read the mirrored list back. Diagnostics and tests only; no serving
    /// path consults the mirror.
    pub fn read_products(&self) -> Result<Option<Vec<Product>>> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM kv WHERE key = ?1",
                params![CACHE_KEY],
                |row| row.get(0),
            )
            .optional()
            .context("reading cache mirror")?;
        match payload {
            Some(json) => Ok(Some(
                serde_json::from_str(&json).context("decoding mirrored catalog")?,
            )),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::SORT_LAST;

    fn product(name: &str) -> Product {
        Product {
            id: Product::stable_id(name, "Handbags"),
            name: name.into(),
            category: "Handbags".into(),
            images: vec!["a.jpg".into()],
            price: 599,
            original_price: Some(999),
            in_stock: true,
            tag: Some("flat50".into()),
            trending: false,
            sort_order: SORT_LAST,
            show_in_new_arrivals: false,
            new_arrivals_sort: SORT_LAST,
            show_in_favourites: false,
            favourites_sort: SORT_LAST,
        }
    }

    #[test]
    fn write_then_read_round_trips_under_fixed_key() {
        let mirror = CacheMirror::open(":memory:").unwrap();
        assert!(mirror.read_products().unwrap().is_none());

        mirror.write_products(&[product("Jute Handbag")]).unwrap();
        let stored = mirror.read_products().unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Jute Handbag");
    }

    #[test]
    fn rewrite_replaces_previous_payload() {
        let mirror = CacheMirror::open(":memory:").unwrap();
        mirror.write_products(&[product("A"), product("B")]).unwrap();
        mirror.write_products(&[product("C")]).unwrap();

        let stored = mirror.read_products().unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "C");
    }
}
