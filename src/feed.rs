//! Product Feed
//!
//! Looks products up by id in an Atom feed whose entries carry the product
//! fields in the Google Merchant namespace:
//!
//! ```xml
//! <feed xmlns="http://www.w3.org/2005/Atom" xmlns:g="http://base.google.com/ns/1.0">
//!   <entry><g:id>sku-123</g:id><g:price>$19.99</g:price></entry>
//! </feed>
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TagError};

/// Atom namespace of the `feed`/`entry` elements
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
/// Vendor namespace of the `id`/`price` fields
pub const PRODUCT_NS: &str = "http://base.google.com/ns/1.0";

/// The two fields of a feed entry the service cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: String,
    pub price: String,
}

/// Read-only access to product records by id.
pub trait FeedSource: Send + Sync {
    /// Returns the first entry whose id equals `id` exactly.
    ///
    /// `Ok(None)` means the feed was read and holds no such product;
    /// `Err(FeedUnavailable)` means the feed could not be read or parsed.
    fn find_product(&self, id: &str) -> Result<Option<ProductRecord>>;
}

/// Parses every entry of the feed, in document order.
///
/// Entries without a product id are skipped. A missing price becomes an
/// empty string and is left for the renderer to reject.
pub fn parse_feed(xml: &str) -> Result<Vec<ProductRecord>> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| TagError::FeedUnavailable(format!("invalid feed XML: {e}")))?;

    let root = doc.root_element();
    if !root.has_tag_name((ATOM_NS, "feed")) {
        return Err(TagError::FeedUnavailable(format!(
            "root element is not an Atom feed: <{}>",
            root.tag_name().name()
        )));
    }

    let records = root
        .children()
        .filter(|node| node.has_tag_name((ATOM_NS, "entry")))
        .filter_map(|entry| {
            let field = |name: &str| {
                entry
                    .children()
                    .find(|child| child.has_tag_name((PRODUCT_NS, name)))
                    .map(|child| child.text().unwrap_or_default().trim().to_string())
            };
            let id = field("id")?;
            Some(ProductRecord {
                id,
                price: field("price").unwrap_or_default(),
            })
        })
        .collect();

    Ok(records)
}

fn read_feed(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| TagError::FeedUnavailable(format!("{}: {e}", path.display())))
}

// == File Feed ==
/// Re-reads and scans the feed file on every lookup.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileFeed {
    fn find_product(&self, id: &str) -> Result<Option<ProductRecord>> {
        let xml = read_feed(&self.path)?;
        let found = parse_feed(&xml)?.into_iter().find(|record| record.id == id);
        debug!(path = %self.path.display(), %id, found = found.is_some(), "feed scanned");
        Ok(found)
    }
}

// == Indexed Feed ==
/// Feed parsed once and indexed by id.
///
/// Duplicate ids keep their first occurrence, matching the linear scan of
/// [`FileFeed`].
#[derive(Debug, Clone, Default)]
pub struct ProductFeed {
    products: HashMap<String, ProductRecord>,
}

impl ProductFeed {
    /// Builds the index from feed XML.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut products = HashMap::new();
        for record in parse_feed(xml)? {
            products.entry(record.id.clone()).or_insert(record);
        }
        Ok(Self { products })
    }

    /// Reads and indexes a feed file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&read_feed(path)?)
    }

    /// Number of distinct product ids.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FeedSource for ProductFeed {
    fn find_product(&self, id: &str) -> Result<Option<ProductRecord>> {
        Ok(self.products.get(id).cloned())
    }
}
