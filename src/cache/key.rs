//! Cache Key Module
//!
//! Derives cache file names from a product's identity and price.

use super::CACHE_FILE_EXTENSION;

/// Hex md5 digest of `"{product_id}-{price}"`.
///
/// Any change of price yields a new key, so a stale price is never served.
pub fn cache_key(product_id: &str, price: &str) -> String {
    format!("{:x}", md5::compute(format!("{product_id}-{price}")))
}

// == Cache Key ==
/// Location of one rendered image inside the cache directory.
///
/// Images at the fallback size live under `<digest>.png`. Any other size gets
/// its own `<digest>-<w>x<h>.png`, so a product requested at two sizes never
/// serves the bytes of the first size to the second request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    digest: String,
    dimensions: Option<(u32, u32)>,
}

impl CacheKey {
    /// Key of the fallback-size rendering of a product.
    pub fn new(product_id: &str, price: &str) -> Self {
        Self {
            digest: cache_key(product_id, price),
            dimensions: None,
        }
    }

    /// Narrows the key to a specific canvas size.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// File name inside the cache directory.
    pub fn file_name(&self) -> String {
        match self.dimensions {
            None => format!("{}.{CACHE_FILE_EXTENSION}", self.digest),
            Some((w, h)) => format!("{}-{w}x{h}.{CACHE_FILE_EXTENSION}", self.digest),
        }
    }
}
