//! Request DTOs for the price-tag API
//!
//! Defines the query string of the image endpoint and its validated form.

use crate::config::Config;
use crate::error::{Result, TagError};
use crate::validate::{trim_param, validate_height, validate_product_id, validate_width};

/// Raw query parameters of the image endpoint (`GET /image?id=..&w=..&h=..`)
///
/// Everything is kept as text so malformed numbers surface as
/// `InvalidWidth`/`InvalidHeight` instead of an extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageQuery {
    /// Product identifier, required
    pub id: Option<String>,
    /// Canvas width
    pub w: Option<String>,
    /// Canvas height
    pub h: Option<String>,
}

/// A request that passed validation and is ready for feed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub product_id: String,
    pub width: u32,
    pub height: u32,
}

impl ImageQuery {
    /// Builds a query from its parts, mostly for tests and callers outside axum.
    pub fn new(id: Option<&str>, w: Option<&str>, h: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            w: w.map(str::to_string),
            h: h.map(str::to_string),
        }
    }

    /// Decodes a URL query string (without the leading `?`).
    ///
    /// Never fails: undecodable bytes are replaced, unknown keys are ignored
    /// and a repeated key keeps its last value.
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "id" => &mut query.id,
                "w" => &mut query.w,
                "h" => &mut query.h,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        query
    }

    /// Validates all three parameters.
    ///
    /// Absent dimensions fall back to the configured defaults, which are
    /// taken as-is. Present dimensions must be within the configured bounds.
    pub fn validate(&self, config: &Config) -> Result<RenderRequest> {
        let raw_id = self.id.as_deref().map(trim_param).unwrap_or_default();
        if raw_id.is_empty() {
            return Err(TagError::MissingId);
        }
        let product_id = validate_product_id(raw_id)?;

        let width = match self.w.as_deref() {
            Some(raw) => validate_width(raw, config.max_width)?,
            None => config.fallback_width,
        };
        let height = match self.h.as_deref() {
            Some(raw) => validate_height(raw, config.max_height)?,
            None => config.fallback_height,
        };

        Ok(RenderRequest {
            product_id,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let req = ImageQuery::new(Some("sku-123"), None, None)
            .validate(&Config::default())
            .unwrap();
        assert_eq!(
            req,
            RenderRequest {
                product_id: "sku-123".to_string(),
                width: 1000,
                height: 1415,
            }
        );
    }

    #[test]
    fn test_missing_and_blank_id() {
        let config = Config::default();
        assert_eq!(
            ImageQuery::new(None, None, None).validate(&config),
            Err(TagError::MissingId)
        );
        assert_eq!(
            ImageQuery::new(Some("   "), None, None).validate(&config),
            Err(TagError::MissingId)
        );
    }

    #[test]
    fn test_id_is_trimmed_before_validation() {
        let req = ImageQuery::new(Some(" sku-1 "), Some("10"), Some("20"))
            .validate(&Config::default())
            .unwrap();
        assert_eq!(req.product_id, "sku-1");
        assert_eq!((req.width, req.height), (10, 20));
    }

    #[test]
    fn test_invalid_parameters() {
        let config = Config::default();
        assert_eq!(
            ImageQuery::new(Some("../etc/passwd"), None, None).validate(&config),
            Err(TagError::InvalidId)
        );
        assert_eq!(
            ImageQuery::new(Some("sku-123"), Some("5000"), None).validate(&config),
            Err(TagError::InvalidWidth)
        );
        assert_eq!(
            ImageQuery::new(Some("sku-123"), None, Some("")).validate(&config),
            Err(TagError::InvalidHeight)
        );
    }

    #[test]
    fn test_only_ascii_whitespace_is_trimmed() {
        let config = Config::default();
        assert_eq!(
            ImageQuery::new(Some("\t\r\n\x0Bsku-1\0 "), None, None)
                .validate(&config)
                .map(|req| req.product_id),
            Ok("sku-1".to_string())
        );
        // U+3000 ideographic space is not stripped, so the id is rejected
        assert_eq!(
            ImageQuery::new(Some("\u{3000}sku-123"), None, None).validate(&config),
            Err(TagError::InvalidId)
        );
        assert_eq!(
            ImageQuery::new(Some("sku-123"), Some("\u{00A0}12"), None).validate(&config),
            Err(TagError::InvalidWidth)
        );
    }

    #[test]
    fn test_from_query_string() {
        let query = ImageQuery::from_query_string("id=sku-123&w=12&extra=1");
        assert_eq!(query, ImageQuery::new(Some("sku-123"), Some("12"), None));

        let decoded = ImageQuery::from_query_string("id=%E3%80%80a+b&h=%31");
        assert_eq!(decoded.id.as_deref(), Some("\u{3000}a b"));
        assert_eq!(decoded.h.as_deref(), Some("1"));

        assert_eq!(ImageQuery::from_query_string(""), ImageQuery::default());
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let query = ImageQuery::from_query_string("id=a&w=1&id=sku-123&w=2");
        assert_eq!(query, ImageQuery::new(Some("sku-123"), Some("2"), None));

        let blanked = ImageQuery::from_query_string("id=sku-123&id=");
        assert_eq!(
            blanked.validate(&Config::default()),
            Err(TagError::MissingId)
        );
    }
}
