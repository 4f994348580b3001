//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key derivation and the put/get contract.

use proptest::prelude::*;
use std::time::Duration;

use crate::cache::{cache_key, CacheKey, ImageCache};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(604_800);

// == Strategies ==
/// Generates product ids accepted by the validator
fn product_id_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,32}".prop_map(|s| s)
}

/// Generates price strings as they appear in feeds
fn price_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\$[0-9]{1,5}\\.[0-9]{2}",
        "[0-9]{1,5},[0-9]{2} EUR",
        "[0-9]{1,6}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Same inputs always produce the same key
    #[test]
    fn prop_key_deterministic(id in product_id_strategy(), price in price_strategy()) {
        prop_assert_eq!(cache_key(&id, &price), cache_key(&id, &price));
        prop_assert_eq!(CacheKey::new(&id, &price), CacheKey::new(&id, &price));
    }

    // A price change for one product always moves it to another key
    #[test]
    fn prop_price_change_changes_key(
        id in product_id_strategy(),
        price1 in price_strategy(),
        price2 in price_strategy()
    ) {
        prop_assume!(price1 != price2);
        prop_assert_ne!(cache_key(&id, &price1), cache_key(&id, &price2));
    }

    // Keys are lowercase hex and never contain path separators
    #[test]
    fn prop_file_name_is_flat(
        id in product_id_strategy(),
        price in ".{0,40}",
        w in 1u32..=2000,
        h in 1u32..=1000
    ) {
        let name = CacheKey::new(&id, &price).with_dimensions(w, h).file_name();
        prop_assert!(!name.contains('/') && !name.contains('\\'));
        prop_assert!(name.ends_with(".png"));
        prop_assert!(cache_key(&id, &price).chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // An immediate get after put returns exactly the stored bytes
    #[test]
    fn prop_roundtrip_storage(
        id in product_id_strategy(),
        price in price_strategy(),
        bytes in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let cache = ImageCache::new(dir.path(), TEST_TTL);
        let key = CacheKey::new(&id, &price);

        cache.put(&key, &bytes).unwrap();
        prop_assert_eq!(cache.get(&key), Some(bytes));
    }
}
