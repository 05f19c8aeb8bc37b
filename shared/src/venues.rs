//! Adapter address → venue name lookup (`data/venues.json`).

use std::collections::HashMap;

use alloy_primitives::Address;
use once_cell::sync::Lazy;

const VENUES_JSON: &str = include_str!("../data/venues.json");

static VENUES: Lazy<HashMap<Address, String>> = Lazy::new(|| {
    let raw: HashMap<String, String> =
        serde_json::from_str(VENUES_JSON).expect("data/venues.json must be a JSON object");
    raw.into_iter()
        .map(|(address, name)| {
            let address = address
                .parse::<Address>()
                .expect("data/venues.json keys must be addresses");
            (address, name)
        })
        .collect()
});

/// Human readable venue for a router adapter, `None` when unknown.
pub fn venue_name(adapter: &Address) -> Option<&'static str> {
    VENUES.get(adapter).map(String::as_str)
}
