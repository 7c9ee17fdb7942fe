//! Static office address book. Venue records reference offices by location
//! key; a venue whose key has no entry here cannot be placed on the map and
//! is skipped by the caller.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::LatLng;

const OFFICES_JSON: &str = include_str!("../data/offices.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Office {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    pub lat: f64,
    pub long: f64,
}

impl Office {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.long)
    }

    /// One-line postal address from whichever parts are present; empty when
    /// the record carries coordinates only.
    pub fn address_line(&self) -> String {
        let mut out = String::new();
        if let Some(line1) = self.line1.as_deref() {
            out.push_str(line1);
        }
        let locality = match (self.postcode.as_deref(), self.town.as_deref()) {
            (Some(postcode), Some(town)) => format!("{postcode} {town}"),
            (Some(postcode), None) => postcode.to_string(),
            (None, Some(town)) => town.to_string(),
            (None, None) => String::new(),
        };
        if !out.is_empty() && !locality.is_empty() {
            out.push_str(", ");
        }
        out.push_str(&locality);
        out
    }
}

/// The embedded directory, parsed once.
pub fn directory() -> &'static HashMap<String, Office> {
    static DIRECTORY: OnceLock<HashMap<String, Office>> = OnceLock::new();
    DIRECTORY.get_or_init(|| serde_json::from_str(OFFICES_JSON).expect("parse offices.json"))
}

/// Address-book lookup. A miss is a normal, non-fatal condition.
pub fn lookup(location_key: &str) -> Option<&'static Office> {
    directory().get(location_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_parseable_and_populated() {
        assert!(directory().len() >= 8);
    }

    #[test]
    fn lookup_known_office() {
        let geneva = lookup("Geneva").expect("Geneva office");
        assert!((geneva.lat - 46.2).abs() < 0.1);
        assert!((geneva.long - 6.1).abs() < 0.2);
        assert_eq!(geneva.town.as_deref(), Some("Geneva"));
    }

    #[test]
    fn lookup_miss_is_none() {
        assert!(lookup("Atlantis").is_none());
    }

    #[test]
    fn address_line_joins_present_parts() {
        let geneva = lookup("Geneva").unwrap();
        assert_eq!(geneva.address_line(), "Rue du Rhône 30, 1204 Geneva");

        let coords_only = Office {
            line1: None,
            town: None,
            postcode: None,
            lat: 0.0,
            long: 0.0,
        };
        assert_eq!(coords_only.address_line(), "");

        let town_only = Office {
            town: Some("Geneva".to_string()),
            ..coords_only
        };
        assert_eq!(town_only.address_line(), "Geneva");
    }
}
