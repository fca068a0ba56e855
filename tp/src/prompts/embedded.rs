//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System instruction: role, day count, required sections
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

/// User query: every trip field in a fixed order
pub const QUERY: &str = include_str!("../../prompts/query.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "system" => {
            debug!("get_embedded: matched system");
            Some(SYSTEM)
        }
        "query" => {
            debug!("get_embedded: matched query");
            Some(QUERY)
        }
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_system() {
        let system = get_embedded("system").unwrap();
        assert!(system.contains("travel-planning AI"));
        assert!(system.contains("Detailed Itinerary"));
        assert!(system.contains("Visa Requirements"));
        assert!(system.contains("Estimated Cost Breakdown"));
        assert!(system.contains("Recommended Attractions"));
    }

    #[test]
    fn test_get_embedded_query() {
        let query = get_embedded("query").unwrap();
        assert!(query.contains("{{destination}}"));
        assert!(query.contains("{{travel_period}}"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
