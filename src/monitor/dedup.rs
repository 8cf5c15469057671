use std::collections::HashSet;

use crate::api::RawPair;

/// Keeps only pairs whose address has not been seen this process lifetime.
/// A pair with no address has no filter key and passes through; the
/// processor is the stage that decides what to do with it.
pub fn filter_unseen(raw: Vec<RawPair>, seen: &HashSet<String>) -> Vec<RawPair> {
    raw.into_iter()
        .filter(|pair| match pair.pair_address.as_deref() {
            Some(address) => !seen.contains(address),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(address: &str) -> RawPair {
        RawPair {
            pair_address: Some(address.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_filters_seen_addresses() {
        let mut seen = HashSet::new();
        seen.insert("A1".to_string());

        let unseen = filter_unseen(vec![pair("A1"), pair("B2")], &seen);
        assert_eq!(unseen.len(), 1);
        assert_eq!(unseen[0].pair_address.as_deref(), Some("B2"));
    }

    #[test]
    fn test_missing_address_passes_through() {
        let seen = HashSet::new();
        let unseen = filter_unseen(vec![RawPair::default()], &seen);
        assert_eq!(unseen.len(), 1);
    }

    #[test]
    fn test_empty_seen_set_keeps_everything() {
        let seen = HashSet::new();
        let unseen = filter_unseen(vec![pair("A1"), pair("B2")], &seen);
        assert_eq!(unseen.len(), 2);
    }
}
