use log::warn;

const PRICE_LEVEL_PREFIX: &str = "PRICE_LEVEL_";

/// Decodes a provider price token (`PRICE_LEVEL_MODERATE`, `PRICE_LEVEL_2`, ...)
/// into the 0..=4 scale used by the filters. 0 means free or unknown.
pub fn decode(token: Option<&str>) -> u8 {
    let Some(token) = token else {
        return 0;
    };
    let suffix = token.strip_prefix(PRICE_LEVEL_PREFIX).unwrap_or(token);

    match suffix {
        "FREE" | "UNSPECIFIED" => 0,
        "INEXPENSIVE" => 1,
        "MODERATE" => 2,
        "EXPENSIVE" => 3,
        "VERY_EXPENSIVE" => 4,
        other => other.parse::<u8>().unwrap_or_else(|_| {
            warn!("Unrecognised price level token: {}", token);
            0
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_unspecified_and_missing_are_zero() {
        assert_eq!(decode(Some("PRICE_LEVEL_FREE")), 0);
        assert_eq!(decode(Some("PRICE_LEVEL_UNSPECIFIED")), 0);
        assert_eq!(decode(None), 0);
    }

    #[test]
    fn numeric_suffix_is_parsed() {
        assert_eq!(decode(Some("PRICE_LEVEL_3")), 3);
    }

    #[test]
    fn word_tokens_map_to_tiers() {
        assert_eq!(decode(Some("PRICE_LEVEL_INEXPENSIVE")), 1);
        assert_eq!(decode(Some("PRICE_LEVEL_MODERATE")), 2);
        assert_eq!(decode(Some("PRICE_LEVEL_EXPENSIVE")), 3);
        assert_eq!(decode(Some("PRICE_LEVEL_VERY_EXPENSIVE")), 4);
    }

    #[test]
    fn garbage_is_treated_as_unknown() {
        assert_eq!(decode(Some("PRICE_LEVEL_LUDICROUS")), 0);
        assert_eq!(decode(Some("")), 0);
    }
}
