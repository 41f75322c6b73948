use std::collections::HashMap;

use log::debug;

pub const GENERIC_RESTAURANT_TYPE: &str = "restaurant";

lazy_static::lazy_static! {
    /// Cuisine labels offered by the form, lowercased, to Places type tokens.
    /// Labels without a provider type ("Belgian", "Cajun", ...) are left out on purpose.
    static ref CUISINE_TYPES: HashMap<&'static str, &'static str> = HashMap::from([
        ("american", "american_restaurant"),
        ("asian fusion", "asian_restaurant"),
        ("barbecue", "barbecue_restaurant"),
        ("brazilian", "brazilian_restaurant"),
        ("breakfast & brunch", "breakfast_restaurant"),
        ("chinese", "chinese_restaurant"),
        ("desserts", "dessert_restaurant"),
        ("ethiopian", "african_restaurant"),
        ("french", "french_restaurant"),
        ("greek", "greek_restaurant"),
        ("hong kong", "chinese_restaurant"),
        ("indian", "indian_restaurant"),
        ("indonesian", "indonesian_restaurant"),
        ("italian", "italian_restaurant"),
        ("japanese", "japanese_restaurant"),
        ("kebab", "turkish_restaurant"),
        ("korean", "korean_restaurant"),
        ("lebanese", "lebanese_restaurant"),
        ("mediterranean", "mediterranean_restaurant"),
        ("mexican", "mexican_restaurant"),
        ("middle eastern", "middle_eastern_restaurant"),
        ("pizza", "pizza_restaurant"),
        ("ramen", "ramen_restaurant"),
        ("seafood", "seafood_restaurant"),
        ("south african", "african_restaurant"),
        ("spanish", "spanish_restaurant"),
        ("steakhouse", "steak_house"),
        ("sushi", "sushi_restaurant"),
        ("tapas", "spanish_restaurant"),
        ("tex-mex", "mexican_restaurant"),
        ("thai", "thai_restaurant"),
        ("turkish", "turkish_restaurant"),
        ("vegan", "vegan_restaurant"),
        ("vegetarian", "vegetarian_restaurant"),
        ("vietnamese", "vietnamese_restaurant"),
        ("west african", "african_restaurant"),
    ]);
}

/// Maps cuisine labels to provider type tokens. The provider ORs the tokens,
/// so a place matching any one of them qualifies.
///
/// Never returns an empty list: with no mappable label the search falls back
/// to the generic `restaurant` type.
pub fn map_cuisines<S: AsRef<str>>(labels: &[S]) -> Vec<&'static str> {
    let mut tokens: Vec<&'static str> = Vec::new();
    for label in labels {
        let key = label.as_ref().trim().to_lowercase();
        match CUISINE_TYPES.get(key.as_str()) {
            Some(token) if !tokens.contains(token) => tokens.push(token),
            Some(_) => {}
            None => debug!("Dropping unmapped cuisine label: {:?}", label.as_ref()),
        }
    }

    if tokens.is_empty() {
        tokens.push(GENERIC_RESTAURANT_TYPE);
    }
    tokens
}
