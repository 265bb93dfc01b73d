//! Keyword classification as ordered rule lists: the first matching rule wins.

use crate::models::ProductType;

struct KeywordRule<T> {
    keywords: &'static [&'static str],
    result: T,
}

impl<T: Copy> KeywordRule<T> {
    fn apply(&self, haystack: &str) -> Option<T> {
        self.keywords
            .iter()
            .any(|k| haystack.contains(k))
            .then_some(self.result)
    }
}

const CATEGORY_RULES: &[KeywordRule<ProductType>] = &[
    KeywordRule {
        keywords: &[
            "whisky", "whiskey", "vodka", "gin", "rum", "tequila", "bourbon", "scotch", "brandy",
            "cognac",
        ],
        result: ProductType::Spirits,
    },
    KeywordRule {
        keywords: &["beer", "ale", "lager", "stout", "porter"],
        result: ProductType::Beer,
    },
    KeywordRule {
        keywords: &["sake", "junmai", "daiginjo"],
        result: ProductType::Sake,
    },
];

const VARIETALS: &[&str] = &[
    "cabernet sauvignon",
    "merlot",
    "pinot noir",
    "chardonnay",
    "sauvignon blanc",
    "riesling",
    "pinot grigio",
    "syrah",
    "malbec",
    "zinfandel",
    "sangiovese",
    "tempranillo",
    "grenache",
    "nebbiolo",
    "barbera",
    "chianti",
    "bordeaux",
    "burgundy",
    "champagne",
    "prosecco",
    "rosé",
    "red blend",
    "white blend",
];

pub const DEFAULT_VARIETAL: &str = "Red Wine";

fn haystack(name: &str, description: &str) -> String {
    format!("{name} {description}").to_lowercase()
}

/// Category by keyword; spirits are checked before beer, beer before sake,
/// and anything unmatched is wine. Matching is by substring.
pub fn determine_category(name: &str, description: &str) -> ProductType {
    let text = haystack(name, description);
    CATEGORY_RULES
        .iter()
        .find_map(|rule| rule.apply(&text))
        .unwrap_or(ProductType::Wine)
}

/// First known varietal mentioned, title-cased; [`DEFAULT_VARIETAL`] otherwise.
pub fn extract_varietal(name: &str, description: &str) -> String {
    let text = haystack(name, description);
    VARIETALS
        .iter()
        .find(|v| text.contains(*v))
        .map(|v| title_case(v))
        .unwrap_or_else(|| DEFAULT_VARIETAL.to_string())
}

pub(crate) fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_defaults_to_wine() {
        assert_eq!(determine_category("Unbranded Bottle", ""), ProductType::Wine);
    }

    #[test]
    fn spirits_checked_before_beer() {
        assert_eq!(determine_category("Scotch Stout", ""), ProductType::Spirits);
    }

    #[test]
    fn description_participates() {
        assert_eq!(
            determine_category("Dassai 45", "Junmai sake"),
            ProductType::Sake
        );
        assert_eq!(determine_category("Guinness", "Irish dry STOUT"), ProductType::Beer);
        assert_eq!(
            determine_category("Macallan 18", "Single Malt Scotch Whisky"),
            ProductType::Spirits
        );
    }

    #[test]
    fn matching_is_by_substring() {
        // "daiginjo" contains "gin", so the spirits rule fires first
        assert_eq!(determine_category("Dassai 23 Daiginjo", ""), ProductType::Spirits);
    }

    #[test]
    fn varietal_first_match_title_cased() {
        assert_eq!(
            extract_varietal("Caymus Cabernet Sauvignon 2020", "Napa Valley"),
            "Cabernet Sauvignon"
        );
        // "pinot noir" precedes "champagne" in the list
        assert_eq!(
            extract_varietal("Champagne Blanc de Noirs", "100% pinot noir"),
            "Pinot Noir"
        );
        assert_eq!(extract_varietal("Whispering Angel Rosé", ""), "Rosé");
    }

    #[test]
    fn varietal_fallback() {
        assert_eq!(extract_varietal("House Pour", ""), DEFAULT_VARIETAL);
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("sauvignon blanc"), "Sauvignon Blanc");
        assert_eq!(title_case(""), "");
    }
}
