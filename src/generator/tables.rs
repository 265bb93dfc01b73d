//! Curated reference data the generator draws from.

pub struct WineRegion {
    pub name: &'static str,
    pub varietals: &'static [&'static str],
    /// Empty when no producers are curated; the generic pool is used instead.
    pub producers: &'static [&'static str],
    pub price_floor: f64,
}

pub enum SpiritStyle {
    Aged(&'static [u32]),
    Typed(&'static [&'static str]),
    Graded(&'static [&'static str]),
}

pub struct SpiritCategory {
    pub name: &'static str,
    pub regions: &'static [&'static str],
    pub style: SpiritStyle,
    pub producers: &'static [&'static str],
    pub price_floor: f64,
}

const STANDARD_WINE_FLOOR: f64 = 50.0;
const STANDARD_SPIRIT_FLOOR: f64 = 60.0;
const WHISKY_FLOOR: f64 = 100.0;

pub const WINE_REGIONS: &[WineRegion] = &[
    WineRegion {
        name: "Bordeaux, France",
        varietals: &["Cabernet Sauvignon", "Merlot", "Cabernet Franc", "Petit Verdot"],
        producers: &[
            "Château Margaux",
            "Château Lafite Rothschild",
            "Château Latour",
            "Château Haut-Brion",
            "Château Mouton Rothschild",
            "Château Pichon Baron",
            "Château Lynch-Bages",
        ],
        price_floor: 200.0,
    },
    WineRegion {
        name: "Burgundy, France",
        varietals: &["Pinot Noir", "Chardonnay"],
        producers: &[
            "Domaine de la Romanée-Conti",
            "Domaine Leroy",
            "Domaine Armand Rousseau",
            "Domaine Georges Roumier",
            "Domaine Coche-Dury",
        ],
        price_floor: 200.0,
    },
    WineRegion {
        name: "Champagne, France",
        varietals: &["Champagne", "Blanc de Blancs", "Blanc de Noirs"],
        producers: &["Dom Pérignon", "Krug", "Louis Roederer", "Bollinger", "Pol Roger"],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Tuscany, Italy",
        varietals: &["Sangiovese", "Chianti", "Brunello di Montalcino"],
        producers: &["Antinori", "Ornellaia", "Sassicaia", "Solaia", "Tignanello"],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Piedmont, Italy",
        varietals: &["Nebbiolo", "Barolo", "Barbaresco"],
        producers: &[],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Napa Valley, California",
        varietals: &["Cabernet Sauvignon", "Chardonnay", "Merlot"],
        producers: &["Screaming Eagle", "Harlan Estate", "Opus One", "Caymus", "Silver Oak"],
        price_floor: 150.0,
    },
    WineRegion {
        name: "Sonoma County, California",
        varietals: &["Pinot Noir", "Zinfandel", "Chardonnay"],
        producers: &["Williams Selyem", "Rochioli", "Kosta Browne"],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Willamette Valley, Oregon",
        varietals: &["Pinot Noir", "Pinot Gris"],
        producers: &[],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Rioja, Spain",
        varietals: &["Tempranillo", "Garnacha"],
        producers: &[],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Douro, Portugal",
        varietals: &["Port", "Touriga Nacional"],
        producers: &[],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Barossa Valley, Australia",
        varietals: &["Shiraz", "Grenache"],
        producers: &[],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Marlborough, New Zealand",
        varietals: &["Sauvignon Blanc", "Pinot Noir"],
        producers: &[],
        price_floor: STANDARD_WINE_FLOOR,
    },
    WineRegion {
        name: "Mosel, Germany",
        varietals: &["Riesling", "Gewürztraminer"],
        producers: &[],
        price_floor: STANDARD_WINE_FLOOR,
    },
];

pub const GENERIC_WINE_PRODUCERS: &[&str] =
    &["Estate Winery", "Domaine Vineyard", "Château Estate"];

pub const SPIRIT_CATEGORIES: &[SpiritCategory] = &[
    SpiritCategory {
        name: "Scotch Whisky",
        regions: &["Speyside", "Highlands", "Islay", "Lowlands", "Campbeltown"],
        style: SpiritStyle::Aged(&[12, 15, 18, 21, 25, 30]),
        producers: &[
            "Macallan",
            "Glenfiddich",
            "Balvenie",
            "Ardbeg",
            "Lagavulin",
            "Glenlivet",
            "Highland Park",
        ],
        price_floor: WHISKY_FLOOR,
    },
    SpiritCategory {
        name: "Irish Whiskey",
        regions: &["Dublin", "Cork", "Antrim"],
        style: SpiritStyle::Aged(&[12, 15, 18, 21]),
        producers: &["Redbreast", "Green Spot", "Jameson", "Tullamore Dew"],
        price_floor: WHISKY_FLOOR,
    },
    SpiritCategory {
        name: "American Whiskey",
        regions: &["Kentucky", "Tennessee", "Indiana"],
        style: SpiritStyle::Typed(&["Bourbon", "Rye", "Single Malt"]),
        producers: &["Pappy Van Winkle", "Buffalo Trace", "Maker's Mark", "Woodford Reserve"],
        price_floor: WHISKY_FLOOR,
    },
    SpiritCategory {
        name: "Cognac",
        regions: &["Grande Champagne", "Petite Champagne", "Borderies"],
        style: SpiritStyle::Graded(&["VS", "VSOP", "XO", "XXO"]),
        producers: &["Hennessy", "Rémy Martin", "Martell", "Courvoisier"],
        price_floor: 150.0,
    },
    SpiritCategory {
        name: "Rum",
        regions: &["Jamaica", "Barbados", "Cuba", "Guatemala"],
        style: SpiritStyle::Aged(&[8, 12, 15, 18, 21]),
        producers: &["Mount Gay", "Appleton Estate", "Zacapa", "Diplomatico"],
        price_floor: STANDARD_SPIRIT_FLOOR,
    },
    SpiritCategory {
        name: "Tequila",
        regions: &["Jalisco", "Nayarit", "Guanajuato"],
        style: SpiritStyle::Typed(&["Blanco", "Reposado", "Añejo", "Extra Añejo"]),
        producers: &["Herradura", "Patrón", "Don Julio", "Casa Noble"],
        price_floor: STANDARD_SPIRIT_FLOOR,
    },
];

pub const GENERIC_SPIRIT_PRODUCERS: &[&str] =
    &["Artisan Distillery", "Heritage Spirits", "Premium Distillers"];

/// Producer-prestige multipliers, first substring match applies.
pub const WINE_PRODUCER_PREMIUMS: &[(&str, f64)] = &[
    ("Château Margaux", 5.0),
    ("Romanée-Conti", 5.0),
    ("DRC", 5.0),
    ("Screaming Eagle", 3.0),
    ("Harlan", 3.0),
];

pub const SPIRIT_BRAND_PREMIUMS: &[(&str, f64)] = &[("Macallan", 2.0), ("Pappy", 2.0)];

pub const WINE_VOLUME_ML: u32 = 750;
pub const SPIRIT_VOLUMES_ML: &[u32] = &[700, 750, 1000];

impl WineRegion {
    pub fn producer_pool(&self) -> &'static [&'static str] {
        if self.producers.is_empty() {
            GENERIC_WINE_PRODUCERS
        } else {
            self.producers
        }
    }
}

impl SpiritCategory {
    pub fn producer_pool(&self) -> &'static [&'static str] {
        if self.producers.is_empty() {
            GENERIC_SPIRIT_PRODUCERS
        } else {
            self.producers
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_is_drawable() {
        for region in WINE_REGIONS {
            assert!(!region.varietals.is_empty(), "{}", region.name);
            assert!(!region.producer_pool().is_empty(), "{}", region.name);
        }
        for category in SPIRIT_CATEGORIES {
            assert!(!category.regions.is_empty(), "{}", category.name);
            assert!(!category.producer_pool().is_empty(), "{}", category.name);
            let options = match category.style {
                SpiritStyle::Aged(ages) => ages.len(),
                SpiritStyle::Typed(types) => types.len(),
                SpiritStyle::Graded(grades) => grades.len(),
            };
            assert!(options > 0, "{}", category.name);
        }
    }

    #[test]
    fn uncurated_region_falls_back_to_generic_pool() {
        let rioja = WINE_REGIONS.iter().find(|r| r.name.starts_with("Rioja")).unwrap();
        assert_eq!(rioja.producer_pool(), GENERIC_WINE_PRODUCERS);
    }

    #[test]
    fn uncurated_spirit_category_falls_back_to_generic_pool() {
        let category = SpiritCategory {
            name: "Brandy",
            regions: &["Armenia"],
            style: SpiritStyle::Aged(&[10]),
            producers: &[],
            price_floor: 40.0,
        };
        assert_eq!(category.producer_pool(), GENERIC_SPIRIT_PRODUCERS);

        let curated = SPIRIT_CATEGORIES.iter().find(|c| !c.producers.is_empty()).unwrap();
        assert_eq!(curated.producer_pool(), curated.producers);
    }
}
