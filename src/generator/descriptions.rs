use rand::Rng;

use super::pick;
use crate::extractors::slug::slug_base;
use crate::models::ProductType;

pub fn wine_description<R: Rng + ?Sized>(
    rng: &mut R,
    varietal: &str,
    region: &str,
    vintage: i32,
) -> String {
    let templates = [
        format!(
            "Exceptional {varietal} from {region}, vintage {vintage}. \
             A wine of remarkable character and finesse."
        ),
        format!(
            "Classic {region} expression of {varietal}. \
             The {vintage} vintage showcases the terroir beautifully."
        ),
        format!(
            "Premium {varietal} from the prestigious {region} region. \
             {vintage} was an outstanding vintage."
        ),
        format!(
            "Elegant {varietal} representing the finest traditions of {region}. \
             The {vintage} harvest was exceptional."
        ),
    ];
    pick(rng, &templates).clone()
}

pub fn spirit_description<R: Rng + ?Sized>(
    rng: &mut R,
    category: &str,
    region: Option<&str>,
) -> String {
    let templates = match region {
        Some(region) => [
            format!(
                "Premium {category} crafted with traditional methods. \
                 From the renowned {region} region."
            ),
            format!(
                "Exceptional {category} showcasing master distillation. \
                 {region} heritage at its finest."
            ),
            format!(
                "Distinguished {category} with complex character. \
                 Representing {region} excellence."
            ),
            format!("Fine {category} aged to perfection. Classic {region} style."),
        ],
        None => [
            format!("Premium {category} crafted with traditional methods. Artfully distilled."),
            format!("Exceptional {category} showcasing master distillation. Meticulously crafted."),
            format!("Distinguished {category} with complex character. Premium quality spirit."),
            format!("Fine {category} aged to perfection. Expertly balanced."),
        ],
    };
    pick(rng, &templates).clone()
}

pub fn wine_tasting_notes(varietal: &str) -> &'static str {
    match varietal {
        "Cabernet Sauvignon" => {
            "Rich blackcurrant, cedar, and tobacco with firm tannins and a long finish."
        }
        "Pinot Noir" => {
            "Elegant red cherry, earth, and spice with silky texture and bright acidity."
        }
        "Chardonnay" => {
            "Crisp green apple, citrus, and vanilla with creamy texture and mineral finish."
        }
        "Champagne" => "Fine bubbles with notes of brioche, citrus, and subtle yeast complexity.",
        _ => "Complex and well-balanced with excellent structure and length.",
    }
}

const SPIRIT_NOTES: &[(&str, &str)] = &[
    ("Scotch Whisky", "Complex malt with honey, vanilla, and subtle smoke. Long, warming finish."),
    ("Irish Whiskey", "Smooth and approachable with notes of honey, spice, and gentle fruit."),
    ("American Whiskey", "Rich caramel, vanilla, and oak with spicy rye and sweet corn notes."),
    ("Cognac", "Luxurious blend of dried fruits, spice, and oak with elegant complexity."),
];

pub fn spirit_tasting_notes(category: &str) -> &'static str {
    SPIRIT_NOTES
        .iter()
        .find(|(name, _)| category.contains(name))
        .map(|(_, notes)| *notes)
        .unwrap_or("Smooth and complex with rich flavors and a satisfying finish.")
}

pub fn wine_food_pairings(varietal: &str) -> Vec<String> {
    let pairings: &[&str] = match varietal {
        "Cabernet Sauvignon" => &["Grilled Red Meat", "Aged Cheese", "Dark Chocolate"],
        "Pinot Noir" => &["Duck", "Salmon", "Mushroom Dishes"],
        "Chardonnay" => &["Lobster", "Roasted Chicken", "Creamy Pasta"],
        "Champagne" => &["Oysters", "Caviar", "Light Appetizers"],
        _ => &["Fine Dining", "Gourmet Cheese", "Special Occasions"],
    };
    pairings.iter().map(|p| p.to_string()).collect()
}

pub fn wine_serving_temperature(varietal: &str) -> &'static str {
    if varietal.contains("Champagne") || varietal == "Sauvignon Blanc" {
        "6-8°C"
    } else if varietal == "Chardonnay" || varietal == "Pinot Grigio" {
        "8-12°C"
    } else {
        "16-18°C"
    }
}

pub fn wine_aging_potential(varietal: &str, age: u32) -> &'static str {
    if varietal.contains("Cabernet") || varietal.contains("Bordeaux") {
        if age > 15 {
            "Drinking well now, can age further"
        } else {
            "10-20 years"
        }
    } else if varietal == "Pinot Noir" {
        if age > 10 {
            "Drinking well now"
        } else {
            "5-15 years"
        }
    } else if varietal == "Chardonnay" {
        if age > 8 {
            "Drinking well now"
        } else {
            "3-10 years"
        }
    } else {
        "Ready to drink"
    }
}

/// Site-relative bottle shot path, e.g. `/images/wines/krug-champagne.jpg`.
pub fn image_url(kind: ProductType, producer: &str, varietal: &str) -> String {
    let dir = match kind {
        ProductType::Wine => "wines",
        ProductType::Spirits => "spirits",
        ProductType::Beer => "beers",
        ProductType::Sake => "sake",
    };
    format!("/images/{dir}/{}.jpg", slug_base(varietal, producer, None))
}
