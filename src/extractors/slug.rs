use rand::Rng;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

const MAX_BASE_LEN: usize = 100;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);
static PROCESS_TOKEN: LazyLock<u32> = LazyLock::new(|| rand::rng().random());

/// URL slug for a product: `producer name [vintage]`, normalized, plus a
/// suffix unique within the process (monotonic counter) and across runs
/// (random per-process token).
pub fn generate_slug(name: &str, producer: &str, vintage: Option<i32>) -> String {
    let base = slug_base(name, producer, vintage);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let suffix = format!("{:08x}{:04x}", *PROCESS_TOKEN, seq);

    if base.is_empty() {
        suffix
    } else {
        format!("{base}-{suffix}")
    }
}

/// Deterministic part of [`generate_slug`]. Accented Latin letters are
/// folded (`Château` becomes `chateau`, `Łódź` becomes `lodz`); any other
/// character outside `[a-z0-9\s-]` is dropped, so non-Latin scripts do not
/// reach the slug.
pub fn slug_base(name: &str, producer: &str, vintage: Option<i32>) -> String {
    let mut joined = format!("{producer} {name}");
    if let Some(year) = vintage {
        joined.push(' ');
        joined.push_str(&year.to_string());
    }

    let kept: String = joined
        .to_lowercase()
        .chars()
        .flat_map(fold_accent)
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-'
        })
        .collect();

    let mut slug = kept.split_whitespace().collect::<Vec<_>>().join("-");
    slug = slug.trim_matches('-').to_string();
    if slug.len() > MAX_BASE_LEN {
        slug.truncate(MAX_BASE_LEN);
        slug = slug.trim_end_matches('-').to_string();
    }
    slug
}

fn fold_accent(c: char) -> Vec<char> {
    let folded: &str = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'ł' | 'ľ' | 'ĺ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ř' => "r",
        'ś' | 'š' | 'ş' | 'ș' => "s",
        'ß' => "ss",
        'ť' | 'ţ' | 'ț' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return vec![c],
    };
    folded.chars().collect()
}
