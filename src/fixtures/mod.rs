//! Random fixture data.
//!
//! Names and slugs are randomized per run so repeated runs against the shared
//! remote service don't collide on the unique slug constraint.

use rand::Rng;
use rand::distr::Alphanumeric;

const LAST_NAMES: [&str; 48] = [
    "Abbott", "Bartell", "Becker", "Bernhard", "Bogan", "Carroll", "Collins", "Cronin",
    "Daniel", "Dietrich", "Durgan", "Ebert", "Feeney", "Fisher", "Gibson", "Goodwin",
    "Grant", "Hagenes", "Hahn", "Hammes", "Hermiston", "Howe", "Jacobs", "Jast",
    "Kemmer", "Koch", "Kuhn", "Larkin", "Lowe", "Marvin", "Mohr", "Nader",
    "O'Keefe", "Okuneva", "Pagac", "Quigley", "Reichel", "Ritchie", "Rolfson", "Sauer",
    "Schinner", "Stark", "Torp", "Ullrich", "Veum", "Walsh", "Wiza", "Zulauf",
];

const COMPANY_SUFFIXES: [&str; 4] = ["Inc", "and Sons", "LLC", "Group"];

const LOREM_WORDS: [&str; 32] = [
    "alias", "amet", "aut", "beatae", "commodi", "culpa", "dolor", "dolores",
    "eius", "enim", "error", "esse", "fugit", "harum", "illum", "ipsam",
    "labore", "magni", "minus", "molestiae", "nemo", "nihil", "odio", "omnis",
    "quasi", "quia", "quod", "ratione", "rerum", "sint", "totam", "velit",
];

const UNIQUE_TOKEN_LEN: usize = 6;

/// A name/slug pair for creating a brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandFixture {
    pub name: String,
    pub slug: String,
}

impl BrandFixture {
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Slug is the slugified name plus a short random token.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let name = company_name_with(rng);
        let slug = format!("{}-{}", slugify(&name), unique_token(rng));
        Self { name, slug }
    }
}

pub fn company_name_with<R: Rng>(rng: &mut R) -> String {
    match rng.random_range(0..3) {
        0 => format!("{} {}", pick(rng, &LAST_NAMES), pick(rng, &COMPANY_SUFFIXES)),
        1 => format!("{} - {}", pick(rng, &LAST_NAMES), pick(rng, &LAST_NAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, &LAST_NAMES),
            pick(rng, &LAST_NAMES),
            pick(rng, &LAST_NAMES)
        ),
    }
}

pub fn lorem_slug() -> String {
    lorem_slug_with(&mut rand::rng())
}

pub fn lorem_slug_with<R: Rng>(rng: &mut R) -> String {
    let words: Vec<&str> = (0..3).map(|_| pick(rng, &LOREM_WORDS)).collect();
    format!("{}-{}", words.join("-"), unique_token(rng))
}

/// Spaces become dashes; anything outside `[A-Za-z0-9_-]` is dropped.
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| is_slug_char(*c))
        .collect()
}

pub fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn unique_token<R: Rng>(rng: &mut R) -> String {
    (0..UNIQUE_TOKEN_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect()
}

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}
