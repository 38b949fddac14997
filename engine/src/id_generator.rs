use rand::Rng;

use crate::SessionId;

const ADJECTIVES: &[&str] = &[
    "Swift", "Brave", "Clever", "Crossed", "Silent", "Golden", "Wild", "Noble",
    "Hollow", "Gentle", "Quick", "Wise", "Bold", "Square", "Cunning", "Sly",
];

const NOUNS: &[&str] = &[
    "Grid", "Corner", "Center", "Diagonal", "Column", "Row", "Cross", "Nought",
    "Square", "Line", "Stripe", "Mark", "Block", "Fork", "Edge", "Tile",
];

pub fn generate_session_id() -> SessionId {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let suffix: u16 = rng.random_range(0..10_000);
    SessionId::new(format!("{}-{}-{:04}", adjective, noun, suffix))
}
