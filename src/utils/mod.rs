pub mod id;
pub mod numbers;

pub use id::generate_id;
pub use numbers::{count_matches, generate_winning_numbers, validate_numbers};
