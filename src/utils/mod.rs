pub mod ip;
pub mod token;

pub use token::{is_valid_token, new_token};
