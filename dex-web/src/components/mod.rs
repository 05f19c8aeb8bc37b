//! UI Components

pub mod coin_input;
pub mod coin_selector;
pub mod navbar;

pub use coin_input::CoinInput;
pub use navbar::Navbar;
