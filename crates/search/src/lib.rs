pub mod controller;
pub mod lookup;

pub use controller::{DEFAULT_DEBOUNCE, HeroSearch, SearchResults};
pub use lookup::HeroLookup;
