//! Search-as-you-type over the tool catalog.
//!
//! Keystrokes settle through a debounce channel before the matcher runs;
//! only the most recent settled query ever reaches the result panel.

pub mod catalog;
pub mod debounce;
pub mod matcher;
pub mod session;
pub mod types;

pub use catalog::{Catalog, CategoryGroup};
pub use debounce::Debouncer;
pub use matcher::{match_catalog, QueryMatcher, SubstringMatcher, MIN_QUERY_CHARS};
pub use session::{Navigator, SearchController, SearchSession, SessionEvent};
pub use types::*;
