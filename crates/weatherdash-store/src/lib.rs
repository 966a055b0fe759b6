//! Local preference storage for weatherdash.
//!
//! A string-keyed [`KeyValueStore`] (SQLite on disk, or in memory) holds
//! every cross-session value. [`Preferences`] gives typed access to the
//! known keys; [`Favorites`] and [`RecentSearches`] enforce the list rules.

pub mod error;
pub mod kv;
pub mod lists;
pub mod preferences;
pub mod sqlite;

pub use error::StoreError;
pub use kv::{KeyValueStore, MemoryStore};
pub use lists::{FavoriteEntry, Favorites, RecentSearches, RECENT_SEARCH_LIMIT};
pub use preferences::{Preferences, TemperatureUnit, WindUnit};
pub use sqlite::SqliteStore;
