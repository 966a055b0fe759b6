//! Favorites and recent-search lists.

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of remembered searches
pub const RECENT_SEARCH_LIMIT: usize = 5;

/// A saved city with the temperature it had when it was saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub city: String,
    pub country: String,
    #[serde(deserialize_with = "rounded_temperature")]
    pub temperature: i32,
}

impl FavoriteEntry {
    pub fn new(city: impl Into<String>, country: impl Into<String>, temperature: i32) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            temperature,
        }
    }
}

// Older saves may hold fractional temperatures.
fn rounded_temperature<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok((value + 0.5).floor() as i32)
}

/// Insertion-ordered favorites, at most one per city (exact, case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    /// Build from stored entries, dropping later duplicates of a city.
    pub fn from_entries(entries: Vec<FavoriteEntry>) -> Self {
        let mut favorites = Self::default();
        for entry in entries {
            favorites.add(entry);
        }
        favorites
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FavoriteEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.entries.iter().any(|e| e.city == city)
    }

    /// Append `entry` unless its city is already saved. Returns whether it was added.
    pub fn add(&mut self, entry: FavoriteEntry) -> bool {
        if self.contains(&entry.city) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove by position; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<FavoriteEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }
}

/// Searched city names, most recent first, no duplicates, capped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    cities: Vec<String>,
}

impl RecentSearches {
    /// Build from stored names, applying the same rules as `record`.
    pub fn from_cities(cities: Vec<String>) -> Self {
        let mut recent = Self::default();
        for city in cities.into_iter().rev() {
            recent.record(&city);
        }
        recent
    }

    /// Move `city` to the front, evicting the oldest past the limit.
    /// Blank names are ignored.
    pub fn record(&mut self, city: &str) {
        if city.trim().is_empty() {
            return;
        }
        self.cities.retain(|c| c != city);
        self.cities.insert(0, city.to_string());
        self.cities.truncate(RECENT_SEARCH_LIMIT);
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.cities.first().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cities.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_same_city_twice() {
        let mut recent = RecentSearches::default();
        recent.record("Paris");
        recent.record("Paris");
        assert_eq!(recent.cities(), ["Paris"]);
    }

    #[test]
    fn test_record_moves_existing_to_front() {
        let mut recent = RecentSearches::default();
        recent.record("Paris");
        recent.record("Rome");
        recent.record("Paris");
        assert_eq!(recent.cities(), ["Paris", "Rome"]);
    }

    #[test]
    fn test_record_caps_at_five() {
        let mut recent = RecentSearches::default();
        for city in ["A", "B", "C", "D", "E", "F"] {
            recent.record(city);
        }
        assert_eq!(recent.cities(), ["F", "E", "D", "C", "B"]);
        assert_eq!(recent.most_recent(), Some("F"));
    }

    #[test]
    fn test_record_is_case_sensitive() {
        let mut recent = RecentSearches::default();
        recent.record("paris");
        recent.record("Paris");
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_from_cities_preserves_order_and_cap() {
        let stored = ["A", "B", "A", "C", "D", "E", "F", "G"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let recent = RecentSearches::from_cities(stored);
        assert_eq!(recent.cities(), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_blank_names_are_not_recorded() {
        let mut recent = RecentSearches::default();
        recent.record("Paris");
        recent.record("");
        recent.record("  ");
        assert_eq!(recent.most_recent(), Some("Paris"));

        let stored = vec!["".to_string(), "Lima".to_string()];
        assert_eq!(RecentSearches::from_cities(stored).cities(), ["Lima"]);
    }

    #[test]
    fn test_add_favorite_rejects_same_city() {
        let mut favorites = Favorites::default();
        assert!(favorites.add(FavoriteEntry::new("Tokyo", "JP", 20)));
        assert!(!favorites.add(FavoriteEntry::new("Tokyo", "JP", 25)));
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites.entries()[0].temperature, 20);
    }

    #[test]
    fn test_favorite_match_is_exact() {
        let mut favorites = Favorites::default();
        favorites.add(FavoriteEntry::new("Tokyo", "JP", 20));
        assert!(favorites.add(FavoriteEntry::new("tokyo", "JP", 20)));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_remove_favorite() {
        let mut favorites = Favorites::from_entries(vec![
            FavoriteEntry::new("Oslo", "NO", 3),
            FavoriteEntry::new("Rome", "IT", 22),
        ]);
        let removed = favorites.remove(0).unwrap();
        assert_eq!(removed.city, "Oslo");
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites.get(0).unwrap().city, "Rome");
    }

    #[test]
    fn test_remove_stale_index_is_noop() {
        let mut favorites = Favorites::from_entries(vec![FavoriteEntry::new("Oslo", "NO", 3)]);
        assert!(favorites.remove(4).is_none());
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_fractional_temperature_is_rounded() {
        let entry: FavoriteEntry =
            serde_json::from_str(r#"{"city":"Lima","country":"PE","temperature":18.5}"#).unwrap();
        assert_eq!(entry.temperature, 19);
    }
}
