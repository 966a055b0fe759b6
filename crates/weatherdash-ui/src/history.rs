//! Favorites and recent searches: mutate, persist in full, re-render.

use weatherdash_store::{FavoriteEntry, Favorites, Preferences, RecentSearches, StoreError};
use weatherdash_weather::WeatherSnapshot;

use crate::display::{DisplayPort, Notice};
use crate::error_mapping;
use crate::render::{self, DisplayUnits};

pub const SEARCH_FIRST: &str = "Please search for a city first";
pub const ALREADY_FAVORITE: &str = "Already in favorites";
pub const FAVORITE_ADDED: &str = "Added to favorites!";

pub struct HistoryManager {
    prefs: Preferences,
    favorites: Favorites,
    recent: RecentSearches,
}

impl HistoryManager {
    /// Load both lists from `prefs`
    pub fn load(prefs: Preferences) -> Self {
        let favorites = prefs.favorites();
        let recent = prefs.recent_searches();
        tracing::debug!(
            favorites = favorites.len(),
            recent = recent.len(),
            "Loaded saved lists"
        );
        Self {
            prefs,
            favorites,
            recent,
        }
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    /// Save the city currently on screen.
    ///
    /// Missing snapshots and duplicate cities produce a notice, not an error.
    pub fn add_favorite<D: DisplayPort + ?Sized>(
        &mut self,
        display: &mut D,
        snapshot: Option<&WeatherSnapshot>,
        units: DisplayUnits,
    ) {
        let Some(snapshot) = snapshot else {
            display.notify(Notice::info(SEARCH_FIRST));
            return;
        };

        let entry = FavoriteEntry::new(
            snapshot.city.as_str(),
            snapshot.country.as_str(),
            snapshot.temperature,
        );
        if !self.favorites.add(entry) {
            display.notify(Notice::info(ALREADY_FAVORITE));
            return;
        }

        let saved = self.prefs.save_favorites(&self.favorites);
        self.render_favorites(display, units);
        match saved {
            Ok(()) => display.notify(Notice::success(FAVORITE_ADDED)),
            Err(e) => report_store_failure(display, e),
        }
    }

    /// Remove the favorite at `index` (0-based); out-of-range is a no-op.
    pub fn remove_favorite<D: DisplayPort + ?Sized>(
        &mut self,
        display: &mut D,
        index: usize,
        units: DisplayUnits,
    ) -> Option<FavoriteEntry> {
        let removed = self.favorites.remove(index);
        if removed.is_some() {
            if let Err(e) = self.prefs.save_favorites(&self.favorites) {
                report_store_failure(display, e);
            }
        } else {
            tracing::debug!(index, "Ignoring stale favorite index");
        }
        self.render_favorites(display, units);
        removed
    }

    /// Move `city` to the front of the recent list. Blank names are dropped.
    pub fn record_search<D: DisplayPort + ?Sized>(&mut self, display: &mut D, city: &str) {
        if city.trim().is_empty() {
            tracing::debug!("Ignoring blank search name");
            return;
        }
        self.recent.record(city);
        if let Err(e) = self.prefs.save_recent_searches(&self.recent) {
            report_store_failure(display, e);
        }
        self.render_recent(display);
    }

    pub fn render_favorites<D: DisplayPort + ?Sized>(&self, display: &mut D, units: DisplayUnits) {
        display.set_favorites(&render::favorite_cards(self.favorites.entries(), units));
    }

    pub fn render_recent<D: DisplayPort + ?Sized>(&self, display: &mut D) {
        display.set_recent_searches(&render::recent_tags(self.recent.cities()));
    }
}

fn report_store_failure<D: DisplayPort + ?Sized>(display: &mut D, e: StoreError) {
    let err = error_mapping::from_store(e);
    tracing::error!(error = %err, "Failed to persist list");
    display.notify(Notice::error(err.user_message()));
}
