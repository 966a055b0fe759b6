//! Synthetic stand-ins for measurements the provider tier does not supply.
//!
//! UV index and precipitation chance are random, air quality and PM2.5 are
//! fixed labels. None of these are real readings. They live here, apart from
//! response normalization, so callers can pass a seeded RNG and get
//! reproducible values.

use rand::Rng;

/// Fixed air quality label shown next to live data
pub const AIR_QUALITY_LABEL: &str = "Good";

/// Fixed PM2.5 reading (µg/m³)
pub const PM25_READING: u16 = 25;

/// Source of synthetic sensor values
pub trait SyntheticSource {
    /// UV index in `1..=11`
    fn uv_index(&mut self) -> u8;

    /// Chance of precipitation in percent, `0..=99`
    fn precipitation_chance(&mut self) -> u8;
}

impl<R: Rng + ?Sized> SyntheticSource for R {
    fn uv_index(&mut self) -> u8 {
        self.gen_range(1..=11)
    }

    fn precipitation_chance(&mut self) -> u8 {
        self.gen_range(0..100)
    }
}
