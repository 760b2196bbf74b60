//! Universe settings and builder
//!
//! This module provides the configuration consumed by the generator: grid
//! dimensions and one quota entry per race.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, UniverseError};

/// Smallest accepted grid width or height
pub const MIN_GRID_DIMENSION: u8 = 5;

/// Largest accepted grid width or height (coordinates fit in one byte)
pub const MAX_GRID_DIMENSION: u8 = 255;

/// Default grid width, matching the classic 22×17 sector map
pub const DEFAULT_WIDTH: u8 = 22;

/// Default grid height
pub const DEFAULT_HEIGHT: u8 = 17;

/// Factions that can own clusters
///
/// Each race keeps the stable byte code used by the classic sector map format,
/// so codes are not contiguous.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Race {
    /// Argon Federation
    Argon,
    /// Boron Kingdom
    Boron,
    /// Split Dynasty
    Split,
    /// Paranid Empire
    Paranid,
    /// Teladi Company
    Teladi,
    /// Xenon
    Xenon,
    /// Kha'ak
    Khaak,
    /// Pirate clans
    Pirates,
    /// Unclaimed / unknown sectors
    Unknown,
    /// Terran Conflict
    Terran,
    /// Yaki
    Yaki,
}

impl Race {
    /// Every race, in stock display order
    pub const ALL: [Race; 11] = [
        Race::Argon,
        Race::Boron,
        Race::Split,
        Race::Paranid,
        Race::Teladi,
        Race::Xenon,
        Race::Khaak,
        Race::Pirates,
        Race::Unknown,
        Race::Terran,
        Race::Yaki,
    ];

    /// Stable byte code of this race
    pub fn code(self) -> u8 {
        match self {
            Race::Argon => 1,
            Race::Boron => 2,
            Race::Split => 3,
            Race::Paranid => 4,
            Race::Teladi => 5,
            Race::Xenon => 6,
            Race::Khaak => 7,
            Race::Pirates => 8,
            Race::Unknown => 14,
            Race::Terran => 17,
            Race::Yaki => 19,
        }
    }

    /// Look a race up by its byte code
    pub fn from_code(code: u8) -> Option<Race> {
        Race::ALL.into_iter().find(|race| race.code() == code)
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Race::Argon => "Argon",
            Race::Boron => "Boron",
            Race::Split => "Split",
            Race::Paranid => "Paranid",
            Race::Teladi => "Teladi",
            Race::Xenon => "Xenon",
            Race::Khaak => "Khaak",
            Race::Pirates => "Pirates",
            Race::Unknown => "Unknown",
            Race::Terran => "Terran",
            Race::Yaki => "Yaki",
        }
    }

    /// Single-letter glyph used by the ASCII map
    pub fn glyph(self) -> char {
        match self {
            Race::Argon => 'a',
            Race::Boron => 'b',
            Race::Split => 's',
            Race::Paranid => 'p',
            Race::Teladi => 't',
            Race::Xenon => 'x',
            Race::Khaak => 'k',
            Race::Pirates => 'r',
            Race::Unknown => 'u',
            Race::Terran => 'e',
            Race::Yaki => 'y',
        }
    }
}

/// Display color of a race
///
/// Opaque to the generator; carried for renderers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RaceColor(pub [u8; 3]);

impl RaceColor {
    /// Parse a `#rrggbb` hex string
    ///
    /// # Errors
    ///
    /// Returns `InvalidColor` if the string is not exactly `#` followed by six hex digits
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| UniverseError::InvalidColor(hex.to_string()))?;

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| UniverseError::InvalidColor(hex.to_string()))
        };

        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Format as `#rrggbb`
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Convert to normalized RGBA with full opacity
    pub fn to_rgba(self) -> [f32; 4] {
        let [r, g, b] = self.0;
        [
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            1.0,
        ]
    }
}

/// Quotas for one race
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceSettings {
    /// Which faction these quotas belong to
    pub race: Race,

    /// Display color, ignored by the generator
    pub color: RaceColor,

    /// Upper bound on sectors claimed by all clusters of this race together
    pub max_race_size: u32,

    /// Number of cluster seeds requested (0 = race takes no part)
    pub max_clusters: u32,

    /// Upper bound on the size of each individual cluster
    pub max_cluster_size: u32,
}

impl RaceSettings {
    /// Create race settings with the race's stock color
    pub fn new(race: Race, max_race_size: u32, max_clusters: u32, max_cluster_size: u32) -> Self {
        Self {
            race,
            color: Self::preset(race).color,
            max_race_size,
            max_clusters,
            max_cluster_size,
        }
    }

    /// Stock quotas for a race
    pub fn preset(race: Race) -> Self {
        let (color, max_race_size, max_clusters, max_cluster_size) = match race {
            Race::Argon => ([0x1e, 0x1e, 0xe1], 32, 3, 16),
            Race::Boron => ([0x1e, 0xe1, 0x1e], 27, 5, 7),
            Race::Split => ([0xe1, 0x1e, 0xe1], 31, 4, 13),
            Race::Paranid => ([0x1e, 0xe1, 0xe1], 27, 2, 14),
            Race::Teladi => ([0xe1, 0xe1, 0x1e], 30, 4, 9),
            Race::Xenon => ([0xe1, 0x1e, 0x1e], 10, 6, 4),
            Race::Khaak => ([0x70, 0x1e, 0xe1], 3, 3, 1),
            Race::Pirates => ([0xe1, 0x70, 0x1e], 20, 8, 8),
            Race::Unknown => ([0xa0, 0xa0, 0xa0], 13, 11, 2),
            Race::Terran => ([0xdf, 0xff, 0xbf], 21, 1, 21),
            Race::Yaki => ([0xff, 0xbf, 0xdf], 3, 1, 3),
        };

        Self {
            race,
            color: RaceColor(color),
            max_race_size,
            max_clusters,
            max_cluster_size,
        }
    }

    /// Override the display color
    pub fn with_color(mut self, color: RaceColor) -> Self {
        self.color = color;
        self
    }

    /// Whether this race takes part in generation
    #[inline]
    pub fn is_active(&self) -> bool {
        self.max_clusters > 0
    }

    /// Check the quotas of this race on their own
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if an active race allows clusters smaller than one
    /// sector, or requests more clusters than its total size cap can hold
    pub fn validate(&self) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        if self.max_cluster_size < 1 {
            return Err(UniverseError::InvalidConfig(format!(
                "{} requests {} clusters but max cluster size is 0",
                self.race.name(),
                self.max_clusters
            )));
        }
        if self.max_clusters > self.max_race_size {
            return Err(UniverseError::InvalidConfig(format!(
                "{} requests {} clusters but may only own {} sectors",
                self.race.name(),
                self.max_clusters,
                self.max_race_size
            )));
        }
        Ok(())
    }
}

/// Settings for one generation run
///
/// The same settings with the same random seed always produce the identical
/// universe.
///
/// # Example
///
/// ```rust
/// use rust_universe_generator::*;
///
/// let settings = UniverseSettingsBuilder::new()
///     .dimensions(12, 10)
///     .unwrap()
///     .race(RaceSettings::new(Race::Argon, 30, 3, 12))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(settings.cell_count(), 120);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseSettings {
    /// Number of columns
    pub width: u8,

    /// Number of rows
    pub height: u8,

    /// Per-race quotas; inactive races (`max_clusters == 0`) may be listed
    pub races: Vec<RaceSettings>,
}

impl UniverseSettings {
    /// Total number of sectors in the grid
    #[inline]
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Quotas for a race, if configured
    pub fn race(&self, race: Race) -> Option<&RaceSettings> {
        self.races.iter().find(|r| r.race == race)
    }

    /// Races that take part in generation, in configuration order
    pub fn active_races(&self) -> impl Iterator<Item = &RaceSettings> {
        self.races.iter().filter(|r| r.is_active())
    }

    /// Sum of requested cluster seeds over all races
    pub fn requested_clusters(&self) -> u64 {
        self.races.iter().map(|r| u64::from(r.max_clusters)).sum()
    }

    /// Run every configuration rule
    ///
    /// The generator calls this before doing any work, so settings built by
    /// hand or deserialized are held to the same rules as the builder's.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for out-of-range dimensions, invalid race quotas,
    /// duplicate races, or more requested seeds than grid cells
    pub fn validate(&self) -> Result<()> {
        validate_dimension("width", self.width)?;
        validate_dimension("height", self.height)?;

        for (i, race) in self.races.iter().enumerate() {
            race.validate()?;
            if self.races[..i].iter().any(|r| r.race == race.race) {
                return Err(UniverseError::InvalidConfig(format!(
                    "{} is configured more than once",
                    race.race.name()
                )));
            }
        }

        let requested = self.requested_clusters();
        if requested > self.cell_count() as u64 {
            return Err(UniverseError::InvalidConfig(format!(
                "{} cluster seeds requested but the grid only has {} sectors",
                requested,
                self.cell_count()
            )));
        }

        Ok(())
    }
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            races: Race::ALL.into_iter().map(RaceSettings::preset).collect(),
        }
    }
}

fn validate_dimension(axis: &str, value: u8) -> Result<()> {
    if value < MIN_GRID_DIMENSION {
        return Err(UniverseError::InvalidConfig(format!(
            "grid {} must be between {} and {} (got {})",
            axis, MIN_GRID_DIMENSION, MAX_GRID_DIMENSION, value
        )));
    }
    Ok(())
}

/// Builder for creating `UniverseSettings` with validation
///
/// Per-field rules are checked by the setters; cross-field rules by `build`.
///
/// # Example
///
/// ```rust
/// use rust_universe_generator::*;
///
/// // Stock races on the default 22×17 grid
/// let settings = UniverseSettingsBuilder::new()
///     .default_races()
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(settings.races.len(), 11);
///
/// // Two custom races on a small grid
/// let settings = UniverseSettingsBuilder::new()
///     .dimensions(8, 8)
///     .unwrap()
///     .race(RaceSettings::new(Race::Boron, 10, 2, 5))
///     .unwrap()
///     .race(RaceSettings::new(Race::Xenon, 6, 3, 2))
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(settings.races.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct UniverseSettingsBuilder {
    width: u8,
    height: u8,
    races: Vec<RaceSettings>,
}

impl UniverseSettingsBuilder {
    /// Create a builder for a 22×17 grid with no races
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            races: Vec::new(),
        }
    }

    /// Set the grid dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is below `MIN_GRID_DIMENSION`
    pub fn dimensions(mut self, width: u8, height: u8) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Add quotas for one race
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the race is already configured or its quotas
    /// are inconsistent (see [`RaceSettings::validate`])
    pub fn race(mut self, settings: RaceSettings) -> Result<Self> {
        settings.validate()?;
        if self.races.iter().any(|r| r.race == settings.race) {
            return Err(UniverseError::InvalidConfig(format!(
                "{} is configured more than once",
                settings.race.name()
            )));
        }
        self.races.push(settings);
        Ok(self)
    }

    /// Add the stock quotas of every race
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any race was already configured
    pub fn default_races(self) -> Result<Self> {
        Race::ALL
            .into_iter()
            .try_fold(self, |builder, race| builder.race(RaceSettings::preset(race)))
    }

    /// Build the settings
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the races together request more seeds than
    /// the grid has sectors
    pub fn build(self) -> Result<UniverseSettings> {
        let settings = UniverseSettings {
            width: self.width,
            height: self.height,
            races: self.races,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Default for UniverseSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_codes_roundtrip() {
        for race in Race::ALL {
            assert_eq!(Race::from_code(race.code()), Some(race));
        }
        assert_eq!(Race::from_code(0), None);
        assert_eq!(Race::from_code(9), None);
    }

    #[test]
    fn test_race_glyphs_unique() {
        let mut glyphs: Vec<char> = Race::ALL.iter().map(|r| r.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), Race::ALL.len());
    }

    #[test]
    fn test_color_parsing() {
        let color = RaceColor::from_hex("#1e1ee1").unwrap();
        assert_eq!(color, RaceColor([0x1e, 0x1e, 0xe1]));
        assert_eq!(color.to_hex(), "#1e1ee1");

        let rgba = RaceColor([255, 0, 0]).to_rgba();
        assert_eq!(rgba, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_invalid_colors() {
        assert!(RaceColor::from_hex("1e1ee1").is_err());
        assert!(RaceColor::from_hex("#1e1ee").is_err());
        assert!(RaceColor::from_hex("#zz1ee1").is_err());
        assert!(RaceColor::from_hex("").is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        for race in Race::ALL {
            let preset = RaceSettings::preset(race);
            assert_eq!(preset.race, race);
            assert!(preset.validate().is_ok(), "{:?} preset invalid", race);
        }
        assert_eq!(RaceSettings::preset(Race::Argon).max_race_size, 32);
        assert_eq!(RaceSettings::preset(Race::Unknown).max_clusters, 11);
        assert_eq!(RaceSettings::preset(Race::Khaak).max_cluster_size, 1);
    }

    #[test]
    fn test_default_settings() {
        let settings = UniverseSettings::default();
        assert_eq!(settings.width, 22);
        assert_eq!(settings.height, 17);
        assert_eq!(settings.cell_count(), 374);
        assert_eq!(settings.races.len(), 11);
        assert_eq!(settings.requested_clusters(), 48);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_builder_defaults() {
        let settings = UniverseSettingsBuilder::new().build().unwrap();
        assert_eq!(settings.width, DEFAULT_WIDTH);
        assert_eq!(settings.height, DEFAULT_HEIGHT);
        assert!(settings.races.is_empty());
    }

    #[test]
    fn test_builder_default_races_matches_default() {
        let built = UniverseSettingsBuilder::new()
            .default_races()
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(built, UniverseSettings::default());
    }

    #[test]
    fn test_builder_rejects_small_dimensions() {
        assert!(UniverseSettingsBuilder::new().dimensions(4, 10).is_err());
        assert!(UniverseSettingsBuilder::new().dimensions(10, 0).is_err());
        assert!(UniverseSettingsBuilder::new().dimensions(5, 255).is_ok());
    }

    #[test]
    fn test_builder_rejects_zero_cluster_size() {
        let result = UniverseSettingsBuilder::new().race(RaceSettings::new(Race::Argon, 10, 2, 0));
        assert!(matches!(result, Err(UniverseError::InvalidConfig(_))));
    }

    #[test]
    fn test_inactive_race_may_have_zero_cluster_size() {
        let result = UniverseSettingsBuilder::new().race(RaceSettings::new(Race::Argon, 0, 0, 0));
        assert!(result.is_ok());
    }

    #[test]
    fn test_builder_rejects_more_clusters_than_size() {
        let result = UniverseSettingsBuilder::new().race(RaceSettings::new(Race::Teladi, 2, 3, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_duplicate_race() {
        let result = UniverseSettingsBuilder::new()
            .race(RaceSettings::preset(Race::Split))
            .unwrap()
            .race(RaceSettings::preset(Race::Split));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_too_many_seeds() {
        let result = UniverseSettingsBuilder::new()
            .dimensions(5, 5)
            .unwrap()
            .race(RaceSettings::new(Race::Argon, 20, 20, 1))
            .unwrap()
            .race(RaceSettings::new(Race::Boron, 6, 6, 1))
            .unwrap()
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_catches_hand_built_settings() {
        let settings = UniverseSettings {
            width: 3,
            height: 10,
            races: vec![],
        };
        assert!(settings.validate().is_err());

        let settings = UniverseSettings {
            width: 10,
            height: 10,
            races: vec![RaceSettings::preset(Race::Yaki), RaceSettings::preset(Race::Yaki)],
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_active_races() {
        let settings = UniverseSettingsBuilder::new()
            .race(RaceSettings::new(Race::Argon, 10, 2, 5))
            .unwrap()
            .race(RaceSettings::new(Race::Boron, 0, 0, 0))
            .unwrap()
            .build()
            .unwrap();

        let active: Vec<Race> = settings.active_races().map(|r| r.race).collect();
        assert_eq!(active, vec![Race::Argon]);
        assert!(settings.race(Race::Boron).is_some());
        assert!(settings.race(Race::Xenon).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_settings_serialization() {
        let settings = UniverseSettings::default();

        let json = serde_json::to_string(&settings).unwrap();
        let restored: UniverseSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(settings, restored);
    }
}
