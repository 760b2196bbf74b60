//! Faction territory generation on bounded sector grids
//!
//! A standalone library that partitions a rectangular grid of sectors among
//! races: each race founds a number of clusters, spaced apart, which then grow
//! into contiguous territories within per-cluster and per-race caps.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_universe_generator::*;
//!
//! // Stock races on the default 22×17 grid
//! let settings = UniverseSettings::default();
//! let universe = UniverseGenerator::from_seed(42).generate(&settings).unwrap();
//!
//! println!("{}", render_ascii(&universe));
//! println!("{}", universe.summary());
//!
//! // Custom quotas
//! let settings = UniverseSettingsBuilder::new()
//!     .dimensions(30, 20).unwrap()
//!     .race(RaceSettings::new(Race::Argon, 60, 3, 25)).unwrap()
//!     .race(RaceSettings::new(Race::Xenon, 40, 4, 10)).unwrap()
//!     .build().unwrap();
//!
//! let universe = UniverseGenerator::from_seed(7).generate(&settings).unwrap();
//! assert!(universe.race_sector_count(Race::Xenon) <= 40);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) nearest-seed lookups using KD-tree
//! - `serde`: Enables serialization support for settings

// Modules
pub mod error;
pub mod config;
pub mod distance;
pub mod random;
pub mod sector;
pub mod cluster;
pub mod free_cells;
pub mod events;
pub mod summary;
pub mod universe;
pub mod generation;
pub mod render;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{UniverseError, Result};
pub use config::{Race, RaceColor, RaceSettings, UniverseSettings, UniverseSettingsBuilder};
pub use distance::{distance_squared, Coord, SpacingThresholds};
pub use random::{RandomProvider, SeededRandom};
pub use sector::{Sector, SectorId};
pub use cluster::{Cluster, ClusterId};
pub use free_cells::FreeCells;
pub use events::{GenerationEvent, GenerationObserver, GenerationPhase};
pub use summary::{GenerationSummary, RaceSummary};
pub use universe::{Universe, CLUSTER_NEIGHBOR_RADIUS};
pub use generation::UniverseGenerator;
pub use render::{color_grid, render_ascii, ColorMapper, RaceColorMapper, SectorColor};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;
