//! Per-race fulfillment report
//!
//! Quotas are upper bounds. Geometry can force a race to place fewer seeds or
//! claim fewer sectors than requested; that is reported here, not as an error.

use std::fmt;

use crate::config::Race;

/// What one race asked for and what it got
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceSummary {
    /// The race
    pub race: Race,
    /// Seeds requested (`max_clusters`)
    pub requested_clusters: u32,
    /// Clusters actually founded
    pub placed_clusters: u32,
    /// Total size cap (`max_race_size`)
    pub max_race_size: u32,
    /// Per-cluster size cap (`max_cluster_size`)
    pub max_cluster_size: u32,
    /// Sectors owned by all clusters of this race
    pub claimed_sectors: u32,
}

impl RaceSummary {
    /// Seeds that could not be placed
    #[inline]
    pub fn missing_clusters(&self) -> u32 {
        self.requested_clusters.saturating_sub(self.placed_clusters)
    }

    /// Largest territory the quotas allow: the total cap, or fewer if every
    /// requested cluster at full size still stays below it
    pub fn sector_target(&self) -> u32 {
        let by_clusters = u64::from(self.requested_clusters) * u64::from(self.max_cluster_size);
        u64::from(self.max_race_size).min(by_clusters) as u32
    }

    /// Sectors short of the target
    #[inline]
    pub fn missing_sectors(&self) -> u32 {
        self.sector_target().saturating_sub(self.claimed_sectors)
    }

    /// Whether every requested seed and sector was delivered
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        self.missing_clusters() == 0 && self.missing_sectors() == 0
    }
}

impl fmt::Display for RaceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} clusters, {}/{} sectors",
            self.race.name(),
            self.placed_clusters,
            self.requested_clusters,
            self.claimed_sectors,
            self.sector_target()
        )
    }
}

/// Fulfillment of every configured race
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// One entry per configured race, in configuration order
    pub races: Vec<RaceSummary>,
    /// Whether generation was stopped before finishing
    pub interrupted: bool,
}

impl GenerationSummary {
    /// Entry for one race
    pub fn race(&self, race: Race) -> Option<&RaceSummary> {
        self.races.iter().find(|r| r.race == race)
    }

    /// Races that received less than requested
    pub fn shortfalls(&self) -> impl Iterator<Item = &RaceSummary> {
        self.races.iter().filter(|r| !r.is_satisfied())
    }

    /// Whether generation ran to completion and every quota was met
    pub fn is_fully_satisfied(&self) -> bool {
        !self.interrupted && self.shortfalls().next().is_none()
    }

    /// Clusters founded across all races
    pub fn total_clusters(&self) -> u32 {
        self.races.iter().map(|r| r.placed_clusters).sum()
    }

    /// Sectors claimed across all races
    pub fn total_sectors(&self) -> u32 {
        self.races.iter().map(|r| r.claimed_sectors).sum()
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for race in &self.races {
            writeln!(f, "{}", race)?;
        }
        if self.interrupted {
            writeln!(f, "generation interrupted")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(placed: u32, claimed: u32) -> RaceSummary {
        RaceSummary {
            race: Race::Teladi,
            requested_clusters: 4,
            placed_clusters: placed,
            max_race_size: 30,
            max_cluster_size: 9,
            claimed_sectors: claimed,
        }
    }

    #[test]
    fn test_satisfied() {
        let s = summary(4, 30);
        assert!(s.is_satisfied());
        assert_eq!(s.missing_clusters(), 0);
        assert_eq!(s.missing_sectors(), 0);
    }

    #[test]
    fn test_shortfall() {
        let s = summary(3, 20);
        assert!(!s.is_satisfied());
        assert_eq!(s.missing_clusters(), 1);
        assert_eq!(s.missing_sectors(), 10);
    }

    #[test]
    fn test_sector_target_limited_by_cluster_cap() {
        let s = RaceSummary {
            race: Race::Khaak,
            requested_clusters: 2,
            placed_clusters: 2,
            max_race_size: 10,
            max_cluster_size: 1,
            claimed_sectors: 2,
        };
        assert_eq!(s.sector_target(), 2);
        assert!(s.is_satisfied());
    }

    #[test]
    fn test_generation_summary() {
        let full = GenerationSummary {
            races: vec![summary(4, 30)],
            interrupted: false,
        };
        assert!(full.is_fully_satisfied());
        assert_eq!(full.total_clusters(), 4);
        assert_eq!(full.total_sectors(), 30);

        let partial = GenerationSummary {
            races: vec![summary(4, 30), summary(2, 10)],
            interrupted: false,
        };
        assert!(!partial.is_fully_satisfied());
        assert_eq!(partial.shortfalls().count(), 1);

        let interrupted = GenerationSummary {
            races: vec![summary(4, 30)],
            interrupted: true,
        };
        assert!(!interrupted.is_fully_satisfied());
    }

    #[test]
    fn test_display() {
        let text = summary(3, 20).to_string();
        assert_eq!(text, "Teladi: 3/4 clusters, 20/30 sectors");
    }
}
