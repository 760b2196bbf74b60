//! Diagnostic rendering of a universe
//!
//! Text maps for logs and per-sector colors for whatever draws the grid.

use crate::config::Race;
use crate::sector::Sector;
use crate::universe::Universe;

/// RGBA color type
pub type SectorColor = [f32; 4];

/// Trait for mapping sectors to colors
pub trait ColorMapper {
    /// Map a sector to an RGBA color
    fn map_color(&self, universe: &Universe, sector: &Sector) -> SectorColor;
}

/// Colors owned sectors with their race's configured color
#[derive(Debug, Clone, Copy)]
pub struct RaceColorMapper {
    /// Color of unclaimed sectors
    pub empty: SectorColor,
}

impl Default for RaceColorMapper {
    fn default() -> Self {
        Self {
            empty: [0.08, 0.08, 0.1, 1.0], // Near-black
        }
    }
}

impl ColorMapper for RaceColorMapper {
    fn map_color(&self, universe: &Universe, sector: &Sector) -> SectorColor {
        sector
            .race()
            .and_then(|race| universe.settings().race(race))
            .map(|quota| quota.color.to_rgba())
            .unwrap_or(self.empty)
    }
}

/// Per-sector colors in row-major order
pub fn color_grid<M: ColorMapper>(universe: &Universe, mapper: &M) -> Vec<SectorColor> {
    universe
        .sectors()
        .iter()
        .map(|sector| mapper.map_color(universe, sector))
        .collect()
}

/// Text map of the universe, one line per row
///
/// `.` marks a free sector, the race glyph a claimed one, and the uppercase
/// glyph a cluster seed.
pub fn render_ascii(universe: &Universe) -> String {
    let width = usize::from(universe.width());
    let mut out = String::with_capacity((width + 1) * usize::from(universe.height()));

    for row in universe.sectors().chunks(width) {
        for sector in row {
            out.push(glyph(universe, sector));
        }
        out.push('\n');
    }

    out
}

fn glyph(universe: &Universe, sector: &Sector) -> char {
    let (Some(race), Some(owner)) = (sector.race(), sector.owner()) else {
        return '.';
    };
    let is_seed = universe
        .cluster(owner)
        .is_some_and(|cluster| cluster.seed == sector.coord);
    race_glyph(race, is_seed)
}

fn race_glyph(race: Race, seed: bool) -> char {
    let glyph = race.glyph();
    if seed {
        glyph.to_ascii_uppercase()
    } else {
        glyph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RaceColor, RaceSettings, UniverseSettingsBuilder};
    use crate::distance::Coord;

    fn universe() -> Universe {
        let settings = UniverseSettingsBuilder::new()
            .dimensions(5, 5)
            .unwrap()
            .race(RaceSettings::new(Race::Argon, 5, 1, 5).with_color(RaceColor([255, 0, 0])))
            .unwrap()
            .race(RaceSettings::new(Race::Boron, 5, 1, 5))
            .unwrap()
            .build()
            .unwrap();
        Universe::new(settings).unwrap()
    }

    #[test]
    fn test_render_ascii_empty() {
        let u = universe();
        let text = render_ascii(&u);
        assert_eq!(text, ".....\n.....\n.....\n.....\n.....\n");
    }

    #[test]
    fn test_render_ascii_marks_seeds() {
        let mut u = universe();
        let a = u.create_cluster(Race::Argon, Coord::new(0, 0)).unwrap();
        let grown = u.sector_id(Coord::new(1, 0)).unwrap();
        u.claim(grown, a).unwrap();
        u.create_cluster(Race::Boron, Coord::new(4, 4)).unwrap();

        let text = render_ascii(&u);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Aa...");
        assert_eq!(lines[4], "....B");
    }

    #[test]
    fn test_color_grid() {
        let mut u = universe();
        u.create_cluster(Race::Argon, Coord::new(2, 0)).unwrap();

        let mapper = RaceColorMapper::default();
        let colors = color_grid(&u, &mapper);

        assert_eq!(colors.len(), 25);
        assert_eq!(colors[2], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(colors[0], mapper.empty);
    }

    #[test]
    fn test_custom_empty_color() {
        let u = universe();
        let mapper = RaceColorMapper {
            empty: [1.0, 1.0, 1.0, 0.0],
        };
        let colors = color_grid(&u, &mapper);
        assert!(colors.iter().all(|c| *c == [1.0, 1.0, 1.0, 0.0]));
    }
}
