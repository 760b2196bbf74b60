//! Generation change notifications
//!
//! The generator reports progress through a single observer it calls
//! synchronously. Events are informational only; ignoring them never changes
//! the generated universe.

use crate::cluster::ClusterId;
use crate::config::Race;
use crate::distance::Coord;

/// Stage of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationPhase {
    /// Seeds are being placed
    Placement,
    /// Clusters are growing
    Growth,
}

/// Something that happened during generation
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// A phase began
    PhaseStarted(GenerationPhase),

    /// A cluster was founded at its seed sector
    ClusterCreated {
        /// Handle of the new cluster
        cluster: ClusterId,
        /// Owning race
        race: Race,
        /// Seed coordinate
        seed: Coord,
    },

    /// A sector was claimed during growth
    SectorClaimed {
        /// Cluster that grew
        cluster: ClusterId,
        /// Race of that cluster
        race: Race,
        /// Claimed coordinate
        coord: Coord,
        /// Best-effort completion fraction in `[0, 1]`
        progress: f32,
    },

    /// Generation ended (normally or interrupted)
    Finished {
        /// Clusters in the universe
        clusters: usize,
        /// Claimed sectors in the universe
        sectors: usize,
    },
}

/// Receiver of generation events
///
/// Implementations must not block; the generator waits for `notify` to return.
pub trait GenerationObserver {
    /// Handle one event
    fn notify(&mut self, event: &GenerationEvent);
}

/// Discards every event
impl GenerationObserver for () {
    fn notify(&mut self, _event: &GenerationEvent) {}
}

/// Records every event in order
impl GenerationObserver for Vec<GenerationEvent> {
    fn notify(&mut self, event: &GenerationEvent) {
        self.push(event.clone());
    }
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationEvent),
{
    fn notify(&mut self, event: &GenerationEvent) {
        (*self)(event)
    }
}
