// Scope matcher - maps tracked aircraft onto a fixed pool of render entities
//
// The matcher owns the pool; nothing else reads or mutates it. It is
// driven only from the render cycle, so no lock is needed. Each
// reconcile pass emits typed lifecycle decisions (create, update in
// place, delete) that the presentation sink turns into actual drawing.

use tracing::warn;

use crate::constants::{
    ALTITUDE_BAND_LOW_FT, ALTITUDE_BAND_MEDIUM_FT, MAX_AIRCRAFT, VELOCITY_VECTOR_SCALE,
};
use crate::store::TrackedAircraft;

/// Altitude color band for a blip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltitudeBand {
    /// Below 10,000 ft
    Low,
    /// 10,000 - 25,000 ft
    Medium,
    /// Above 25,000 ft
    High,
}

impl AltitudeBand {
    pub fn from_feet(altitude_ft: i32) -> Self {
        if altitude_ft < ALTITUDE_BAND_LOW_FT {
            AltitudeBand::Low
        } else if altitude_ft < ALTITUDE_BAND_MEDIUM_FT {
            AltitudeBand::Medium
        } else {
            AltitudeBand::High
        }
    }
}

/// Everything the sink needs to draw one blip
#[derive(Debug, Clone, PartialEq)]
pub struct BlipState {
    /// Blip center in screen pixels
    pub screen: (i32, i32),
    /// Callsign label; None when suppressed or absent
    pub callsign_label: Option<String>,
    /// Altitude label in hundreds of feet ("350" for 35,000); None when
    /// suppressed or on the ground
    pub altitude_label: Option<String>,
    /// Altitude color band
    pub band: AltitudeBand,
    /// Velocity vector endpoint in screen pixels; None without speed/track
    pub velocity_vector: Option<(i32, i32)>,
}

impl BlipState {
    /// Derive the drawable state for one aircraft. `show_labels` is the
    /// per-cycle label decision (visibility policy plus density culling).
    fn from_aircraft(ac: &TrackedAircraft, show_labels: bool) -> Self {
        let callsign_label = if show_labels && !ac.callsign.is_empty() {
            Some(ac.callsign.clone())
        } else {
            None
        };

        let altitude_label = if show_labels && ac.altitude > 0 {
            Some(format!("{}", ac.altitude / 100))
        } else {
            None
        };

        // Vector length scales with ground speed, pointing along the track
        let velocity_vector = if ac.speed > 0.0 && ac.track >= 0.0 {
            let length = ac.speed * VELOCITY_VECTOR_SCALE;
            let angle_rad = (ac.track - 90.0).to_radians();
            let end_x = ac.screen_x + (length * angle_rad.cos()) as i32;
            let end_y = ac.screen_y + (length * angle_rad.sin()) as i32;
            Some((end_x, end_y))
        } else {
            None
        };

        BlipState {
            screen: (ac.screen_x, ac.screen_y),
            callsign_label,
            altitude_label,
            band: AltitudeBand::from_feet(ac.altitude),
            velocity_vector,
        }
    }
}

/// Lifecycle decision for the presentation sink
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleDecision {
    /// First sighting: build the visual proxy with this initial state
    Create { hex: String, state: BlipState },
    /// Known aircraft: apply the new state to the existing proxy
    Update { hex: String, state: BlipState },
    /// Aircraft disappeared: tear the proxy down
    Delete { hex: String },
    /// No free proxy slot; the aircraft is not rendered this cycle
    PoolFull { hex: String },
}

/// Per-cycle visibility policy
#[derive(Debug, Clone)]
pub struct VisibilityPolicy {
    /// Master label switch
    pub show_labels: bool,
    /// Labels are suppressed for everyone once more aircraft than this
    /// are in range (density culling); blips are always drawn
    pub max_label_count: usize,
    /// Radar radius in NM; aircraft beyond it are never rendered
    pub radius_nm: u32,
}

/// One render-entity slot in the pool
#[derive(Debug, Clone, Default)]
struct EntitySlot {
    /// Id of the aircraft this slot represents; empty when free
    hex: String,
    in_use: bool,
    /// Set when the current reconcile pass saw this aircraft
    touched: bool,
    /// Last state handed to the sink
    last_state: Option<BlipState>,
}

/// Fixed-pool matcher preserving blip identity across render cycles
pub struct ScopeMatcher {
    pool: Vec<EntitySlot>,
}

impl ScopeMatcher {
    /// Create a matcher with the default pool size
    pub fn new() -> Self {
        Self::with_capacity(MAX_AIRCRAFT)
    }

    /// Create a matcher with an explicit pool size. A pool smaller than
    /// the store capacity is allowed; excess aircraft get PoolFull.
    pub fn with_capacity(capacity: usize) -> Self {
        ScopeMatcher {
            pool: vec![EntitySlot::default(); capacity],
        }
    }

    /// Number of entity slots currently bound to an aircraft
    pub fn entity_count(&self) -> usize {
        self.pool.iter().filter(|s| s.in_use).count()
    }

    /// Match a snapshot of tracked aircraft against the entity pool.
    ///
    /// Emits Create for aircraft seen for the first time, Update for
    /// known ones, Delete for entities whose aircraft disappeared, and
    /// PoolFull when a new aircraft finds no free slot. Out-of-range
    /// aircraft are treated as absent.
    pub fn reconcile(
        &mut self,
        aircraft: &[TrackedAircraft],
        policy: &VisibilityPolicy,
    ) -> Vec<LifecycleDecision> {
        let mut decisions = Vec::new();

        for slot in self.pool.iter_mut() {
            slot.touched = false;
        }

        let in_range: Vec<&TrackedAircraft> = aircraft
            .iter()
            .filter(|ac| ac.distance_nm <= policy.radius_nm as f64)
            .collect();

        // Density culling: all labels off once the scope gets crowded
        let show_labels = policy.show_labels && in_range.len() <= policy.max_label_count;

        for ac in in_range {
            let state = BlipState::from_aircraft(ac, show_labels);

            if let Some(idx) = self.find(&ac.hex) {
                let slot = &mut self.pool[idx];
                slot.touched = true;
                slot.last_state = Some(state.clone());
                decisions.push(LifecycleDecision::Update {
                    hex: ac.hex.clone(),
                    state,
                });
            } else if let Some(idx) = self.pool.iter().position(|s| !s.in_use) {
                let slot = &mut self.pool[idx];
                slot.hex = ac.hex.clone();
                slot.in_use = true;
                slot.touched = true;
                slot.last_state = Some(state.clone());
                decisions.push(LifecycleDecision::Create {
                    hex: ac.hex.clone(),
                    state,
                });
            } else {
                warn!("No free blip slots for aircraft {}", ac.hex);
                decisions.push(LifecycleDecision::PoolFull {
                    hex: ac.hex.clone(),
                });
            }
        }

        // Anything not seen this cycle is torn down and its slot freed
        for slot in self.pool.iter_mut() {
            if slot.in_use && !slot.touched {
                decisions.push(LifecycleDecision::Delete {
                    hex: std::mem::take(&mut slot.hex),
                });
                slot.in_use = false;
                slot.last_state = None;
            }
        }

        decisions
    }

    fn find(&self, hex: &str) -> Option<usize> {
        self.pool.iter().position(|s| s.in_use && s.hex == hex)
    }
}

impl Default for ScopeMatcher {
    fn default() -> Self {
        Self::new()
    }
}
