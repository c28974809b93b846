//! Output contracts from the brain.
//!
//! Outputs carry the published shot for this tick plus a list of semantic
//! events. The host applies the shot to its render camera and transports the
//! events; both are cleared at the start of every tick.

use serde::{Deserialize, Serialize};

use crate::ids::CameraId;
use crate::state::CameraState;

/// The composed shot published this tick.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShotState {
    /// The live camera, if any.
    pub camera: Option<CameraId>,
    /// Interpolated state; neutral (with both hints set) when nothing is
    /// live.
    pub state: CameraState,
}

impl Default for ShotState {
    fn default() -> Self {
        Self {
            camera: None,
            state: CameraState::neutral(),
        }
    }
}

/// Discrete signals emitted when control transfers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BrainEvent {
    /// Control changed with no visible blend.
    CutOccurred {
        incoming: CameraId,
        outgoing: Option<CameraId>,
    },
    /// Control changed (blend or cut).
    CameraActivated {
        incoming: CameraId,
        outgoing: Option<CameraId>,
    },
}

/// Outputs returned by `Brain::tick()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    pub shot: ShotState,
    #[serde(default)]
    pub events: Vec<BrainEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.shot = ShotState::default();
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: BrainEvent) {
        self.events.push(event);
    }
}
