//! Core configuration for rigcam-brain-core.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::curve::BlendDefinition;

/// Engine-level settings. Everything here is host policy; the tick itself is
/// purely data-driven.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Blend used when no custom (from, to) row matches.
    pub default_blend: BlendDefinition,

    /// Visibility mask tested against each camera's layer bits during
    /// selection.
    pub layer_mask: u32,

    /// World up vector handed to cameras on transition.
    pub world_up: [f32; 3],

    /// Maximum events to retain per tick before backpressure policy applies.
    pub max_events_per_tick: usize,
}

impl Config {
    #[inline]
    pub fn world_up(&self) -> Vec3 {
        Vec3::from_array(self.world_up)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_blend: BlendDefinition::default(),
            layer_mask: u32::MAX,
            world_up: [0.0, 1.0, 0.0],
            max_events_per_tick: 1024,
        }
    }
}
