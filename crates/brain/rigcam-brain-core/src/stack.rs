//! Override stack and nested blend composition.
//!
//! Frame 0 is the permanent game-driven layer; frames above it belong to
//! override clients (timeline/sequencer tools) and are created and destroyed
//! through `set_override` / `release`. `compute_composite` flattens the whole
//! stack into the single blend that is externally observable this tick.

use serde::{Deserialize, Serialize};

use crate::blend::{Blend, BlendSource};
use crate::curve::BlendCurve;
use crate::ids::{CameraId, OverrideId};

/// One layer of control: a blend plus bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Frame {
    /// None for the game layer (frame 0), which has no external id.
    pub id: Option<OverrideId>,
    pub blend: Blend,
    /// Delta time forced on this frame while the game is paused/scrubbing.
    pub fixed_dt_override: Option<f32>,
}

impl Frame {
    fn new(id: Option<OverrideId>) -> Self {
        Self {
            id,
            blend: Blend::default(),
            fixed_dt_override: None,
        }
    }

    /// Frame 0 is always active; override frames count while they still
    /// carry any content.
    pub fn is_active(&self) -> bool {
        self.id.is_none() || self.blend.cam_a.is_some() || self.blend.cam_b.is_some()
    }
}

/// The ordered frame list. Index 0 is the game layer; later indices are
/// override frames in creation order (the list compacts on release).
#[derive(Debug, Serialize, Deserialize)]
pub struct OverrideStack {
    frames: Vec<Frame>,
}

impl Default for OverrideStack {
    fn default() -> Self {
        Self::new()
    }
}

impl OverrideStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(None)],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false // frame 0 is always present
    }

    #[inline]
    pub fn game_frame(&self) -> &Frame {
        &self.frames[0]
    }

    #[inline]
    pub fn game_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[0]
    }

    pub fn frame(&self, id: OverrideId) -> Option<&Frame> {
        self.frames[1..].iter().rev().find(|f| f.id == Some(id))
    }

    /// Find the frame owning `id`, searching from the top of the stack down
    /// (frame 0 is excluded: it has no external id), appending a new frame
    /// when none exists.
    pub fn get_or_create(&mut self, id: OverrideId) -> &mut Frame {
        let found = (1..self.frames.len())
            .rev()
            .find(|&i| self.frames[i].id == Some(id));
        let index = match found {
            Some(i) => i,
            None => {
                self.frames.push(Frame::new(Some(id)));
                self.frames.len() - 1
            }
        };
        &mut self.frames[index]
    }

    /// Pin an override frame to the given camera pair and weight. The blend
    /// is weight-driven: linear curve, unit duration, `elapsed` set straight
    /// to the incoming weight, so time never moves it.
    pub fn set_override(
        &mut self,
        id: OverrideId,
        cam_a: Option<CameraId>,
        cam_b: Option<CameraId>,
        weight_b: f32,
        fixed_dt: Option<f32>,
    ) {
        let frame = self.get_or_create(id);
        frame.fixed_dt_override = fixed_dt;
        frame.blend = Blend {
            cam_a: cam_a.map(BlendSource::Camera),
            cam_b: cam_b.map(BlendSource::Camera),
            curve: BlendCurve::Linear,
            duration: 1.0,
            elapsed: weight_b.clamp(0.0, 1.0),
        };
    }

    /// Remove the frame owning `id`. Unknown ids are a no-op; frame 0 can
    /// never be released.
    pub fn release(&mut self, id: OverrideId) {
        self.frames.retain(|f| f.id != Some(id));
    }

    /// Delta-time override in effect this tick: the topmost active frame
    /// carrying one wins (scrubbing clients pin their frame's clock; frame 0
    /// carries the editor's own override).
    pub fn fixed_dt_override(&self) -> Option<f32> {
        self.frames
            .iter()
            .rev()
            .filter(|f| f.is_active())
            .find_map(|f| f.fixed_dt_override)
    }

    /// Flatten frames `0 ..= len - exclude_top_n - 1` into one composite
    /// blend.
    ///
    /// Walk upward keeping the composite-so-far. An override frame whose
    /// clock has not run out may leave either side unset ("blend from
    /// whatever is currently showing"); the unset side picks up the composite
    /// below it, as a plain camera when that composite is already settled or
    /// as a nested wrapper when it is still in motion. Wrappers therefore
    /// only ever reference blends at strictly lower indices, which keeps the
    /// blend graph acyclic.
    pub fn compute_composite(&self, exclude_top_n: usize) -> Blend {
        let end = self.frames.len().saturating_sub(exclude_top_n).max(1);
        let mut composite = self.frames[0].blend.clone();
        for frame in &self.frames[1..end] {
            if !frame.is_active() {
                continue;
            }
            let mut working = frame.blend.clone();
            if working.in_progress() {
                let fill = || -> Option<BlendSource> {
                    if composite.in_progress() {
                        Some(BlendSource::Nested(Box::new(composite.clone())))
                    } else {
                        composite.cam_b.clone()
                    }
                };
                if working.cam_a.is_none() {
                    working.cam_a = fill();
                }
                if working.cam_b.is_none() {
                    working.cam_b = fill();
                }
            }
            composite = working;
        }
        composite
    }
}
