//! The blend state machine.
//!
//! A `Blend` is a timed transition from one shot to another. Either side may
//! be a plain camera or a nested, still-unfinished blend (the "blend source"
//! wrapper): interrupting a transition folds the old blend into the new one
//! instead of snapping, so chains can nest arbitrarily deep. The nesting is
//! acyclic by construction: a wrapper is only ever built from a previously
//! resolved blend, never from the blend that holds it.

use serde::{Deserialize, Serialize};

use crate::cameras::CameraDirectory;
use crate::curve::{BlendCurve, BlendDefinition};
use crate::ids::CameraId;
use crate::state::CameraState;

/// One side of a blend: a plain camera, or another in-progress blend exposed
/// as if it were a camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BlendSource {
    Camera(CameraId),
    Nested(Box<Blend>),
}

impl BlendSource {
    /// True if this source is, or transitively contains, `id`.
    pub fn uses(&self, id: CameraId) -> bool {
        match self {
            BlendSource::Camera(c) => *c == id,
            BlendSource::Nested(b) => b.uses(id),
        }
    }

    #[inline]
    pub fn is_camera(&self, id: CameraId) -> bool {
        matches!(self, BlendSource::Camera(c) if *c == id)
    }

    /// The plain camera currently fronting this source: the camera itself,
    /// or a nested blend's incoming camera.
    pub fn front_camera(&self) -> Option<CameraId> {
        match self {
            BlendSource::Camera(c) => Some(*c),
            BlendSource::Nested(b) => b.current_camera(),
        }
    }

    /// Resolve to a concrete state. Returns None when every referenced
    /// camera is gone.
    pub fn state(&self, dir: &dyn CameraDirectory) -> Option<CameraState> {
        match self {
            BlendSource::Camera(c) => dir.get(*c).map(|cam| cam.state()),
            BlendSource::Nested(b) => b.try_state(dir),
        }
    }
}

/// A single ongoing transition.
///
/// States: Idle (`cam_a == None`) -> Blending (`elapsed < duration`) ->
/// Complete (`elapsed >= duration`, collapses back to Idle). `cam_b` is the
/// incoming side and survives completion as the current shot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blend {
    pub cam_a: Option<BlendSource>,
    pub cam_b: Option<BlendSource>,
    pub curve: BlendCurve,
    pub duration: f32,
    pub elapsed: f32,
}

impl Default for Blend {
    fn default() -> Self {
        Self {
            cam_a: None,
            cam_b: None,
            curve: BlendCurve::Cut,
            duration: 0.0,
            elapsed: 0.0,
        }
    }
}

impl Blend {
    /// Idle blend already showing `camera` (no transition in flight).
    pub fn fixed(camera: CameraId) -> Self {
        Self {
            cam_b: Some(BlendSource::Camera(camera)),
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.cam_a.is_none()
    }

    /// Complete means there is nothing left to blend from: no outgoing side,
    /// or the clock ran out.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.cam_a.is_none() || self.elapsed >= self.duration
    }

    /// True while the clock is still running, regardless of which sides are
    /// populated. The composer keys side substitution on this.
    #[inline]
    pub fn in_progress(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Incoming-camera weight in [0,1].
    pub fn weight(&self) -> f32 {
        if self.cam_a.is_none() {
            return 1.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.curve.evaluate(self.elapsed / self.duration)
    }

    /// The camera that owns the shot right now: the incoming side, falling
    /// back to the outgoing side if nothing is incoming.
    pub fn current_camera(&self) -> Option<CameraId> {
        self.cam_b
            .as_ref()
            .and_then(|b| b.front_camera())
            .or_else(|| self.cam_a.as_ref().and_then(|a| a.front_camera()))
    }

    /// Does this blend reference `id`, directly or through nested wrappers?
    pub fn uses(&self, id: CameraId) -> bool {
        self.cam_a.as_ref().is_some_and(|a| a.uses(id))
            || self.cam_b.as_ref().is_some_and(|b| b.uses(id))
    }

    /// Advance the clock. A negative `dt` is the "jump to end" signal: it
    /// forces immediate completion. Completion collapses back to Idle,
    /// keeping only the incoming side.
    pub fn advance(&mut self, dt: f32) {
        if self.cam_a.is_none() {
            return;
        }
        self.elapsed += if dt >= 0.0 { dt } else { self.duration };
        if self.elapsed >= self.duration {
            self.settle();
        }
    }

    /// Collapse to Idle on the incoming side.
    fn settle(&mut self) {
        self.cam_a = None;
        self.curve = BlendCurve::Cut;
        self.duration = 0.0;
        self.elapsed = 0.0;
        // Flatten a nested incoming side down to its front camera.
        let front = self.cam_b.as_ref().and_then(|src| src.front_camera());
        if let Some(front) = front {
            self.cam_b = Some(BlendSource::Camera(front));
        }
    }

    /// Start a transition to `incoming`, folding any unfinished blend into
    /// the new one so the picture never snaps.
    ///
    /// Reversal special case: when the request is the exact reverse of an
    /// unfinished blend and that blend's full duration does not exceed the
    /// new one, the new blend starts with `elapsed` seeded from the old
    /// blend's weight instead of 0. Carried over verbatim from the source
    /// behavior; do not "fix" for non-linear curves.
    pub fn begin_transition(&mut self, incoming: CameraId, def: &BlendDefinition) {
        if def.is_cut() {
            *self = Blend::fixed(incoming);
            return;
        }

        let mut seeded_elapsed = 0.0;
        let outgoing: Option<BlendSource> = if self.is_complete() {
            self.cam_b.clone()
        } else if self.cam_a.as_ref().is_some_and(|a| a.is_camera(incoming))
            && self.duration <= def.duration
        {
            seeded_elapsed = self.weight();
            self.cam_b.clone()
        } else {
            Some(BlendSource::Nested(Box::new(std::mem::take(self))))
        };

        match outgoing {
            None => *self = Blend::fixed(incoming), // nothing to blend from
            Some(from) => {
                *self = Blend {
                    cam_a: Some(from),
                    cam_b: Some(BlendSource::Camera(incoming)),
                    curve: def.curve.clone(),
                    duration: def.duration,
                    elapsed: seeded_elapsed,
                };
            }
        }
    }

    /// Resolve to the composed state, degrading to whichever side survives
    /// when a referenced camera has been destroyed.
    pub fn try_state(&self, dir: &dyn CameraDirectory) -> Option<CameraState> {
        let b = self.cam_b.as_ref().and_then(|s| s.state(dir));
        if self.is_complete() {
            return b.or_else(|| self.cam_a.as_ref().and_then(|s| s.state(dir)));
        }
        let a = self.cam_a.as_ref().and_then(|s| s.state(dir));
        match (a, b) {
            (Some(a), Some(b)) => Some(CameraState::lerp(&a, &b, self.weight())),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    /// Composed state with the neutral fallback applied.
    pub fn state(&self, dir: &dyn CameraDirectory) -> CameraState {
        self.try_state(dir).unwrap_or_else(CameraState::neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(duration: f32) -> BlendDefinition {
        BlendDefinition::new(BlendCurve::Linear, duration)
    }

    #[test]
    fn idle_until_begun() {
        let b = Blend::default();
        assert!(b.is_idle());
        assert!(b.is_complete());
        assert_eq!(b.current_camera(), None);
    }

    #[test]
    fn advance_completes_and_settles() {
        let mut b = Blend::fixed(CameraId(1));
        b.begin_transition(CameraId(2), &linear(2.0));
        assert!(!b.is_complete());
        b.advance(1.0);
        assert!((b.weight() - 0.5).abs() < 1e-6);
        b.advance(1.0);
        assert!(b.is_idle());
        assert_eq!(b.current_camera(), Some(CameraId(2)));
        assert_eq!(b.elapsed, 0.0);
    }

    #[test]
    fn negative_dt_jumps_to_end() {
        let mut b = Blend::fixed(CameraId(1));
        b.begin_transition(CameraId(2), &linear(10.0));
        b.advance(-1.0);
        assert!(b.is_idle());
        assert_eq!(b.current_camera(), Some(CameraId(2)));
    }

    #[test]
    fn interruption_chains_instead_of_snapping() {
        let mut b = Blend::fixed(CameraId(1));
        b.begin_transition(CameraId(2), &linear(2.0));
        b.advance(0.5);
        b.begin_transition(CameraId(3), &linear(2.0));
        // Outgoing side wraps the unfinished 1->2 blend.
        assert!(matches!(b.cam_a, Some(BlendSource::Nested(_))));
        assert!(b.uses(CameraId(1)));
        assert!(b.uses(CameraId(2)));
        assert!(b.uses(CameraId(3)));
        assert_eq!(b.elapsed, 0.0);
    }

    #[test]
    fn reversal_seeds_elapsed_from_weight() {
        let mut b = Blend::fixed(CameraId(1));
        b.begin_transition(CameraId(2), &linear(2.0));
        b.advance(0.5); // weight 0.25
        b.begin_transition(CameraId(1), &linear(2.0));
        assert!((b.elapsed - 0.25).abs() < 1e-6);
        assert!(matches!(b.cam_a, Some(BlendSource::Camera(CameraId(2)))));
        assert!(matches!(b.cam_b, Some(BlendSource::Camera(CameraId(1)))));
    }

    #[test]
    fn reversal_with_shorter_new_blend_chains_normally() {
        let mut b = Blend::fixed(CameraId(1));
        b.begin_transition(CameraId(2), &linear(2.0));
        b.advance(0.5);
        // New duration shorter than the old blend's: no seeding, plain chain.
        b.begin_transition(CameraId(1), &linear(1.0));
        assert_eq!(b.elapsed, 0.0);
        assert!(matches!(b.cam_a, Some(BlendSource::Nested(_))));
    }

    #[test]
    fn cut_definition_switches_instantly() {
        let mut b = Blend::fixed(CameraId(1));
        b.begin_transition(CameraId(2), &BlendDefinition::cut());
        assert!(b.is_idle());
        assert_eq!(b.current_camera(), Some(CameraId(2)));
    }
}
