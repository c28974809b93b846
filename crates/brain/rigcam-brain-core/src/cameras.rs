//! Host collaborator traits.
//!
//! The brain never owns a camera: the host keeps its controllers in a
//! directory and hands the brain a `&mut dyn CameraDirectory` each tick.
//! Controllers implement `VirtualCamera`; how they compute their own state
//! (follow, aim, noise, confinement) is entirely out of scope here.

use glam::Vec3;

use crate::ids::CameraId;
use crate::state::CameraState;

/// One camera controller as seen by the brain.
pub trait VirtualCamera {
    /// Display name, also the key into the custom blend table.
    fn name(&self) -> &str;

    /// Higher wins. Only used by hosts to order their directory; the
    /// selector itself takes the directory order as authoritative.
    fn priority(&self) -> i32;

    fn is_active(&self) -> bool;

    /// Layer bits tested against the selection mask.
    fn layer_bits(&self) -> u32 {
        1
    }

    /// Current computed output. Must be cheap; the controller refreshes it in
    /// `update`.
    fn state(&self) -> CameraState;

    /// Owning composite camera, if any.
    fn parent(&self) -> Option<CameraId> {
        None
    }

    /// One-time startup hook. Called before the camera can first become
    /// live, including when an override references a camera that was never
    /// otherwise ticked. Must be idempotent.
    fn ensure_started(&mut self) {}

    /// Per-tick state refresh. Called for every active camera regardless of
    /// liveness, since a camera may become live this very tick.
    fn update(&mut self, _world_up: Vec3, _dt: f32) {}

    /// Control is transferring to this camera. Returns true if the camera
    /// wants an extra update this tick.
    fn on_transition(&mut self, _from: Option<CameraId>, _world_up: Vec3, _dt: f32) -> bool {
        false
    }

    /// For composite cameras: does `child` currently drive (or, with
    /// `dominant_only`, dominate) this camera's output?
    fn is_live_child(&self, _child: CameraId, _dominant_only: bool) -> bool {
        false
    }
}

/// Ordered collection of camera controllers, pre-sorted by descending
/// priority. Lookups by id may fail once the host destroys a camera; the
/// brain treats a failed lookup as "camera gone" and degrades silently.
pub trait CameraDirectory {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id of the camera at `index` in descending-priority order.
    fn id_at(&self, index: usize) -> CameraId;

    fn get(&self, id: CameraId) -> Option<&dyn VirtualCamera>;

    fn get_mut(&mut self, id: CameraId) -> Option<&mut dyn VirtualCamera>;

    /// Name lookup that tolerates destroyed cameras.
    fn name_of(&self, id: CameraId) -> &str {
        self.get(id).map(|c| c.name()).unwrap_or("")
    }
}
