//! Camera state payload and weighted interpolation.
//!
//! `CameraState` is the value that flows out of the brain each tick: a
//! transform (position + orientation), a lens, and per-channel hints telling
//! the host which channels it must leave untouched. Orientation blending uses
//! NLERP with shortest-arc sign correction.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Lens parameters carried alongside the transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Roll around the forward axis in degrees.
    pub dutch_deg: f32,
}

impl Lens {
    #[inline]
    pub fn lerp(a: &Lens, b: &Lens, t: f32) -> Lens {
        Lens {
            fov_deg: a.fov_deg + (b.fov_deg - a.fov_deg) * t,
            near: a.near + (b.near - a.near) * t,
            far: a.far + (b.far - a.far) * t,
            dutch_deg: a.dutch_deg + (b.dutch_deg - a.dutch_deg) * t,
        }
    }
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            near: 0.1,
            far: 1000.0,
            dutch_deg: 0.0,
        }
    }
}

/// Per-channel "do not touch" hints. A set flag means the host must leave the
/// corresponding render-camera channel alone this tick. Hints survive
/// blending: if either endpoint carries a hint, so does the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHints {
    pub ignore_transform: bool,
    pub ignore_lens: bool,
}

impl StateHints {
    #[inline]
    pub fn union(a: StateHints, b: StateHints) -> StateHints {
        StateHints {
            ignore_transform: a.ignore_transform || b.ignore_transform,
            ignore_lens: a.ignore_lens || b.ignore_lens,
        }
    }
}

/// One camera's computed output (or a blend of several).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    pub orientation: Quat,
    pub lens: Lens,
    pub hints: StateHints,
}

impl CameraState {
    /// Fallback published when nothing is live. Both hints are set so the
    /// host leaves the render camera exactly where it was.
    pub fn neutral() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            lens: Lens::default(),
            hints: StateHints {
                ignore_transform: true,
                ignore_lens: true,
            },
        }
    }

    /// Weighted interpolation between two states; `t` in [0,1] with 1 meaning
    /// fully `b`.
    pub fn lerp(a: &CameraState, b: &CameraState, t: f32) -> CameraState {
        let t = t.clamp(0.0, 1.0);
        CameraState {
            position: a.position.lerp(b.position, t),
            orientation: nlerp(a.orientation, b.orientation, t),
            lens: Lens::lerp(&a.lens, &b.lens, t),
            hints: StateHints::union(a.hints, b.hints),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            lens: Lens::default(),
            hints: StateHints::default(),
        }
    }
}

/// Quaternion NLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
#[inline]
pub fn nlerp(a: Quat, mut b: Quat, t: f32) -> Quat {
    if a.dot(b) < 0.0 {
        b = -b;
    }
    let q = Quat::from_xyzw(
        a.x + (b.x - a.x) * t,
        a.y + (b.y - a.y) * t,
        a.z + (b.z - a.z) * t,
        a.w + (b.w - a.w) * t,
    );
    if q.length_squared() > 0.0 {
        q.normalize()
    } else {
        Quat::IDENTITY
    }
}
