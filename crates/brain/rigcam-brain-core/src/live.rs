//! Liveness queries.
//!
//! A camera is live when it is the solo camera, when the current composite
//! blend references it (directly or through nested wrappers), or when some
//! ancestor composite camera is live and each link of the parent chain
//! reports the child as its live (or dominant) contributor.

use crate::blend::Blend;
use crate::cameras::CameraDirectory;
use crate::ids::CameraId;

pub fn is_live(
    dir: &dyn CameraDirectory,
    composite: &Blend,
    solo: Option<CameraId>,
    camera: CameraId,
    dominant_only: bool,
) -> bool {
    if solo == Some(camera) {
        return true;
    }
    if composite.uses(camera) {
        return true;
    }
    // Walk up the parent chain. The walk stops at the first missing parent
    // or the first link that disowns its child.
    let mut child = camera;
    let mut parent = dir.get(camera).and_then(|c| c.parent());
    while let Some(pid) = parent {
        let Some(pcam) = dir.get(pid) else {
            return false;
        };
        if !pcam.is_live_child(child, dominant_only) {
            return false;
        }
        if solo == Some(pid) || composite.uses(pid) {
            return true;
        }
        child = pid;
        parent = pcam.parent();
    }
    false
}
