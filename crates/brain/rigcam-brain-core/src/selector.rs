//! Priority camera selection.
//!
//! The directory presents cameras pre-sorted by descending priority, so the
//! first active camera passing the mask test is the winner. No numeric
//! priority comparison happens here and there are no side effects.

use crate::cameras::CameraDirectory;
use crate::ids::CameraId;

/// Scan the directory in order and return the first active camera whose
/// layer bits intersect `mask`. Returns None when nothing is eligible.
pub fn select_top_camera(dir: &dyn CameraDirectory, mask: u32) -> Option<CameraId> {
    for index in 0..dir.len() {
        let id = dir.id_at(index);
        if let Some(cam) = dir.get(id) {
            if cam.is_active() && (cam.layer_bits() & mask) != 0 {
                return Some(id);
            }
        }
    }
    None
}
