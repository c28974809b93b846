//! Brain: data ownership and the per-tick orchestration.
//!
//! One `tick` per rendering frame: pick the top-priority camera, drive the
//! game-layer blend, refresh every active camera, flatten the override stack
//! into the composite blend, fire transition notifications, publish the shot.
//! Everything re-evaluates fresh each tick; a bad result self-corrects on the
//! next one.

use log::{debug, trace};

use crate::blend::Blend;
use crate::cameras::CameraDirectory;
use crate::config::Config;
use crate::ids::{CameraId, IdAllocator, OverrideId};
use crate::live;
use crate::outputs::{BrainEvent, Outputs, ShotState};
use crate::resolver::BlendTable;
use crate::selector::select_top_camera;
use crate::stack::OverrideStack;

/// The live-camera selection and blend engine. Single-threaded and
/// tick-driven; hosts serialize access themselves if needed.
#[derive(Debug)]
pub struct Brain {
    // Owned data
    cfg: Config,
    ids: IdAllocator,
    stack: OverrideStack,
    table: BlendTable,

    // Host-controlled modes
    solo: Option<CameraId>,

    // Per-tick outputs and bookkeeping
    outputs: Outputs,
    last_live: Option<CameraId>,
}

impl Brain {
    /// Create a new brain with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            table: BlendTable::new(cfg.default_blend.clone()),
            cfg,
            ids: IdAllocator::new(),
            stack: OverrideStack::new(),
            solo: None,
            outputs: Outputs::default(),
            last_live: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Custom blend table (rows, default, override hook).
    pub fn blend_table_mut(&mut self) -> &mut BlendTable {
        &mut self.table
    }

    /// Solo camera: while set and active it wins selection and is always
    /// considered live, bypassing everything else.
    pub fn set_solo(&mut self, solo: Option<CameraId>) {
        self.solo = solo;
    }

    pub fn solo(&self) -> Option<CameraId> {
        self.solo
    }

    /// Pin (or clear) a delta-time override on the game layer, used by
    /// editors while the game clock is paused or being scrubbed.
    pub fn set_fixed_delta_override(&mut self, fixed_dt: Option<f32>) {
        self.stack.game_frame_mut().fixed_dt_override = fixed_dt;
    }

    /// Pin an override frame to a camera pair and incoming weight. Pass
    /// `id: None` to allocate a fresh id; pass it back on later calls to
    /// keep updating the same frame. Cameras referenced here get their
    /// one-time startup even if they were never otherwise ticked.
    pub fn set_camera_override(
        &mut self,
        dir: &mut dyn CameraDirectory,
        id: Option<OverrideId>,
        cam_a: Option<CameraId>,
        cam_b: Option<CameraId>,
        weight_b: f32,
        fixed_dt: Option<f32>,
    ) -> OverrideId {
        let id = id.unwrap_or_else(|| self.ids.alloc_override());
        for camera in [cam_a, cam_b].into_iter().flatten() {
            if let Some(cam) = dir.get_mut(camera) {
                cam.ensure_started();
            }
        }
        self.stack.set_override(id, cam_a, cam_b, weight_b, fixed_dt);
        trace!("override {id:?} set: {cam_a:?} -> {cam_b:?} @ {weight_b}");
        id
    }

    /// Drop an override frame. Unknown ids are a no-op; the game layer can
    /// never be released.
    pub fn release_camera_override(&mut self, id: OverrideId) {
        self.stack.release(id);
        trace!("override {id:?} released");
    }

    /// Read-only snapshot of the flattened stack, optionally ignoring the
    /// top `exclude_top_n` frames.
    pub fn current_blend(&self, exclude_top_n: usize) -> Blend {
        self.stack.compute_composite(exclude_top_n)
    }

    /// The camera currently driving the output.
    pub fn active_camera(&self) -> Option<CameraId> {
        self.current_blend(0).current_camera()
    }

    /// The blend in progress, if any.
    pub fn active_blend(&self) -> Option<Blend> {
        let composite = self.current_blend(0);
        if composite.is_complete() {
            None
        } else {
            Some(composite)
        }
    }

    pub fn is_blending(&self) -> bool {
        self.active_blend().is_some()
    }

    /// Is `camera` currently contributing to the output, directly or via
    /// its composite-camera ancestry?
    pub fn is_live(
        &self,
        dir: &dyn CameraDirectory,
        camera: CameraId,
        dominant_only: bool,
    ) -> bool {
        let composite = self.current_blend(0);
        live::is_live(dir, &composite, self.solo, camera, dominant_only)
    }

    /// Advance one rendering frame. A negative `dt` forces any in-flight
    /// blend straight to completion (the re-synchronization path).
    pub fn tick(&mut self, dir: &mut dyn CameraDirectory, dt: f32) -> &Outputs {
        self.outputs.clear();

        // 1) Effective delta: a scrubbing override pinned on a stack frame
        //    wins over the host-supplied delta.
        let eff_dt = self.stack.fixed_dt_override().unwrap_or(dt);

        // 2) Game-layer update: selection, then blend bookkeeping.
        let chosen = self
            .solo
            .filter(|id| dir.get(*id).is_some_and(|c| c.is_active()))
            .or_else(|| select_top_camera(dir, self.cfg.layer_mask));
        let current = self
            .stack
            .game_frame()
            .blend
            .cam_b
            .as_ref()
            .and_then(|b| b.front_camera());
        if chosen != current {
            match chosen {
                Some(incoming) => {
                    let from_name = current.map(|id| dir.name_of(id).to_owned());
                    let to_name = dir.name_of(incoming).to_owned();
                    let def = self
                        .table
                        .resolve(from_name.as_deref().unwrap_or(""), &to_name);
                    debug!(
                        "selection changed: {from_name:?} -> {to_name:?} over {}s",
                        def.duration
                    );
                    self.stack
                        .game_frame_mut()
                        .blend
                        .begin_transition(incoming, &def);
                }
                None => {
                    // Nothing eligible: collapse to the idle blend.
                    self.stack.game_frame_mut().blend = Blend::default();
                }
            }
        }
        self.stack.game_frame_mut().blend.advance(eff_dt);

        // 3) Refresh every active camera, live or not: one of them may
        //    become live this very tick.
        let world_up = self.cfg.world_up();
        for index in 0..dir.len() {
            let id = dir.id_at(index);
            if let Some(cam) = dir.get_mut(id) {
                if cam.is_active() {
                    cam.update(world_up, eff_dt);
                }
            }
        }

        // 4) Composite.
        let composite = self.stack.compute_composite(0);

        // 5) Transition notifications.
        let incoming_live = composite.current_camera();
        if incoming_live != self.last_live {
            let outgoing = self.last_live;
            if let Some(incoming) = incoming_live {
                let mut wants_update = false;
                if let Some(cam) = dir.get_mut(incoming) {
                    cam.ensure_started();
                    wants_update = cam.on_transition(outgoing, world_up, eff_dt);
                }
                if wants_update {
                    if let Some(cam) = dir.get_mut(incoming) {
                        cam.update(world_up, eff_dt);
                    }
                }
                let blends_from_previous = composite.in_progress()
                    && outgoing.is_some_and(|cam| composite.uses(cam));
                if !blends_from_previous {
                    debug!("cut to {incoming:?} from {outgoing:?}");
                    self.push_event(BrainEvent::CutOccurred { incoming, outgoing });
                } else {
                    debug!("blending to {incoming:?} from {outgoing:?}");
                }
                self.push_event(BrainEvent::CameraActivated { incoming, outgoing });
            }
            self.last_live = incoming_live;
        }

        // 6) Publish.
        self.outputs.shot = ShotState {
            camera: incoming_live,
            state: composite.state(dir),
        };
        &self.outputs
    }

    fn push_event(&mut self, event: BrainEvent) {
        if self.outputs.events.len() < self.cfg.max_events_per_tick {
            self.outputs.push_event(event);
        }
    }
}
