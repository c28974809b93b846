//! Rigcam brain core (engine-agnostic)
//!
//! Selects, each rendering tick, which of many virtual camera controllers
//! drives the output camera, and composes a smoothly blended state when
//! control transfers. Camera controllers themselves live in the host and are
//! reached through the `cameras` traits; this crate owns only the selection
//! and blend-composition state machine: the game-layer blend, the override
//! stack, nested blend resolution, and the live-status queries.

pub mod blend;
pub mod brain;
pub mod cameras;
pub mod config;
pub mod curve;
pub mod ids;
pub mod live;
pub mod outputs;
pub mod resolver;
pub mod selector;
pub mod stack;
pub mod state;

// Re-exports for consumers (adapters)
pub use blend::{Blend, BlendSource};
pub use brain::Brain;
pub use cameras::{CameraDirectory, VirtualCamera};
pub use config::Config;
pub use curve::{BlendCurve, BlendDefinition};
pub use ids::{CameraId, IdAllocator, OverrideId};
pub use outputs::{BrainEvent, Outputs, ShotState};
pub use resolver::{parse_blend_table_json, BlendRow, BlendTable, BlendTableError, ANY_CAMERA};
pub use selector::select_top_camera;
pub use stack::{Frame, OverrideStack};
pub use state::{CameraState, Lens, StateHints};
