pub mod api;
pub mod config;
pub mod error;
pub mod progression;
pub mod projection;
pub mod tuning;
pub mod types;

pub use api::{project_events, project_progression, ProjectedProgression};
pub use config::ProjectionConfig;
pub use error::*;
pub use progression::Progression;
pub use projection::{
    register_home_fret, ContinuityState, FretboardProjection, Placement, PlacementKind,
    PositionSolver, VoicePosition,
};
pub use tuning::{note_name, pitch_class_of, Tuning, STRING_COUNT};
pub use types::*;
