//! Marker templates, entrance/exit selection and constrained spawning

pub mod engine;
pub mod entrance;
pub mod template;

pub use engine::{Candidates, PlacedMarker, PlacementEngine, attached_position};
pub use entrance::{EntranceExit, place_entrance_exit};
pub use template::{MarkerMeta, MarkerRules, MarkerTemplate, SideOf};
