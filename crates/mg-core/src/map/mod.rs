//! Resource maps in, generated maps out

pub mod artifact;
pub mod path;
pub mod pipeline;
pub mod resource;

pub use artifact::GeneratedMap;
pub use path::{draw_path, find_path};
pub use pipeline::{generate, generate_map};
pub use resource::ResourceMap;
