pub mod json;

pub use json::{load_scene, parse_scene};
