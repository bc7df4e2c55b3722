// lets the derive macros refer to this crate by name from inside it
extern crate self as beatmap_classes;

#[cfg(test)]
mod tests;
pub mod audio;
pub mod utils;
pub mod objects;
pub mod prelude;
pub mod control_points;
pub mod serialization;

pub use prelude::*;
