mod hit_object;

pub use hit_object::*;
