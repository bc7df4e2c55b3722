mod control_point;
mod time_signature;
mod timing_point;
mod difficulty_point;
mod effect_point;
mod sample_point;
mod control_point_group;
mod control_point_info;

pub use control_point::*;
pub use time_signature::*;
pub use timing_point::*;
pub use difficulty_point::*;
pub use effect_point::*;
pub use sample_point::*;
pub use control_point_group::*;
pub use control_point_info::{ ControlPointInfo, GroupRef };
