pub(crate) use std::rc::Rc;
pub(crate) use std::cell::{ Cell, RefCell };

#[cfg(feature = "json")]
pub use serde_json;

pub use crate::audio::*;
pub use crate::objects::*;
pub use crate::control_points::*;
pub use crate::serialization::*;
pub use serde::{ Serialize, Deserialize };
pub use beatmap_classes_proc_macros::{ Serializable, SerializableEnum };
