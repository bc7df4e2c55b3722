use crate::prelude::*;

/// An object of a beatmap, with the values it takes from the timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Serializable)]
#[serde(default)]
pub struct HitObject {
    pub start_time: f64,

    /// set for objects with a duration, ie sliders and spinners
    pub end_time: Option<f64>,

    pub kiai: bool,
    pub slider_velocity: f64,

    /// samples played when this object is hit
    pub samples: Vec<HitSample>,

    /// objects which make up this one, ie slider ticks
    pub nested: Vec<HitObject>,
}
impl HitObject {
    /// how far past its end an object still picks up a sample point, in milliseconds.
    /// sample points are often placed slightly after the object they're meant for
    pub const CONTROL_POINT_LENIENCY: f64 = 5.0;

    pub fn new(start_time: f64) -> Self {
        Self { start_time, ..Self::default() }
    }

    pub fn with_duration(start_time: f64, end_time: f64) -> Self {
        Self {
            end_time: Some(end_time),
            ..Self::new(start_time)
        }
    }

    pub fn end_time(&self) -> f64 {
        self.end_time.unwrap_or(self.start_time)
    }

    pub fn duration(&self) -> f64 {
        self.end_time() - self.start_time
    }

    /// Take kiai, slider velocity and sample defaults from `control_points`,
    /// then do the same for every nested object.
    pub fn apply_defaults(&mut self, control_points: &ControlPointInfo) {
        self.apply_defaults_to_self(control_points);

        self.nested.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        for nested in self.nested.iter_mut() {
            nested.apply_defaults(control_points);
        }
    }

    fn apply_defaults_to_self(&mut self, control_points: &ControlPointInfo) {
        // objects exactly on a kiai toggle count as inside it
        self.kiai = control_points.effect_point_at(self.start_time + 1.0).kiai;
        self.slider_velocity = control_points.difficulty_point_at(self.start_time).slider_velocity();

        let sample_point = control_points.sample_point_at(self.end_time() + Self::CONTROL_POINT_LENIENCY);
        self.samples = self.samples.iter().map(|s| sample_point.apply_to(s)).collect();
    }
}
impl Default for HitObject {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: None,
            kiai: false,
            slider_velocity: 1.0,
            samples: Vec::new(),
            nested: Vec::new(),
        }
    }
}
