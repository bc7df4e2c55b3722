use crate::prelude::*;

thread_local! {
    static DEFAULT_DIFFICULTY_POINT: Rc<DifficultyPoint> = Rc::new(DifficultyPoint::new());
}

/// A slider velocity change.
#[derive(Clone, Debug, Serialize, Deserialize, Serializable)]
#[serde(default)]
pub struct DifficultyPoint {
    #[serde(skip)]
    #[serialize(skip)]
    state: ControlPointState,

    #[serde(deserialize_with = "deserialize_slider_velocity")]
    slider_velocity: f64,

    /// whether slider ticks are generated in this section.
    /// old maps abuse NaN slider velocities to turn them off
    pub generate_ticks: bool,

    /// whether this point came from a legacy (inherited timing point) source
    pub is_legacy: bool,

    /// legacy bpm multiplier. carries the floating point error old clients had,
    /// only rulesets which depend on that error should read it
    pub bpm_multiplier: f64,
}
impl DifficultyPoint {
    pub const MIN_SLIDER_VELOCITY: f64 = 0.1;
    pub const MAX_SLIDER_VELOCITY: f64 = 10.0;

    pub fn new() -> Self {
        Self {
            state: ControlPointState::default(),
            slider_velocity: 1.0,
            generate_ticks: true,
            is_legacy: false,
            bpm_multiplier: 1.0,
        }
    }

    pub fn with_slider_velocity(slider_velocity: f64) -> Self {
        let mut point = Self::new();
        point.set_slider_velocity(slider_velocity);
        point
    }

    pub fn slider_velocity(&self) -> f64 { self.slider_velocity }

    /// clamped to [`Self::MIN_SLIDER_VELOCITY`]..=[`Self::MAX_SLIDER_VELOCITY`]
    pub fn set_slider_velocity(&mut self, slider_velocity: f64) {
        self.slider_velocity = slider_velocity.clamp(Self::MIN_SLIDER_VELOCITY, Self::MAX_SLIDER_VELOCITY);
    }
}
impl Default for DifficultyPoint {
    fn default() -> Self { Self::new() }
}

impl ControlPoint for DifficultyPoint {
    const KIND: ControlPointKind = ControlPointKind::Difficulty;

    fn state(&self) -> &ControlPointState { &self.state }

    fn is_redundant(&self, existing: Option<&Self>) -> bool {
        existing.is_some_and(|existing|
            existing.slider_velocity == self.slider_velocity
            && existing.generate_ticks == self.generate_ticks
        )
    }

    fn copy_from(&mut self, other: &Self) {
        self.slider_velocity = other.slider_velocity;
        self.generate_ticks = other.generate_ticks;
        self.is_legacy = other.is_legacy;
        self.bpm_multiplier = other.bpm_multiplier;
    }

    fn default_point() -> Rc<Self> {
        DEFAULT_DIFFICULTY_POINT.with(Rc::clone)
    }
}

impl PartialEq for DifficultyPoint {
    fn eq(&self, other: &Self) -> bool {
        self.start_time() == other.start_time()
        && self.slider_velocity == other.slider_velocity
        && self.generate_ticks == other.generate_ticks
        && self.is_legacy == other.is_legacy
        && self.bpm_multiplier == other.bpm_multiplier
    }
}

fn deserialize_slider_velocity<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    f64::deserialize(d).map(|v| v.clamp(DifficultyPoint::MIN_SLIDER_VELOCITY, DifficultyPoint::MAX_SLIDER_VELOCITY))
}
