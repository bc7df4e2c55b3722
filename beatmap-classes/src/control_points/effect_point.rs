use crate::prelude::*;

thread_local! {
    static DEFAULT_EFFECT_POINT: Rc<EffectPoint> = Rc::new(EffectPoint::new());
}

/// A change to kiai or scroll speed.
#[derive(Clone, Debug, Serialize, Deserialize, Serializable)]
#[serde(default)]
pub struct EffectPoint {
    #[serde(skip)]
    #[serialize(skip)]
    state: ControlPointState,

    pub kiai: bool,

    #[serde(deserialize_with = "deserialize_scroll_speed")]
    scroll_speed: f64,

    /// moved to [`TimingPoint::omit_first_bar_line`], only kept so old data round trips
    pub omit_first_bar_line: bool,
}
impl EffectPoint {
    pub const MIN_SCROLL_SPEED: f64 = 0.1;
    pub const MAX_SCROLL_SPEED: f64 = 10.0;

    pub fn new() -> Self {
        Self {
            state: ControlPointState::default(),
            kiai: false,
            scroll_speed: 1.0,
            omit_first_bar_line: false,
        }
    }

    pub fn with_kiai(kiai: bool) -> Self {
        Self { kiai, ..Self::new() }
    }

    pub fn scroll_speed(&self) -> f64 { self.scroll_speed }

    /// clamped to [`Self::MIN_SCROLL_SPEED`]..=[`Self::MAX_SCROLL_SPEED`]
    pub fn set_scroll_speed(&mut self, scroll_speed: f64) {
        self.scroll_speed = scroll_speed.clamp(Self::MIN_SCROLL_SPEED, Self::MAX_SCROLL_SPEED);
    }
}
impl Default for EffectPoint {
    fn default() -> Self { Self::new() }
}

impl ControlPoint for EffectPoint {
    const KIND: ControlPointKind = ControlPointKind::Effect;

    fn state(&self) -> &ControlPointState { &self.state }

    fn is_redundant(&self, existing: Option<&Self>) -> bool {
        existing.is_some_and(|existing|
            existing.kiai == self.kiai
            && existing.scroll_speed == self.scroll_speed
        )
    }

    fn copy_from(&mut self, other: &Self) {
        self.kiai = other.kiai;
        self.scroll_speed = other.scroll_speed;
        self.omit_first_bar_line = other.omit_first_bar_line;
    }

    fn default_point() -> Rc<Self> {
        DEFAULT_EFFECT_POINT.with(Rc::clone)
    }
}

impl PartialEq for EffectPoint {
    fn eq(&self, other: &Self) -> bool {
        self.start_time() == other.start_time()
        && self.kiai == other.kiai
        && self.scroll_speed == other.scroll_speed
        && self.omit_first_bar_line == other.omit_first_bar_line
    }
}

fn deserialize_scroll_speed<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    f64::deserialize(d).map(|s| s.clamp(EffectPoint::MIN_SCROLL_SPEED, EffectPoint::MAX_SCROLL_SPEED))
}


#[test]
fn effect_point_redundancy() {
    let kiai = EffectPoint::with_kiai(true);

    assert!(EffectPoint::with_kiai(true).is_redundant(Some(&kiai)));
    assert!(!EffectPoint::with_kiai(false).is_redundant(Some(&kiai)));
    assert!(!EffectPoint::with_kiai(true).is_redundant(None));

    let mut faster = EffectPoint::with_kiai(true);
    faster.set_scroll_speed(2.0);
    assert!(!faster.is_redundant(Some(&kiai)));

    // only kept for old data, doesnt change anything
    let mut legacy = EffectPoint::with_kiai(true);
    legacy.omit_first_bar_line = true;
    assert!(legacy.is_redundant(Some(&kiai)));
}

#[test]
fn effect_point_equality() {
    assert!(EffectPoint::with_kiai(true) == EffectPoint::with_kiai(true));

    let mut legacy = EffectPoint::with_kiai(true);
    legacy.omit_first_bar_line = true;
    assert!(legacy != EffectPoint::with_kiai(true));
}

#[test]
fn scroll_speed_is_clamped() {
    let mut point = EffectPoint::new();
    point.set_scroll_speed(0.01);
    assert_eq!(point.scroll_speed(), 0.1);
    point.set_scroll_speed(11.0);
    assert_eq!(point.scroll_speed(), 10.0);
}
