use crate::prelude::*;

thread_local! {
    static DEFAULT_TIMING_POINT: Rc<TimingPoint> = Rc::new(TimingPoint::new());
}

/// A tempo change.
#[derive(Clone, Debug, Serialize, Deserialize, Serializable)]
#[serde(default)]
pub struct TimingPoint {
    #[serde(skip)]
    #[serialize(skip)]
    state: ControlPointState,

    /// length of a beat in milliseconds, see [`Self::set_beat_length`]
    #[serde(deserialize_with = "deserialize_beat_length")]
    beat_length: f64,

    pub time_signature: TimeSignature,

    /// whether the first bar line of this timing section is skipped
    pub omit_first_bar_line: bool,
}
impl TimingPoint {
    /// 60 bpm, used whenever nothing else says otherwise
    pub const DEFAULT_BEAT_LENGTH: f64 = 1000.0;
    pub const MIN_BEAT_LENGTH: f64 = 6.0;
    pub const MAX_BEAT_LENGTH: f64 = 60000.0;

    pub fn new() -> Self {
        Self {
            state: ControlPointState::default(),
            beat_length: Self::DEFAULT_BEAT_LENGTH,
            time_signature: TimeSignature::default(),
            omit_first_bar_line: false,
        }
    }

    pub fn with_beat_length(beat_length: f64) -> Self {
        let mut point = Self::new();
        point.set_beat_length(beat_length);
        point
    }

    pub fn beat_length(&self) -> f64 { self.beat_length }

    /// clamped to [`Self::MIN_BEAT_LENGTH`]..=[`Self::MAX_BEAT_LENGTH`]
    pub fn set_beat_length(&mut self, beat_length: f64) {
        self.beat_length = beat_length.clamp(Self::MIN_BEAT_LENGTH, Self::MAX_BEAT_LENGTH);
    }

    pub fn bpm(&self) -> f64 {
        60000.0 / self.beat_length
    }
}
impl Default for TimingPoint {
    fn default() -> Self { Self::new() }
}

impl ControlPoint for TimingPoint {
    const KIND: ControlPointKind = ControlPointKind::Timing;

    fn state(&self) -> &ControlPointState { &self.state }

    // a new timing point always restarts the bar, even when nothing else changed
    fn is_redundant(&self, _existing: Option<&Self>) -> bool {
        false
    }

    fn copy_from(&mut self, other: &Self) {
        self.beat_length = other.beat_length;
        self.time_signature = other.time_signature;
        self.omit_first_bar_line = other.omit_first_bar_line;
    }

    fn default_point() -> Rc<Self> {
        DEFAULT_TIMING_POINT.with(Rc::clone)
    }
}

impl PartialEq for TimingPoint {
    fn eq(&self, other: &Self) -> bool {
        self.start_time() == other.start_time()
        && self.beat_length == other.beat_length
        && self.time_signature == other.time_signature
        && self.omit_first_bar_line == other.omit_first_bar_line
    }
}

fn deserialize_beat_length<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    f64::deserialize(d).map(|b| b.clamp(TimingPoint::MIN_BEAT_LENGTH, TimingPoint::MAX_BEAT_LENGTH))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beat_length_is_clamped() {
        assert_eq!(TimingPoint::with_beat_length(1.0).beat_length(), 6.0);
        assert_eq!(TimingPoint::with_beat_length(100_000.0).beat_length(), 60000.0);
        assert_eq!(TimingPoint::with_beat_length(500.0).beat_length(), 500.0);
    }

    #[test]
    fn bpm() {
        assert_eq!(TimingPoint::with_beat_length(500.0).bpm(), 120.0);
        assert_eq!(TimingPoint::default_point().bpm(), 60.0);
    }

    #[test]
    fn never_redundant() {
        let a = TimingPoint::with_beat_length(500.0);
        let b = a.clone();
        assert!(!b.is_redundant(Some(&a)));
        assert!(!b.is_redundant(None));
    }

    #[test]
    fn copy_from_keeps_start_time() {
        let mut a = TimingPoint::new();
        a.state().attach(100.0);

        let mut b = TimingPoint::with_beat_length(300.0);
        b.time_signature = TimeSignature::SimpleTriple;
        b.omit_first_bar_line = true;

        a.copy_from(&b);
        assert_eq!(a.beat_length(), 300.0);
        assert_eq!(a.time_signature, TimeSignature::SimpleTriple);
        assert!(a.omit_first_bar_line);
        assert_eq!(a.start_time(), 100.0);
        assert_ne!(a, b);
    }

    #[test]
    fn binary_round_trip() {
        let mut point = TimingPoint::with_beat_length(333.0);
        point.time_signature = TimeSignature::SimpleTriple;

        let mut sw = SerializationWriter::new();
        sw.write(&point);
        let mut sr = SerializationReader::new(sw.into_bytes());
        let read: TimingPoint = sr.read("point").unwrap();

        assert_eq!(read, point);
    }
}
