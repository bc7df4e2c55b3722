use crate::prelude::*;

thread_local! {
    static DEFAULT_SAMPLE_POINT: Rc<SamplePoint> = Rc::new(SamplePoint::new());
}

/// A change to the default sample bank and volume.
#[derive(Clone, Debug, Serialize, Deserialize, Serializable)]
#[serde(default)]
pub struct SamplePoint {
    #[serde(skip)]
    #[serialize(skip)]
    state: ControlPointState,

    /// default bank for hit objects in this section
    pub bank: String,

    /// default volume for hit objects in this section, 0-100
    pub volume: i32,

    /// only used when 2 or above, adds a suffix to sample lookups (ie "normal-hitnormal-2")
    pub custom_bank_index: u32,
}
impl SamplePoint {
    pub const DEFAULT_BANK: &'static str = HitSample::BANK_NORMAL;

    pub fn new() -> Self {
        Self {
            state: ControlPointState::default(),
            bank: Self::DEFAULT_BANK.to_owned(),
            volume: 100,
            custom_bank_index: 0,
        }
    }

    pub fn with_bank(bank: impl ToString, volume: i32) -> Self {
        Self {
            bank: bank.to_string(),
            volume,
            ..Self::new()
        }
    }

    /// a [`HitSample`] for `sample_name` using this point's settings
    pub fn get_sample_info(&self, sample_name: &str) -> HitSample {
        HitSample::new(HitSampleOptions {
            name: Some(sample_name.to_owned()),
            bank: Some(self.bank.clone()),
            volume: Some(self.volume),
            custom_sample_bank: Some(self.custom_bank_index),
            ..Default::default()
        })
    }

    /// fill in whatever `hit_sample` didnt set itself (bank, volume, custom bank) from this point.
    /// `hit_sample` is left untouched
    pub fn apply_to(&self, hit_sample: &HitSample) -> HitSample {
        hit_sample.with(HitSampleOptions {
            bank: Some(
                if hit_sample.bank_specified { hit_sample.bank.clone() } else { self.bank.clone() }
            ),
            volume: Some(
                if hit_sample.volume > 0 { hit_sample.volume } else { self.volume }
            ),
            custom_sample_bank: Some(
                if hit_sample.custom_sample_bank > 0 { hit_sample.custom_sample_bank } else { self.custom_bank_index }
            ),
            ..Default::default()
        })
    }
}
impl Default for SamplePoint {
    fn default() -> Self { Self::new() }
}

impl ControlPoint for SamplePoint {
    const KIND: ControlPointKind = ControlPointKind::Sample;

    fn state(&self) -> &ControlPointState { &self.state }

    fn is_redundant(&self, existing: Option<&Self>) -> bool {
        existing.is_some_and(|existing|
            existing.bank == self.bank
            && existing.volume == self.volume
            && existing.custom_bank_index == self.custom_bank_index
        )
    }

    fn copy_from(&mut self, other: &Self) {
        self.bank.clone_from(&other.bank);
        self.volume = other.volume;
        self.custom_bank_index = other.custom_bank_index;
    }

    fn default_point() -> Rc<Self> {
        DEFAULT_SAMPLE_POINT.with(Rc::clone)
    }
}

impl PartialEq for SamplePoint {
    fn eq(&self, other: &Self) -> bool {
        self.start_time() == other.start_time()
        && self.bank == other.bank
        && self.volume == other.volume
        && self.custom_bank_index == other.custom_bank_index
    }
}
