use crate::prelude::*;

/// Hitsound settings as written on a hit object, before they're turned into [`HitSample`]s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Serializable)]
#[serde(default)]
pub struct SampleBank {
    /// overriding filename, every bank/sample setting is ignored when this is set
    pub filename: String,

    /// 0-100
    pub volume: i32,

    /// bank for the base "hitnormal" sample
    pub bank_for_normal: SampleSet,

    /// bank for the additions (whistle, finish, clap)
    pub bank_for_addition: SampleSet,

    /// only used when 2 or above, see [`HitSample::suffix`]
    pub custom_sample_bank: u32,
}
impl SampleBank {
    /// build the hit sample for `name` from these settings.
    /// additions without their own bank use the normal bank
    pub fn sample_for(&self, name: &str) -> HitSample {
        let bank = if name == HitSample::HIT_NORMAL || self.bank_for_addition == SampleSet::None {
            self.bank_for_normal
        } else {
            self.bank_for_addition
        };

        HitSample::new(HitSampleOptions {
            name: Some(name.to_owned()),
            bank: Some(bank.name().to_owned()),
            volume: Some(self.volume),
            custom_sample_bank: Some(self.custom_sample_bank),
            filename: Some(self.filename.clone()),
            ..Default::default()
        })
    }
}
impl Default for SampleBank {
    fn default() -> Self {
        Self {
            filename: String::new(),
            volume: 100,
            bank_for_normal: SampleSet::None,
            bank_for_addition: SampleSet::None,
            custom_sample_bank: 0,
        }
    }
}


#[test]
fn sample_bank_to_samples() {
    let bank = SampleBank {
        bank_for_normal: SampleSet::Soft,
        bank_for_addition: SampleSet::Drum,
        custom_sample_bank: 2,
        ..Default::default()
    };

    let normal = bank.sample_for(HitSample::HIT_NORMAL);
    assert_eq!(normal.bank, HitSample::BANK_SOFT);
    assert!(normal.bank_specified);
    assert_eq!(normal.suffix, "2");

    let clap = bank.sample_for(HitSample::HIT_CLAP);
    assert_eq!(clap.bank, HitSample::BANK_DRUM);

    // nothing set anywhere, so the sample point decides
    let unset = SampleBank::default().sample_for(HitSample::HIT_WHISTLE);
    assert!(!unset.bank_specified);
}
