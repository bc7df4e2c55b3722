use crate::prelude::*;

/// A sample to play when a hit object is hit.
#[derive(Clone, Debug, Serialize, Deserialize, Serializable)]
#[serde(default)]
pub struct HitSample {
    /// name of the sample, ie [`HitSample::HIT_NORMAL`]
    pub name: String,

    /// bank to load the sample from
    pub bank: String,

    /// optional lookup suffix, falls back to the unsuffixed name when missing
    pub suffix: String,

    /// 0-100
    pub volume: i32,

    /// whether the bank was set on the object itself.
    /// if not, the bank from the sample point in effect is used instead
    pub bank_specified: bool,

    pub custom_sample_bank: u32,

    /// layered samples are added automatically by most rulesets
    pub is_layered: bool,

    /// overriding filename, ignores every other lookup setting when set
    pub filename: String,
}
impl HitSample {
    pub const HIT_NORMAL: &'static str = "hitnormal";
    pub const HIT_WHISTLE: &'static str = "hitwhistle";
    pub const HIT_FINISH: &'static str = "hitfinish";
    pub const HIT_CLAP: &'static str = "hitclap";
    /// only used by taiko for now
    pub const HIT_FLOURISH: &'static str = "hitflourish";

    pub const BANK_NORMAL: &'static str = "normal";
    pub const BANK_SOFT: &'static str = "soft";
    pub const BANK_DRUM: &'static str = "drum";
    /// only used by taiko for now
    pub const BANK_STRONG: &'static str = "strong";

    pub const ALL_ADDITIONS: [&'static str; 3] = [
        Self::HIT_WHISTLE,
        Self::HIT_FINISH,
        Self::HIT_CLAP,
    ];

    pub const ALL_BANKS: [&'static str; 3] = [
        Self::BANK_NORMAL,
        Self::BANK_SOFT,
        Self::BANK_DRUM,
    ];

    pub fn new(options: HitSampleOptions) -> Self {
        // "none" and empty mean "not set here"
        let bank = options.bank.filter(|b| !b.is_empty() && b != "none");
        let bank_specified = bank.is_some();
        let custom_sample_bank = options.custom_sample_bank.unwrap_or(0);

        // custom banks are looked up through the suffix, ie "normal-hitnormal-2"
        let suffix = if custom_sample_bank >= 2 {
            custom_sample_bank.to_string()
        } else {
            options.suffix.unwrap_or_default()
        };

        Self {
            name: options.name.unwrap_or_default(),
            bank: bank.unwrap_or_else(|| Self::BANK_NORMAL.to_owned()),
            suffix,
            volume: options.volume.unwrap_or(100),
            bank_specified,
            custom_sample_bank,
            is_layered: options.is_layered.unwrap_or(false),
            filename: options.filename.unwrap_or_default(),
        }
    }

    pub fn named(name: impl ToString) -> Self {
        Self::new(HitSampleOptions {
            name: Some(name.to_string()),
            ..Default::default()
        })
    }

    /// copy of this sample with anything set in `options` replaced
    pub fn with(&self, options: HitSampleOptions) -> Self {
        // an unspecified bank has to stay unspecified
        let bank = options.bank.or_else(|| self.bank_specified.then(|| self.bank.clone()));

        Self::new(HitSampleOptions {
            name: Some(options.name.unwrap_or_else(|| self.name.clone())),
            bank,
            suffix: Some(options.suffix.unwrap_or_else(|| self.suffix.clone())),
            volume: Some(options.volume.unwrap_or(self.volume)),
            custom_sample_bank: Some(options.custom_sample_bank.unwrap_or(self.custom_sample_bank)),
            is_layered: Some(options.is_layered.unwrap_or(self.is_layered)),
            filename: Some(options.filename.unwrap_or_else(|| self.filename.clone())),
        })
    }
}
impl Default for HitSample {
    fn default() -> Self { Self::new(HitSampleOptions::default()) }
}

impl PartialEq for HitSample {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
        && self.bank == other.bank
        && self.suffix == other.suffix
        && self.custom_sample_bank == other.custom_sample_bank
        && self.is_layered == other.is_layered
    }
}


/// values for [`HitSample::new`] and [`HitSample::with`], `None` means "use the default/existing value"
#[derive(Clone, Debug, Default)]
pub struct HitSampleOptions {
    pub name: Option<String>,
    pub bank: Option<String>,
    pub suffix: Option<String>,
    pub volume: Option<i32>,
    pub custom_sample_bank: Option<u32>,
    pub is_layered: Option<bool>,
    pub filename: Option<String>,
}
