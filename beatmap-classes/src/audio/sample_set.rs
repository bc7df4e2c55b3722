use crate::prelude::*;

/// Which set of hitsounds to pull samples from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, SerializableEnum)]
#[serde(rename_all = "lowercase")]
#[serialize(type = "u8", gen_to_from)]
pub enum SampleSet {
    /// nothing set, defer to whatever is in effect
    #[default]
    #[serialize(id = 0, default_variant)]
    None,
    #[serialize(id = 1)]
    Normal,
    #[serialize(id = 2)]
    Soft,
    #[serialize(id = 3)]
    Drum,
}
impl SampleSet {
    /// the bank name used in sample lookups
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Normal => HitSample::BANK_NORMAL,
            Self::Soft => HitSample::BANK_SOFT,
            Self::Drum => HitSample::BANK_DRUM,
        }
    }
}

impl std::fmt::Display for SampleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SampleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "normal" => Ok(Self::Normal),
            "soft" => Ok(Self::Soft),
            "drum" => Ok(Self::Drum),
            _ => Err(format!("unknown sample set {s}")),
        }
    }
}


#[test]
fn sample_set_names() {
    for set in [SampleSet::None, SampleSet::Normal, SampleSet::Soft, SampleSet::Drum] {
        assert_eq!(set.name().parse::<SampleSet>(), Ok(set));
    }

    assert_eq!("Soft".parse::<SampleSet>(), Ok(SampleSet::Soft));
    assert!("strong".parse::<SampleSet>().is_err());
    assert_eq!(SampleSet::from(2u8), SampleSet::Soft);
    assert_eq!(SampleSet::from(9u8), SampleSet::None);
}
