use crate::prelude::*;

/// How many beats make up a bar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, SerializableEnum)]
#[serialize(type = "u8", gen_to_from)]
pub enum TimeSignature {
    /// 3/4
    #[serialize(id = 3)]
    SimpleTriple,

    /// 4/4
    #[default]
    #[serialize(id = 4, default_variant)]
    SimpleQuadruple,
}
impl TimeSignature {
    /// beats per bar
    pub fn numerator(&self) -> u8 {
        (*self).into()
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/4", self.numerator())
    }
}


#[test]
fn meter_conversion() {
    assert_eq!(TimeSignature::from(3u8), TimeSignature::SimpleTriple);
    assert_eq!(TimeSignature::from(4u8), TimeSignature::SimpleQuadruple);
    // anything we dont know about is treated as common time
    assert_eq!(TimeSignature::from(7u8), TimeSignature::SimpleQuadruple);

    assert_eq!(TimeSignature::SimpleTriple.numerator(), 3);
    assert_eq!(TimeSignature::default().to_string(), "4/4");
}
