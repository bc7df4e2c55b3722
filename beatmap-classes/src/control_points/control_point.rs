use crate::prelude::*;

/// Every kind of control point a timeline can hold.
///
/// The set is closed, anything that routes points by kind matches on this exhaustively.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize, SerializableEnum)]
#[serde(rename_all = "snake_case")]
pub enum ControlPointKind {
    #[serialize(id = 0)]
    Timing,
    #[serialize(id = 1)]
    Difficulty,
    #[serialize(id = 2)]
    Effect,
    #[serialize(id = 3)]
    Sample,
}
impl ControlPointKind {
    pub const ALL: [ControlPointKind; 4] = [
        Self::Timing,
        Self::Difficulty,
        Self::Effect,
        Self::Sample,
    ];
}


/// State every control point carries, owned by whichever group the point is attached to.
///
/// The group link is stored as the group's start time rather than a pointer,
/// [`ControlPointInfo::find_group`] resolves it when the group itself is needed.
#[derive(Debug, Default)]
pub struct ControlPointState {
    start_time: Cell<f64>,
    group_time: Cell<Option<f64>>,
}
impl ControlPointState {
    /// time this point starts at, in milliseconds.
    /// 0 until the point is attached to a group, after detaching it keeps its last value
    pub fn start_time(&self) -> f64 { self.start_time.get() }

    /// start time of the group this point is attached to
    pub fn group_time(&self) -> Option<f64> { self.group_time.get() }

    pub fn is_attached(&self) -> bool { self.group_time.get().is_some() }

    pub(crate) fn attach(&self, group_time: f64) {
        self.start_time.set(group_time);
        self.group_time.set(Some(group_time));
    }

    pub(crate) fn detach(&self) {
        self.group_time.set(None);
    }
}

// a copy keeps the time but never the group membership
impl Clone for ControlPointState {
    fn clone(&self) -> Self {
        Self {
            start_time: Cell::new(self.start_time()),
            group_time: Cell::new(None),
        }
    }
}


/// A setting change that applies from its start time until the next point of the same kind.
pub trait ControlPoint: Clone + core::fmt::Debug + PartialEq + 'static {
    const KIND: ControlPointKind;

    fn state(&self) -> &ControlPointState;

    /// Whether placing this point after `existing` changes nothing.
    /// Never redundant against `None`.
    fn is_redundant(&self, existing: Option<&Self>) -> bool;

    /// Copy every setting from `other`. The start time is left alone, it belongs to the group.
    fn copy_from(&mut self, other: &Self);

    /// Shared fallback used when a timeline has no point of this kind for a time.
    fn default_point() -> Rc<Self>;

    fn kind(&self) -> ControlPointKind { Self::KIND }
    fn start_time(&self) -> f64 { self.state().start_time() }
    fn group_time(&self) -> Option<f64> { self.state().group_time() }
}


/// A control point of any kind, shared with the timeline that holds it.
#[derive(Clone, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyControlPoint {
    Timing(Rc<TimingPoint>),
    Difficulty(Rc<DifficultyPoint>),
    Effect(Rc<EffectPoint>),
    Sample(Rc<SamplePoint>),
}
impl AnyControlPoint {
    pub fn kind(&self) -> ControlPointKind {
        match self {
            Self::Timing(_) => ControlPointKind::Timing,
            Self::Difficulty(_) => ControlPointKind::Difficulty,
            Self::Effect(_) => ControlPointKind::Effect,
            Self::Sample(_) => ControlPointKind::Sample,
        }
    }

    pub fn state(&self) -> &ControlPointState {
        match self {
            Self::Timing(p) => p.state(),
            Self::Difficulty(p) => p.state(),
            Self::Effect(p) => p.state(),
            Self::Sample(p) => p.state(),
        }
    }

    pub fn start_time(&self) -> f64 { self.state().start_time() }
    pub fn group_time(&self) -> Option<f64> { self.state().group_time() }

    /// whether both refer to the very same point, not just an equal one
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Timing(a), Self::Timing(b)) => Rc::ptr_eq(a, b),
            (Self::Difficulty(a), Self::Difficulty(b)) => Rc::ptr_eq(a, b),
            (Self::Effect(a), Self::Effect(b)) => Rc::ptr_eq(a, b),
            (Self::Sample(a), Self::Sample(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// a copy backed by a fresh, unattached point
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::Timing(p) => Self::Timing(Rc::new((**p).clone())),
            Self::Difficulty(p) => Self::Difficulty(Rc::new((**p).clone())),
            Self::Effect(p) => Self::Effect(Rc::new((**p).clone())),
            Self::Sample(p) => Self::Sample(Rc::new((**p).clone())),
        }
    }

    pub fn as_timing(&self) -> Option<&Rc<TimingPoint>> {
        if let Self::Timing(p) = self { Some(p) } else { None }
    }
    pub fn as_difficulty(&self) -> Option<&Rc<DifficultyPoint>> {
        if let Self::Difficulty(p) = self { Some(p) } else { None }
    }
    pub fn as_effect(&self) -> Option<&Rc<EffectPoint>> {
        if let Self::Effect(p) = self { Some(p) } else { None }
    }
    pub fn as_sample(&self) -> Option<&Rc<SamplePoint>> {
        if let Self::Sample(p) = self { Some(p) } else { None }
    }
}

// kind first, then the point's own equality
impl PartialEq for AnyControlPoint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Timing(a), Self::Timing(b)) => a == b,
            (Self::Difficulty(a), Self::Difficulty(b)) => a == b,
            (Self::Effect(a), Self::Effect(b)) => a == b,
            (Self::Sample(a), Self::Sample(b)) => a == b,
            _ => false,
        }
    }
}

impl Serializable for AnyControlPoint {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        let kind = sr.read::<ControlPointKind>("kind")?;

        Ok(match kind {
            ControlPointKind::Timing => Self::Timing(sr.read("timing point")?),
            ControlPointKind::Difficulty => Self::Difficulty(sr.read("difficulty point")?),
            ControlPointKind::Effect => Self::Effect(sr.read("effect point")?),
            ControlPointKind::Sample => Self::Sample(sr.read("sample point")?),
        })
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.kind());
        match self {
            Self::Timing(p) => sw.write(p),
            Self::Difficulty(p) => sw.write(p),
            Self::Effect(p) => sw.write(p),
            Self::Sample(p) => sw.write(p),
        }
    }
}

macro_rules! impl_any_from {
    ($($variant:ident => $t:ty),+) => { $(
        impl From<Rc<$t>> for AnyControlPoint {
            fn from(point: Rc<$t>) -> Self { Self::$variant(point) }
        }
        impl From<$t> for AnyControlPoint {
            fn from(point: $t) -> Self { Self::$variant(Rc::new(point)) }
        }
    )+ }
}
impl_any_from![
    Timing => TimingPoint,
    Difficulty => DifficultyPoint,
    Effect => EffectPoint,
    Sample => SamplePoint
];
