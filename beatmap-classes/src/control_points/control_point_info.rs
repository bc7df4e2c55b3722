use log::{debug, trace};

use crate::prelude::*;
use crate::utils::binary_search::*;

/// A group as held by a timeline, shared with whoever asked for it.
pub type GroupRef = Rc<RefCell<ControlPointGroup>>;

/// The per-kind point lists of a timeline, each sorted ascending by start time.
///
/// Only ever filled through the [`TimelineSink`] callbacks of the timeline's groups.
#[derive(Default)]
struct PointSequences {
    timing: RefCell<Vec<Rc<TimingPoint>>>,
    difficulty: RefCell<Vec<Rc<DifficultyPoint>>>,
    effect: RefCell<Vec<Rc<EffectPoint>>>,
    sample: RefCell<Vec<Rc<SamplePoint>>>,
}
impl PointSequences {
    fn insert<P: ControlPoint>(list: &RefCell<Vec<Rc<P>>>, point: &Rc<P>) {
        let mut list = list.borrow_mut();
        let time = point.start_time();

        // a group only holds one point per kind, so an equal time means a stale entry
        match find_index(&list, time, |p| p.start_time()) {
            Ok(index) => list[index] = point.clone(),
            Err(index) => list.insert(index, point.clone()),
        }
        trace!("inserted {:?} point at {time}", P::KIND);
    }

    fn remove<P: ControlPoint>(list: &RefCell<Vec<Rc<P>>>, point: &Rc<P>) {
        let mut list = list.borrow_mut();
        if let Ok(index) = find_index(&list, point.start_time(), |p| p.start_time()) {
            list.remove(index);
        }
    }

    fn clear(&self) {
        self.timing.borrow_mut().clear();
        self.difficulty.borrow_mut().clear();
        self.effect.borrow_mut().clear();
        self.sample.borrow_mut().clear();
    }
}
impl TimelineSink for PointSequences {
    fn on_point_added(&self, point: &AnyControlPoint) {
        match point {
            AnyControlPoint::Timing(p) => Self::insert(&self.timing, p),
            AnyControlPoint::Difficulty(p) => Self::insert(&self.difficulty, p),
            AnyControlPoint::Effect(p) => Self::insert(&self.effect, p),
            AnyControlPoint::Sample(p) => Self::insert(&self.sample, p),
        }
    }

    fn on_point_removed(&self, point: &AnyControlPoint) {
        match point {
            AnyControlPoint::Timing(p) => Self::remove(&self.timing, p),
            AnyControlPoint::Difficulty(p) => Self::remove(&self.difficulty, p),
            AnyControlPoint::Effect(p) => Self::remove(&self.effect, p),
            AnyControlPoint::Sample(p) => Self::remove(&self.sample, p),
        }
    }
}


/// Every control point of a beatmap, grouped by time and sorted by kind.
///
/// Groups are kept sorted ascending with unique start times, and every point in a
/// per-kind list belongs to exactly one group.
///
/// Cloning is shallow: the clone shares its groups and lists with the original,
/// so changes made through either are seen by both. Use [`Self::deep_clone`] for an independent copy.
#[derive(Clone, Default)]
pub struct ControlPointInfo {
    groups: Rc<RefCell<Vec<GroupRef>>>,
    sequences: Rc<PointSequences>,
}
impl ControlPointInfo {
    /// version written in the binary header
    pub const CURRENT_VERSION: u16 = 1;

    pub fn new() -> Self { Self::default() }

    /// The group at exactly `time`, created and inserted in order if it doesnt exist yet.
    pub fn group_at(&self, time: f64) -> GroupRef {
        let time = normalize_time(time);
        let mut groups = self.groups.borrow_mut();

        match find_index(&groups, time, |g| g.borrow().start_time()) {
            Ok(index) => groups[index].clone(),
            Err(index) => {
                trace!("creating control point group at {time}");
                let sink: Rc<dyn TimelineSink> = self.sequences.clone();
                let group = Rc::new(RefCell::new(ControlPointGroup::with_sink(time, sink)));
                groups.insert(index, group.clone());
                group
            }
        }
    }

    /// The group at exactly `time`, if there is one.
    pub fn find_group(&self, time: f64) -> Option<GroupRef> {
        let groups = self.groups.borrow();
        find_index(&groups, time, |g| g.borrow().start_time())
            .ok()
            .map(|index| groups[index].clone())
    }

    /// Add `point` at `time`.
    ///
    /// Returns false without changing anything when the point is redundant,
    /// ie the point of the same kind already in effect at `time` has the same settings.
    ///
    /// A point already in this timeline is moved to `time`.
    /// A point attached anywhere else is left there, and a copy of it is added instead.
    pub fn add(&self, point: impl Into<AnyControlPoint>, time: f64) -> bool {
        let point = point.into();
        let time = normalize_time(time);

        let redundant = match &point {
            AnyControlPoint::Timing(p) => Self::is_redundant_at(p, &self.sequences.timing, time),
            AnyControlPoint::Difficulty(p) => Self::is_redundant_at(p, &self.sequences.difficulty, time),
            AnyControlPoint::Effect(p) => Self::is_redundant_at(p, &self.sequences.effect, time),
            AnyControlPoint::Sample(p) => Self::is_redundant_at(p, &self.sequences.sample, time),
        };
        if redundant {
            debug!("skipping redundant {:?} point at {time}", point.kind());
            return false;
        }

        let point = match point.group_time() {
            None => point,
            Some(old_time) if self.holds(&point, old_time) => {
                if old_time != time {
                    trace!("moving {:?} point from {old_time} to {time}", point.kind());
                    self.remove_kind(point.kind(), old_time);
                }
                point
            }
            Some(_) => point.deep_clone(),
        };

        self.group_at(time).borrow_mut().add(point);
        true
    }

    /// whether the group at `time` holds this exact point
    fn holds(&self, point: &AnyControlPoint, time: f64) -> bool {
        self.find_group(time).is_some_and(|group| {
            group.borrow()
                .get(point.kind())
                .is_some_and(|held| held.ptr_eq(point))
        })
    }

    /// compares against the point in effect at `time`, skipping `point` itself so it can be moved
    fn is_redundant_at<P: ControlPoint>(point: &Rc<P>, list: &RefCell<Vec<Rc<P>>>, time: f64) -> bool {
        let list = list.borrow();
        let end = find_insertion_index(&list, time, |p| p.start_time());
        let existing = list[..end].iter().rev().find(|p| !Rc::ptr_eq(*p, point));

        point.is_redundant(existing.map(|p| &**p))
    }

    /// Remove the point of `point`'s kind at `time`.
    ///
    /// The point is found by kind and time, `point`'s own settings dont matter.
    /// Returns false if there was nothing to remove.
    pub fn remove<P: ControlPoint>(&self, _point: &P, time: f64) -> bool {
        self.remove_kind(P::KIND, time).is_some()
    }

    /// Remove and return the point of `kind` at `time`.
    pub fn remove_kind(&self, kind: ControlPointKind, time: f64) -> Option<AnyControlPoint> {
        let group = self.find_group(time)?;
        let mut group = group.borrow_mut();
        group.remove_kind(kind)
    }

    /// Remove `group` and every point in it from this timeline.
    pub fn remove_group(&self, group: &GroupRef) {
        // snapshot the kinds first, removing fires callbacks
        let kinds = group.borrow()
            .control_points()
            .iter()
            .map(AnyControlPoint::kind)
            .collect::<Vec<_>>();

        {
            let mut group = group.borrow_mut();
            for kind in kinds {
                group.remove_kind(kind);
            }
            group.clear_sink();
            debug!("removed control point group at {}", group.start_time());
        }

        self.groups.borrow_mut().retain(|g| !Rc::ptr_eq(g, group));
    }

    /// Timing point in effect at `time`.
    /// Before the first timing point, the first timing point is used.
    pub fn timing_point_at(&self, time: f64) -> Rc<TimingPoint> {
        Self::point_at(&self.sequences.timing, time, true)
    }

    /// Difficulty point in effect at `time`, [`ControlPoint::default_point`] if there is none.
    pub fn difficulty_point_at(&self, time: f64) -> Rc<DifficultyPoint> {
        Self::point_at(&self.sequences.difficulty, time, false)
    }

    /// Effect point in effect at `time`, [`ControlPoint::default_point`] if there is none.
    pub fn effect_point_at(&self, time: f64) -> Rc<EffectPoint> {
        Self::point_at(&self.sequences.effect, time, false)
    }

    /// Sample point in effect at `time`.
    /// Before the first sample point, the first sample point is used.
    pub fn sample_point_at(&self, time: f64) -> Rc<SamplePoint> {
        Self::point_at(&self.sequences.sample, time, true)
    }

    fn point_at<P: ControlPoint>(list: &RefCell<Vec<Rc<P>>>, time: f64, first_fallback: bool) -> Rc<P> {
        let list = list.borrow();
        find_control_point(&list, time)
            .or_else(|| list.first().filter(|_| first_fallback))
            .cloned()
            .unwrap_or_else(P::default_point)
    }

    /// Empty the timeline.
    ///
    /// Groups still held elsewhere stop reporting to this timeline and lose their points.
    pub fn clear(&self) {
        let groups = std::mem::take(&mut *self.groups.borrow_mut());
        for group in groups {
            let mut group = group.borrow_mut();
            group.clear_sink();
            for kind in ControlPointKind::ALL {
                group.remove_kind(kind);
            }
        }

        self.sequences.clear();
        debug!("cleared control points");
    }

    /// Same as [`Clone::clone`], the result shares everything with `self`.
    pub fn shallow_clone(&self) -> Self { self.clone() }

    /// A fully independent copy, every group and point is duplicated.
    pub fn deep_clone(&self) -> Self {
        let copy = Self::new();
        for group in self.groups.borrow().iter() {
            let group = group.borrow();
            let new_group = copy.group_at(group.start_time());
            let mut new_group = new_group.borrow_mut();
            for point in group.control_points() {
                new_group.add(point.deep_clone());
            }
        }
        copy
    }

    /// whether both share the same underlying storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.groups, &other.groups)
    }

    // the accessors below return copies, the timeline can be edited while holding them

    pub fn groups(&self) -> Vec<GroupRef> {
        self.groups.borrow().clone()
    }

    pub fn timing_points(&self) -> Vec<Rc<TimingPoint>> {
        self.sequences.timing.borrow().clone()
    }
    pub fn difficulty_points(&self) -> Vec<Rc<DifficultyPoint>> {
        self.sequences.difficulty.borrow().clone()
    }
    pub fn effect_points(&self) -> Vec<Rc<EffectPoint>> {
        self.sequences.effect.borrow().clone()
    }
    pub fn sample_points(&self) -> Vec<Rc<SamplePoint>> {
        self.sequences.sample.borrow().clone()
    }

    /// every point of every group, in group order
    pub fn all_points(&self) -> Vec<AnyControlPoint> {
        self.groups.borrow()
            .iter()
            .flat_map(|g| g.borrow().control_points().to_vec())
            .collect()
    }

    /// no groups at all, an emptied group still counts
    pub fn is_empty(&self) -> bool {
        self.groups.borrow().is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut sw = SerializationWriter::new();
        sw.write(self);
        sw.into_bytes()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> SerializationResult<Self> {
        SerializationReader::new(bytes).read("control points")
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// rebuild from stored groups, exactly as they were. no redundancy checks happen here
    fn from_groups(groups: Vec<GroupSnapshot>) -> Self {
        let info = Self::new();
        for GroupSnapshot { time, points } in groups {
            let group = info.group_at(time);
            let mut group = group.borrow_mut();
            for point in points {
                group.add(point);
            }
        }
        info
    }

    fn to_groups(&self) -> Vec<GroupSnapshot> {
        self.groups.borrow()
            .iter()
            .map(|g| {
                let g = g.borrow();
                GroupSnapshot {
                    time: g.start_time(),
                    points: g.control_points().to_vec(),
                }
            })
            .collect()
    }
}

impl core::fmt::Debug for ControlPointInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControlPointInfo")
            .field("groups", &self.groups.borrow())
            .finish()
    }
}

impl Serializable for ControlPointInfo {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        sr.push_parent("ControlPointInfo");

        sr.read_version("ControlPointInfo", Self::CURRENT_VERSION)?;
        let groups = sr.read::<Vec<GroupSnapshot>>("groups")?;

        sr.pop_parent();
        Ok(Self::from_groups(groups))
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write_version(Self::CURRENT_VERSION);
        sw.write(&self.to_groups());
    }
}

// serde goes through the same snapshot as the binary format
impl Serialize for ControlPointInfo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TimelineSnapshot { groups: self.to_groups() }.serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for ControlPointInfo {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TimelineSnapshot::deserialize(deserializer).map(|s| Self::from_groups(s.groups))
    }
}

#[derive(Serialize, Deserialize)]
struct TimelineSnapshot {
    groups: Vec<GroupSnapshot>,
}

/// a group's contents, detached from any timeline
#[derive(Debug, Serialize, Deserialize)]
struct GroupSnapshot {
    time: f64,
    points: Vec<AnyControlPoint>,
}
impl Serializable for GroupSnapshot {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        Ok(Self {
            time: sr.read("time")?,
            points: sr.read("points")?,
        })
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.time);
        sw.write(&self.points);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn times<P: ControlPoint>(points: &[Rc<P>]) -> Vec<f64> {
        points.iter().map(|p| p.start_time()).collect()
    }

    fn group_times(info: &ControlPointInfo) -> Vec<f64> {
        info.groups().iter().map(|g| g.borrow().start_time()).collect()
    }

    #[test]
    fn groups_stay_sorted_and_unique() {
        let info = ControlPointInfo::new();
        for time in [500.0, 0.0, 1500.0, 250.0, 1000.0] {
            assert!(info.add(TimingPoint::with_beat_length(300.0), time));
        }
        info.add(EffectPoint::with_kiai(true), 250.0);

        assert_eq!(group_times(&info), vec![0.0, 250.0, 500.0, 1000.0, 1500.0]);
        assert_eq!(info.groups()[1].borrow().len(), 2);
    }

    #[test]
    fn group_at_reuses_existing() {
        let info = ControlPointInfo::new();
        let a = info.group_at(100.0);
        let b = info.group_at(100.0);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(info.groups().len(), 1);
        assert!(info.find_group(50.0).is_none());
    }

    #[test]
    fn out_of_order_insertion_keeps_kinds_sorted() {
        let info = ControlPointInfo::new();
        let mut sv = 0.5;
        for time in [3000.0, 1000.0, 4000.0, 0.0, 2000.0] {
            sv += 0.5;
            assert!(info.add(DifficultyPoint::with_slider_velocity(sv), time));
            assert!(info.add(TimingPoint::with_beat_length(sv * 100.0), time));
        }
        info.add(SamplePoint::with_bank(HitSample::BANK_SOFT, 50), 2500.0);
        info.add(SamplePoint::with_bank(HitSample::BANK_DRUM, 50), 500.0);
        info.add(SamplePoint::with_bank(HitSample::BANK_SOFT, 80), 1500.0);

        assert_eq!(times(&info.difficulty_points()), vec![0.0, 1000.0, 2000.0, 3000.0, 4000.0]);
        assert_eq!(times(&info.timing_points()), vec![0.0, 1000.0, 2000.0, 3000.0, 4000.0]);
        assert_eq!(times(&info.sample_points()), vec![500.0, 1500.0, 2500.0]);

        assert_eq!(info.difficulty_point_at(3500.0).slider_velocity(), 1.0);
        assert_eq!(info.difficulty_point_at(1999.0).slider_velocity(), 1.5);
    }

    #[test]
    fn negative_zero_is_the_same_time() {
        let info = ControlPointInfo::new();
        assert!(info.add(TimingPoint::new(), (-0.4f64).round()));
        assert!(info.add(EffectPoint::with_kiai(true), 0.0));

        assert_eq!(info.groups().len(), 1);
        assert_eq!(info.groups()[0].borrow().len(), 2);
        assert!(info.timing_point_at(0.0).start_time().is_sign_positive());

        assert!(info.remove(&TimingPoint::new(), 0.0));
        assert!(info.remove(&EffectPoint::new(), -0.0));
        assert!(info.timing_points().is_empty());
        assert!(info.effect_points().is_empty());
    }

    #[test]
    fn re_adding_a_point_moves_it() {
        let info = ControlPointInfo::new();
        let point = Rc::new(TimingPoint::with_beat_length(500.0));
        info.add(point.clone(), 0.0);
        info.add(TimingPoint::with_beat_length(250.0), 500.0);
        assert!(info.add(point.clone(), 1000.0));

        assert_eq!(times(&info.timing_points()), vec![500.0, 1000.0]);
        assert_eq!(point.group_time(), Some(1000.0));
        assert!(info.find_group(0.0).is_some_and(|g| g.borrow().is_empty()));
        assert_eq!(info.timing_point_at(100.0).start_time(), 500.0);
        assert!(Rc::ptr_eq(&info.timing_point_at(1000.0), &point));
    }

    #[test]
    fn moving_a_point_skips_itself_for_redundancy() {
        let info = ControlPointInfo::new();
        let kiai = Rc::new(EffectPoint::with_kiai(true));
        info.add(kiai.clone(), 0.0);

        assert!(info.add(kiai.clone(), 400.0));
        assert_eq!(times(&info.effect_points()), vec![400.0]);
        assert!(!info.effect_point_at(100.0).kiai);
    }

    #[test]
    fn point_from_another_timeline_is_copied() {
        let first = ControlPointInfo::new();
        let second = ControlPointInfo::new();
        let point = Rc::new(SamplePoint::with_bank(HitSample::BANK_DRUM, 40));

        first.add(point.clone(), 100.0);
        assert!(second.add(point.clone(), 100.0));

        assert_eq!(point.group_time(), Some(100.0));
        assert!(Rc::ptr_eq(&first.sample_point_at(100.0), &point));

        let copy = second.sample_point_at(100.0);
        assert!(!Rc::ptr_eq(&copy, &point));
        assert_eq!(*copy, *point);
        assert_eq!(first.sample_points().len(), 1);
        assert_eq!(second.sample_points().len(), 1);
    }

    #[test]
    fn editing_while_holding_accessors() {
        let info = ControlPointInfo::new();
        info.add(TimingPoint::new(), 0.0);

        let groups = info.groups();
        let timing = info.timing_points();
        info.add(TimingPoint::with_beat_length(200.0), 100.0);
        info.remove_group(&groups[0]);

        assert_eq!(timing.len(), 1);
        assert_eq!(info.timing_points().len(), 1);
        assert_eq!(group_times(&info), vec![100.0]);
    }

    #[test]
    fn corrupt_bytes_are_an_error() {
        let mut bytes = sample_timeline().to_bytes();
        bytes.truncate(bytes.len() - 3);
        let err = ControlPointInfo::from_bytes(bytes).expect_err("truncated data");
        assert_eq!(err.inner, SerializationErrorEnum::OutOfBounds);
    }

    #[test]
    fn replacing_a_point_keeps_one_entry() {
        let info = ControlPointInfo::new();
        info.add(EffectPoint::with_kiai(true), 0.0);
        info.add(EffectPoint::with_kiai(false), 1000.0);
        info.add(EffectPoint::with_kiai(true), 1000.0);

        assert_eq!(times(&info.effect_points()), vec![0.0, 1000.0]);
        assert!(info.effect_point_at(1000.0).kiai);
        assert_eq!(info.groups()[1].borrow().len(), 1);
    }

    #[test]
    fn redundant_points_are_rejected() {
        let info = ControlPointInfo::new();
        assert!(info.add(SamplePoint::with_bank(HitSample::BANK_SOFT, 60), 0.0));
        assert!(!info.add(SamplePoint::with_bank(HitSample::BANK_SOFT, 60), 200.0));
        assert!(info.add(SamplePoint::with_bank(HitSample::BANK_SOFT, 70), 200.0));

        assert!(info.add(DifficultyPoint::with_slider_velocity(2.0), 0.0));
        assert!(!info.add(DifficultyPoint::with_slider_velocity(2.0), 500.0));

        // nothing was created for rejected points
        assert_eq!(group_times(&info), vec![0.0, 200.0]);
    }

    #[test]
    fn redundancy_checks_the_preceding_point() {
        let info = ControlPointInfo::new();
        info.add(EffectPoint::with_kiai(true), 1000.0);

        // before the only kiai point, so compared against nothing
        assert!(info.add(EffectPoint::with_kiai(true), 0.0));
        assert_eq!(info.effect_points().len(), 2);
    }

    #[test]
    fn timing_points_are_never_redundant() {
        let info = ControlPointInfo::new();
        assert!(info.add(TimingPoint::with_beat_length(500.0), 0.0));
        assert!(info.add(TimingPoint::with_beat_length(500.0), 1000.0));

        let point = info.timing_point_at(1500.0);
        assert_eq!(point.start_time(), 1000.0);
        assert_eq!(point.bpm(), 120.0);
    }

    #[test]
    fn effect_point_lookup() {
        let info = ControlPointInfo::new();
        assert!(info.add(EffectPoint::with_kiai(true), 0.0));
        assert!(!info.add(EffectPoint::with_kiai(true), 100.0));

        let at_50 = info.effect_point_at(50.0);
        let at_150 = info.effect_point_at(150.0);
        assert!(Rc::ptr_eq(&at_50, &at_150));
        assert_eq!(at_50.start_time(), 0.0);
    }

    #[test]
    fn query_fallbacks() {
        let info = ControlPointInfo::new();
        assert!(Rc::ptr_eq(&info.timing_point_at(0.0), &TimingPoint::default_point()));
        assert!(Rc::ptr_eq(&info.sample_point_at(0.0), &SamplePoint::default_point()));

        info.add(DifficultyPoint::with_slider_velocity(1.5), 0.0);
        info.add(EffectPoint::with_kiai(true), 0.0);
        info.add(TimingPoint::with_beat_length(400.0), 100.0);
        info.add(SamplePoint::with_bank(HitSample::BANK_DRUM, 40), 100.0);

        let difficulty = info.difficulty_point_at(-100.0);
        assert!(Rc::ptr_eq(&difficulty, &DifficultyPoint::default_point()));
        assert_eq!(difficulty.slider_velocity(), 1.0);
        assert!(!info.effect_point_at(-1.0).kiai);

        // timing and sample use the first point instead
        assert_eq!(info.timing_point_at(0.0).beat_length(), 400.0);
        assert_eq!(info.sample_point_at(-50.0).bank, HitSample::BANK_DRUM);
    }

    #[test]
    fn point_applies_until_superseded() {
        let info = ControlPointInfo::new();
        let first = Rc::new(DifficultyPoint::with_slider_velocity(2.0));
        info.add(first.clone(), 100.0);
        info.add(DifficultyPoint::with_slider_velocity(3.0), 900.0);

        for time in [100.0, 400.0, 899.9] {
            assert!(Rc::ptr_eq(&info.difficulty_point_at(time), &first));
        }
        assert_eq!(info.difficulty_point_at(900.0).slider_velocity(), 3.0);
    }

    #[test]
    fn remove_by_time() {
        let info = ControlPointInfo::new();
        info.add(EffectPoint::with_kiai(true), 0.0);
        info.add(EffectPoint::with_kiai(false), 500.0);

        // settings of the argument dont matter, only kind and time
        assert!(info.remove(&EffectPoint::with_kiai(true), 500.0));
        assert!(!info.remove(&EffectPoint::new(), 500.0));
        assert!(!info.remove(&EffectPoint::new(), 250.0));
        assert!(!info.remove(&TimingPoint::new(), 0.0));

        assert_eq!(times(&info.effect_points()), vec![0.0]);
        assert!(info.effect_point_at(800.0).kiai);

        // the emptied group is still there
        assert_eq!(group_times(&info), vec![0.0, 500.0]);
        assert!(info.find_group(500.0).is_some_and(|g| g.borrow().is_empty()));
    }

    #[test]
    fn removed_point_is_detached() {
        let info = ControlPointInfo::new();
        let point = Rc::new(SamplePoint::with_bank(HitSample::BANK_SOFT, 30));
        info.add(point.clone(), 750.0);
        assert_eq!(point.group_time(), Some(750.0));

        let removed = info.remove_kind(ControlPointKind::Sample, 750.0);
        assert!(removed.is_some_and(|p| p.as_sample().is_some_and(|p| Rc::ptr_eq(p, &point))));
        assert_eq!(point.group_time(), None);
        assert_eq!(point.start_time(), 750.0);
    }

    #[test]
    fn remove_group_cascades() {
        let info = ControlPointInfo::new();
        info.add(TimingPoint::with_beat_length(500.0), 0.0);
        info.add(EffectPoint::with_kiai(true), 0.0);
        info.add(TimingPoint::with_beat_length(250.0), 1000.0);
        info.add(EffectPoint::with_kiai(false), 1000.0);
        info.add(SamplePoint::with_bank(HitSample::BANK_SOFT, 50), 1000.0);

        let group = info.group_at(1000.0);
        let members = group.borrow().control_points().to_vec();
        info.remove_group(&group);

        assert_eq!(group_times(&info), vec![0.0]);
        assert!(group.borrow().is_empty());
        assert!(!group.borrow().has_sink());
        assert!(members.iter().all(|p| !p.state().is_attached()));

        assert_eq!(info.timing_point_at(1500.0).beat_length(), 500.0);
        assert!(info.effect_point_at(1500.0).kiai);
        assert!(Rc::ptr_eq(&info.sample_point_at(1500.0), &SamplePoint::default_point()));

        // a removed group no longer feeds the timeline
        group.borrow_mut().add(DifficultyPoint::with_slider_velocity(4.0));
        assert!(info.difficulty_points().is_empty());
    }

    #[test]
    fn clear_empties_everything() {
        let info = ControlPointInfo::new();
        let point = Rc::new(TimingPoint::with_beat_length(300.0));
        info.add(point.clone(), 0.0);
        info.add(DifficultyPoint::with_slider_velocity(2.0), 10.0);
        let group = info.group_at(10.0);

        info.clear();
        assert!(info.is_empty());
        assert!(info.timing_points().is_empty());
        assert!(info.difficulty_points().is_empty());
        assert!(!point.state().is_attached());

        group.borrow_mut().add(EffectPoint::new());
        assert!(info.effect_points().is_empty());
    }

    #[test]
    fn clone_is_shallow() {
        let info = ControlPointInfo::new();
        info.add(TimingPoint::with_beat_length(500.0), 0.0);

        let copy = info.clone();
        assert!(copy.ptr_eq(&info));
        info.add(TimingPoint::with_beat_length(250.0), 1000.0);
        assert_eq!(copy.timing_points().len(), 2);
        assert_eq!(copy.groups().len(), 2);

        // copying a point's settings doesnt touch the lists
        let mut detached = (*copy.timing_point_at(0.0)).clone();
        detached.set_beat_length(100.0);
        assert_eq!(info.timing_points().len(), 2);
        assert_eq!(info.timing_point_at(0.0).beat_length(), 500.0);

        assert!(info.shallow_clone().ptr_eq(&info));
    }

    #[test]
    fn deep_clone_is_independent() {
        let info = ControlPointInfo::new();
        info.add(TimingPoint::with_beat_length(500.0), 0.0);
        info.add(EffectPoint::with_kiai(true), 200.0);
        info.group_at(400.0);

        let copy = info.deep_clone();
        assert!(!copy.ptr_eq(&info));
        assert_eq!(group_times(&copy), vec![0.0, 200.0, 400.0]);
        assert!(!Rc::ptr_eq(&copy.timing_point_at(0.0), &info.timing_point_at(0.0)));
        assert_eq!(*copy.timing_point_at(0.0), *info.timing_point_at(0.0));

        copy.add(TimingPoint::with_beat_length(100.0), 300.0);
        assert_eq!(info.timing_points().len(), 1);
    }

    #[test]
    fn all_points_in_group_order() {
        let info = ControlPointInfo::new();
        info.add(EffectPoint::with_kiai(true), 500.0);
        info.add(TimingPoint::new(), 0.0);
        info.add(SamplePoint::new(), 0.0);

        let kinds = info.all_points().iter().map(AnyControlPoint::kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![ControlPointKind::Timing, ControlPointKind::Sample, ControlPointKind::Effect]);
    }

    fn sample_timeline() -> ControlPointInfo {
        let info = ControlPointInfo::new();
        let mut timing = TimingPoint::with_beat_length(333.3);
        timing.time_signature = TimeSignature::SimpleTriple;
        info.add(timing, 0.0);
        info.add(DifficultyPoint::with_slider_velocity(1.4), 0.0);
        info.add(EffectPoint::with_kiai(true), 12000.0);
        info.add(SamplePoint::with_bank(HitSample::BANK_DRUM, 70), 12000.0);
        info.group_at(20000.0);
        info
    }

    #[test]
    fn binary_round_trip() {
        let info = sample_timeline();

        let read = ControlPointInfo::from_bytes(info.to_bytes()).expect("read timeline");

        assert_eq!(group_times(&read), vec![0.0, 12000.0, 20000.0]);
        assert_eq!(read.all_points(), info.all_points());
        assert_eq!(read.timing_point_at(5.0).time_signature, TimeSignature::SimpleTriple);
        assert_eq!(read.sample_point_at(13000.0).volume, 70);
    }

    #[test]
    fn newer_version_is_rejected() {
        let mut sw = SerializationWriter::new();
        sw.write_version(ControlPointInfo::CURRENT_VERSION + 1);
        sw.write(&Vec::<GroupSnapshot>::new());

        let err = ControlPointInfo::from_bytes(sw.into_bytes()).expect_err("version check");
        assert_eq!(err.inner, SerializationErrorEnum::UnsupportedVersion {
            type_name: "ControlPointInfo",
            version: ControlPointInfo::CURRENT_VERSION + 1,
        });
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_round_trip() {
        let info = sample_timeline();
        let json = info.to_json().expect("to json");
        let read = ControlPointInfo::from_json(&json).expect("from json");

        assert_eq!(group_times(&read), vec![0.0, 12000.0, 20000.0]);
        assert_eq!(read.all_points(), info.all_points());
        assert!(read.effect_point_at(15000.0).kiai);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_clamps_values() {
        let json = r#"{"groups":[{"time":0.0,"points":[{"kind":"timing","beat_length":1.0}]}]}"#;
        let info = ControlPointInfo::from_json(json).expect("from json");
        assert_eq!(info.timing_point_at(0.0).beat_length(), TimingPoint::MIN_BEAT_LENGTH);
    }
}
