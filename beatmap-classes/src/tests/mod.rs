use crate::prelude::*;

/// builds a timeline the way a beatmap decoder would, one point at a time in file order
fn decode(lines: &[(f64, AnyControlPoint)]) -> (ControlPointInfo, Vec<bool>) {
    let info = ControlPointInfo::new();
    let added = lines.iter()
        .map(|(time, point)| info.add(point.clone(), *time))
        .collect();
    (info, added)
}

fn assert_consistent(info: &ControlPointInfo) {
    let groups = info.groups();
    assert!(groups.windows(2).all(|w| w[0].borrow().start_time() < w[1].borrow().start_time()));

    let grouped = groups.iter().map(|g| g.borrow().len()).sum::<usize>();
    let listed = info.timing_points().len()
        + info.difficulty_points().len()
        + info.effect_points().len()
        + info.sample_points().len();
    assert_eq!(grouped, listed);

    for point in info.all_points() {
        assert_eq!(point.group_time(), Some(point.start_time()));
    }
}

#[test]
fn identical_timing_points_both_count() {
    let (info, added) = decode(&[
        (0.0, TimingPoint::with_beat_length(500.0).into()),
        (1000.0, TimingPoint::with_beat_length(500.0).into()),
    ]);
    assert_eq!(added, vec![true, true]);

    let point = info.timing_point_at(1500.0);
    assert_eq!(point.start_time(), 1000.0);
    assert_eq!(point.bpm(), 120.0);
    assert_consistent(&info);
}

#[test]
fn repeated_kiai_is_dropped() {
    let (info, added) = decode(&[
        (0.0, EffectPoint::with_kiai(true).into()),
        (100.0, EffectPoint::with_kiai(true).into()),
    ]);
    assert_eq!(added, vec![true, false]);

    assert_eq!(info.effect_point_at(50.0).start_time(), 0.0);
    assert_eq!(info.effect_point_at(150.0).start_time(), 0.0);
    assert_eq!(info.groups().len(), 1);
}

#[test]
fn difficulty_before_first_point_is_default() {
    let (info, _) = decode(&[(0.0, DifficultyPoint::with_slider_velocity(1.5).into())]);
    assert_eq!(info.difficulty_point_at(-100.0).slider_velocity(), 1.0);
    assert_eq!(info.difficulty_point_at(0.0).slider_velocity(), 1.5);
}

#[test]
fn decoded_map() {
    let mut inherited = DifficultyPoint::with_slider_velocity(0.8);
    inherited.generate_ticks = false;

    let (info, added) = decode(&[
        (120.0, TimingPoint::with_beat_length(352.941).into()),
        (120.0, SamplePoint::with_bank(HitSample::BANK_SOFT, 70).into()),
        (120.0, EffectPoint::new().into()),
        (11414.0, EffectPoint::with_kiai(true).into()),
        (11414.0, SamplePoint::with_bank(HitSample::BANK_SOFT, 70).into()),
        (22708.0, inherited.into()),
        (22708.0, EffectPoint::new().into()),
        (33999.0, TimingPoint::with_beat_length(352.941).into()),
        (33999.0, DifficultyPoint::with_slider_velocity(0.8).into()),
    ]);

    // only the repeated sample point goes, 0.8 sv with ticks back on is a change
    assert_eq!(added, vec![true, true, true, true, false, true, true, true, true]);
    assert_consistent(&info);

    assert!(info.effect_point_at(20000.0).kiai);
    assert!(!info.effect_point_at(30000.0).kiai);
    assert!(!info.difficulty_point_at(30000.0).generate_ticks);
    assert!(info.difficulty_point_at(34000.0).generate_ticks);
    assert_eq!(info.sample_point_at(0.0).volume, 70);
    assert_eq!(info.timing_point_at(40000.0).start_time(), 33999.0);
}

#[test]
fn editing_session() {
    let info = ControlPointInfo::new();
    info.add(TimingPoint::with_beat_length(400.0), 0.0);
    info.add(EffectPoint::with_kiai(true), 8000.0);
    info.add(EffectPoint::with_kiai(false), 16000.0);
    info.add(TimingPoint::with_beat_length(300.0), 4000.0);
    info.add(DifficultyPoint::with_slider_velocity(2.0), 2000.0);
    assert_consistent(&info);

    // move the kiai section start
    assert!(info.remove(&EffectPoint::new(), 8000.0));
    assert!(info.add(EffectPoint::with_kiai(true), 6000.0));
    assert_consistent(&info);
    assert!(info.effect_point_at(7000.0).kiai);

    // drop everything at 4000
    let group = info.group_at(4000.0);
    info.remove_group(&group);
    assert_eq!(info.timing_point_at(5000.0).beat_length(), 400.0);
    assert_consistent(&info);

    // the group emptied by the move is still around
    assert!(info.find_group(8000.0).is_some_and(|g| g.borrow().is_empty()));
    assert_eq!(info.groups().len(), 5);
}

#[test]
fn removed_group_leaves_no_stale_points() {
    let info = ControlPointInfo::new();
    info.add(SamplePoint::with_bank(HitSample::BANK_DRUM, 50), 300.0);
    info.add(DifficultyPoint::with_slider_velocity(3.0), 300.0);

    let group = info.group_at(300.0);
    info.remove_group(&group);

    assert!(Rc::ptr_eq(&info.sample_point_at(400.0), &SamplePoint::default_point()));
    assert!(Rc::ptr_eq(&info.difficulty_point_at(400.0), &DifficultyPoint::default_point()));
    assert!(info.is_empty());
}

#[test]
fn shallow_clone_sees_changes() {
    let info = ControlPointInfo::new();
    info.add(SamplePoint::new(), 0.0);
    let copy = info.clone();

    info.add(SamplePoint::with_bank(HitSample::BANK_SOFT, 20), 100.0);
    assert_eq!(copy.sample_points().len(), 2);

    copy.clear();
    assert!(info.sample_points().is_empty());
    assert!(info.is_empty());
}

#[test]
fn hit_objects_follow_the_timeline() {
    let (info, _) = decode(&[
        (0.0, TimingPoint::with_beat_length(500.0).into()),
        (0.0, SamplePoint::with_bank(HitSample::BANK_NORMAL, 60).into()),
        (1000.0, EffectPoint::with_kiai(true).into()),
        (1000.0, DifficultyPoint::with_slider_velocity(1.2).into()),
    ]);

    let mut objects = vec![HitObject::new(500.0), HitObject::new(1000.0)];
    for object in objects.iter_mut() {
        object.samples.push(HitSample::named(HitSample::HIT_NORMAL));
        object.apply_defaults(&info);
    }

    assert!(!objects[0].kiai);
    assert!(objects[1].kiai);
    assert_eq!(objects[0].slider_velocity, 1.0);
    assert_eq!(objects[1].slider_velocity, 1.2);
    assert!(objects.iter().all(|o| o.samples[0].bank == HitSample::BANK_NORMAL));
}
