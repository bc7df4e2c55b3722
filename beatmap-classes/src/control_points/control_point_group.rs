use crate::prelude::*;
use crate::utils::binary_search::normalize_time;

/// Gets told about every point a group gains or loses.
///
/// [`ControlPointInfo`] installs one on each group it creates to keep its per-kind lists in sync.
pub trait TimelineSink {
    fn on_point_added(&self, point: &AnyControlPoint);
    fn on_point_removed(&self, point: &AnyControlPoint);
}

/// All control points sharing one start time, at most one of each kind.
pub struct ControlPointGroup {
    start_time: f64,
    control_points: Vec<AnyControlPoint>,
    sink: Option<Rc<dyn TimelineSink>>,
}
impl ControlPointGroup {
    /// a group nothing is listening to
    pub fn new(start_time: f64) -> Self {
        Self {
            start_time: normalize_time(start_time),
            control_points: Vec::new(),
            sink: None,
        }
    }

    pub fn with_sink(start_time: f64, sink: Rc<dyn TimelineSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::new(start_time)
        }
    }

    pub fn start_time(&self) -> f64 { self.start_time }
    pub fn control_points(&self) -> &[AnyControlPoint] { &self.control_points }
    pub fn len(&self) -> usize { self.control_points.len() }
    pub fn is_empty(&self) -> bool { self.control_points.is_empty() }
    pub fn has_sink(&self) -> bool { self.sink.is_some() }

    /// the point of `kind` in this group, if there is one
    pub fn get(&self, kind: ControlPointKind) -> Option<&AnyControlPoint> {
        self.control_points.iter().find(|p| p.kind() == kind)
    }

    /// Add a point to this group, replacing any point of the same kind.
    ///
    /// The point's start time becomes the group's.
    /// A point still attached to a group at another time is copied rather than taken from it.
    pub fn add(&mut self, point: impl Into<AnyControlPoint>) {
        let mut point = point.into();
        if point.group_time().is_some_and(|time| time != self.start_time) {
            point = point.deep_clone();
        }
        self.remove_kind(point.kind());

        point.state().attach(self.start_time);
        self.control_points.push(point.clone());

        if let Some(sink) = &self.sink {
            sink.on_point_added(&point);
        }
    }

    /// Remove whichever point in this group has the same kind as `point`.
    ///
    /// Returns false if there was none.
    pub fn remove(&mut self, point: &AnyControlPoint) -> bool {
        self.remove_kind(point.kind()).is_some()
    }

    /// Remove and detach the point of `kind`, returning it.
    pub fn remove_kind(&mut self, kind: ControlPointKind) -> Option<AnyControlPoint> {
        let index = self.control_points.iter().position(|p| p.kind() == kind)?;
        let point = self.control_points.remove(index);
        point.state().detach();

        if let Some(sink) = &self.sink {
            sink.on_point_removed(&point);
        }

        Some(point)
    }

    /// stop notifying anyone, returning the old sink
    pub fn clear_sink(&mut self) -> Option<Rc<dyn TimelineSink>> {
        self.sink.take()
    }
}

impl core::fmt::Debug for ControlPointGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControlPointGroup")
            .field("start_time", &self.start_time)
            .field("control_points", &self.control_points)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
