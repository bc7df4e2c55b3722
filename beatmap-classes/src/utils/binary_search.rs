//! Time-keyed searches over slices sorted ascending by time.
//!
//! Times are compared with [`f64::total_cmp`] after [`normalize_time`], so every value has a
//! place in the ordering and `-0.0` sorts together with `0.0`.

use std::cmp::Ordering;

use crate::control_points::ControlPoint;
use crate::prelude::*;

/// Fold `-0.0` into `0.0`, every other value is unchanged.
pub fn normalize_time(time: f64) -> f64 {
    time + 0.0
}

fn compare(a: f64, b: f64) -> Ordering {
    normalize_time(a).total_cmp(&normalize_time(b))
}

/// Looks for an item whose key equals `target`.
///
/// Returns `Ok(index)` on an exact match, otherwise `Err(index)` with the position
/// `target` would have to be inserted at to keep the slice sorted.
pub fn find_index<T>(items: &[T], target: f64, key: impl Fn(&T) -> f64) -> Result<usize, usize> {
    items.binary_search_by(|item| compare(key(item), target))
}

/// Index after every item with a key `<= target`.
///
/// Inserting at this index keeps the slice sorted, and places the new item
/// after any existing items with the same key.
pub fn find_insertion_index<T>(items: &[T], target: f64, key: impl Fn(&T) -> f64) -> usize {
    items.partition_point(|item| compare(key(item), target) != Ordering::Greater)
}

/// The last item with a key `<= target`, if any.
pub fn find_at_or_before<T>(items: &[T], target: f64, key: impl Fn(&T) -> f64) -> Option<&T> {
    find_insertion_index(items, target, key)
        .checked_sub(1)
        .map(|i| &items[i])
}

/// The control point in effect at `time`, ie the latest one starting at or before it.
pub fn find_control_point<P: ControlPoint>(points: &[Rc<P>], time: f64) -> Option<&Rc<P>> {
    find_at_or_before(points, time, |p| p.start_time())
}
