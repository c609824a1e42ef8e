//! One-dimensional gap clustering.
//!
//! Column bands, lines and paragraph spacing groups are all built by sweeping
//! sorted intervals and starting a new cluster whenever the gap to the
//! previous one exceeds a caller-supplied threshold.

use std::cmp::Ordering;

/// A closed interval on one axis, tagged with the index of its source item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Lower bound
    pub start: f32,
    /// Upper bound
    pub end: f32,
    /// Index of the source item
    pub index: usize,
}

impl Interval {
    /// Create an interval.
    pub fn new(start: f32, end: f32, index: usize) -> Self {
        Self { start, end, index }
    }

    /// Create a zero-length interval at `value`.
    pub fn point(value: f32, index: usize) -> Self {
        Self::new(value, value, index)
    }
}

/// A run of intervals with no gap larger than the threshold between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Smallest start of the members
    pub start: f32,
    /// Largest end of the members
    pub end: f32,
    /// Source indices of the members, in sweep order
    pub members: Vec<usize>,
}

impl Cluster {
    fn seed(interval: &Interval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            members: vec![interval.index],
        }
    }

    fn push(&mut self, interval: &Interval) {
        self.end = self.end.max(interval.end);
        self.members.push(interval.index);
    }

    /// Extent of the cluster.
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    /// Source index of the most recently added member.
    pub fn last_member(&self) -> Option<usize> {
        self.members.last().copied()
    }
}

/// Sweep `intervals` into clusters.
///
/// Intervals are sorted by start, then end, then index, so the result does
/// not depend on input order. An interval joins the current cluster when
/// `interval.start - cluster.end <= max_gap(cluster, interval)`.
pub fn cluster_by_gap<F>(intervals: &[Interval], mut max_gap: F) -> Vec<Cluster>
where
    F: FnMut(&Cluster, &Interval) -> f32,
{
    let mut sorted: Vec<&Interval> = intervals.iter().collect();
    sorted.sort_by(|a, b| {
        a.start
            .total_cmp(&b.start)
            .then_with(|| a.end.total_cmp(&b.end))
            .then_with(|| a.index.cmp(&b.index))
    });

    let mut clusters: Vec<Cluster> = Vec::new();
    for interval in sorted {
        match clusters.last_mut() {
            Some(current) if interval.start - current.end <= max_gap(&*current, interval) => {
                current.push(interval);
            }
            _ => clusters.push(Cluster::seed(interval)),
        }
    }

    clusters
}

/// Median of `values`, or `None` when empty.
pub(crate) fn median(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_points() {
        let points = vec![
            Interval::point(10.0, 0),
            Interval::point(11.0, 1),
            Interval::point(30.0, 2),
            Interval::point(10.5, 3),
        ];
        let clusters = cluster_by_gap(&points, |_, _| 2.0);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members, vec![0, 3, 1]);
        assert_eq!(clusters[0].start, 10.0);
        assert_eq!(clusters[0].end, 11.0);
        assert_eq!(clusters[1].members, vec![2]);
    }

    #[test]
    fn test_overlapping_intervals_merge() {
        let intervals = vec![
            Interval::new(0.0, 50.0, 0),
            Interval::new(40.0, 60.0, 1),
            Interval::new(100.0, 120.0, 2),
        ];
        let clusters = cluster_by_gap(&intervals, |_, _| 0.0);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].span(), 60.0);
        assert_eq!(clusters[1].last_member(), Some(2));
    }

    #[test]
    fn test_threshold_sees_cluster() {
        let points: Vec<Interval> = [0.0, 5.0, 10.0, 15.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| Interval::point(v, i))
            .collect();

        // Cap clusters at two members
        let clusters = cluster_by_gap(&points, |c, _| if c.members.len() < 2 { 10.0 } else { -1.0 });
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[1].members, vec![2, 3]);
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_by_gap(&[], |_, _| 1.0).is_empty());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&mut []), None);
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 2.0, 3.0]), Some(2.5));
    }
}
