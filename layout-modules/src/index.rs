use crate::Rect;

/// Major-axis interval index over a flat list of frames.
///
/// Frames are sorted by their leading major edge, and `reach[i]` holds the furthest trailing
/// major edge among the first `i + 1` sorted frames. Both sequences are non-decreasing, so the
/// frames that can overlap a major interval `[lo, hi)` form one contiguous window found with
/// two binary searches.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SpatialIndex {
    order: Vec<usize>, // flat ordinals, sorted by leading major edge
    starts: Vec<f64>,
    reach: Vec<f64>,
}

impl SpatialIndex {
    pub(crate) fn build(frames: &[Rect]) -> Self {
        let mut order: Vec<usize> = (0..frames.len()).collect();
        order.sort_by(|&a, &b| frames[a].min_major().total_cmp(&frames[b].min_major()));

        let mut starts = Vec::with_capacity(order.len());
        let mut reach = Vec::with_capacity(order.len());
        let mut furthest = f64::NEG_INFINITY;
        for &ordinal in &order {
            let frame = &frames[ordinal];
            starts.push(frame.min_major());
            furthest = furthest.max(frame.max_major());
            reach.push(furthest);
        }

        Self {
            order,
            starts,
            reach,
        }
    }

    /// Calls `f` with every ordinal whose major span may overlap `[lo, hi)`, in no particular
    /// order. Callers still need an exact intersection test.
    pub(crate) fn for_each_candidate(&self, lo: f64, hi: f64, mut f: impl FnMut(usize)) {
        let first = self.reach.partition_point(|&r| r <= lo);
        let end = self.starts.partition_point(|&s| s < hi);
        if first >= end {
            return;
        }
        for &ordinal in &self.order[first..end] {
            f(ordinal);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}
