use std::cmp::Ordering;

use serde::Serialize;

use crate::record::Record;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankResult {
    pub best: Record,
    pub median: Record,
    pub worst: Record,
    pub count: usize,
}

/// Orders records by ascending revenue and picks the extremes and the middle.
///
/// The sort is stable, so records with equal revenue keep their upload order:
/// among ties the earliest upload is the `worst` candidate and the latest the `best`.
/// `median` is the element at `count / 2` of the sorted copy. For even counts this
/// is the upper of the two middle records, not an average of them.
///
/// Returns `None` for an empty slice.
pub fn rank(records: &[Record]) -> Option<RankResult> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    // Revenues are always finite, and -0.0 must tie with 0.0.
    sorted.sort_by(|a, b| {
        a.revenue()
            .partial_cmp(&b.revenue())
            .unwrap_or(Ordering::Equal)
    });

    let worst = *sorted.first()?;
    let best = *sorted.last()?;
    let median = sorted[sorted.len() / 2];

    Some(RankResult {
        best: best.clone(),
        median: median.clone(),
        worst: worst.clone(),
        count: sorted.len(),
    })
}
