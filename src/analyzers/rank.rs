//! Top and bottom performers by overall passing rate.

use crate::analyzers::types::SchoolSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Descending,
    Ascending,
}

/// Returns the first `k` summaries sorted by overall passing rate.
///
/// The sort is stable, so ties keep the incoming (name-sorted) order.
pub fn top_bottom(summaries: &[SchoolSummary], k: usize, order: RankOrder) -> Vec<SchoolSummary> {
    let mut ranked = summaries.to_vec();
    ranked.sort_by(|a, b| match order {
        RankOrder::Descending => b.overall_passing_rate.total_cmp(&a.overall_passing_rate),
        RankOrder::Ascending => a.overall_passing_rate.total_cmp(&b.overall_passing_rate),
    });
    ranked.truncate(k);
    ranked
}
