// ---------------------------------------------------------------------------
// Ranker/Selector — candidate intersection, anchor exclusion, top-K
// ---------------------------------------------------------------------------

use std::collections::HashSet;

use crate::scoring::ScoredIndex;

/// Select the top-`k` scored candidates.
///
/// Keeps only indices present in `candidates`, never returns the anchor,
/// sorts score-descending with ties broken by index ascending, and
/// truncates to `k`. Fewer than `k` survivors (including zero) is a valid
/// result.
pub fn rank(
	scores: &[ScoredIndex],
	candidates: &HashSet<usize>,
	anchor: usize,
	k: usize,
) -> Vec<ScoredIndex> {
	let mut hits: Vec<ScoredIndex> = scores
		.iter()
		.filter(|s| s.index != anchor && candidates.contains(&s.index))
		.copied()
		.collect();
	hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
	hits.truncate(k);
	hits
}
