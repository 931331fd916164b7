//! Assigning candidate polygons (typically buildings) to the blocks that
//! contain them.

use hashbrown::HashMap;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use tracing::info;

use crate::models::PixelPoint;
use crate::polygon::polygon_contains;

/// For each container polygon, the indices of all candidates it fully
/// contains. Both lists must be in the same pixel coordinate space.
///
/// Every container index appears in the result, with an empty list when
/// nothing matched. Containment is the per-vertex approximation from
/// [`polygon_contains`]: a candidate whose edges dip outside the container
/// between vertices is still matched, and that looseness is accepted for
/// this data.
pub fn match_candidates(
    containers: &[Vec<PixelPoint>],
    candidates: &[Vec<PixelPoint>],
) -> HashMap<usize, Vec<usize>> {
    info!(
        "Matching {} candidates against {} containers",
        candidates.len(),
        containers.len()
    );
    let entries: Vec<(usize, Vec<usize>)> = containers
        .par_iter()
        .enumerate()
        .progress_count(containers.len() as u64)
        .map(|(i, container)| {
            let matched: Vec<usize> = candidates
                .iter()
                .enumerate()
                .filter(|(_, candidate)| polygon_contains(container, candidate))
                .map(|(j, _)| j)
                .collect();
            (i, matched)
        })
        .collect();
    entries.into_iter().collect()
}
