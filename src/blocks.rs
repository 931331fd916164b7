//! Block extraction: ring collection, deduplication, encompass filtering,
//! and the end-to-end pipeline.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use hashbrown::HashSet;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Error;
use crate::graph::RoadGraph;
use crate::models::{Block, GeoBounds, GeoPoint, NodeId, NodeTable, PixelBounds, PixelPoint, Way};
use crate::polygon::polygon_contains;
use crate::rings::find_rings_at;
use crate::transform::Projection;
use crate::merge;

/// Run the ring search from every vertex of the graph. Starting nodes are
/// independent, so the searches run in parallel; results come back in
/// sorted-node order regardless.
pub fn find_all_rings(graph: &RoadGraph, max_path_len: usize) -> Vec<Vec<NodeId>> {
    let nodes = graph.nodes();
    info!("Searching rings from {} start nodes", nodes.len());
    let per_node: Vec<Vec<Vec<NodeId>>> = nodes
        .par_iter()
        .progress_count(nodes.len() as u64)
        .map(|&node| find_rings_at(graph, node, max_path_len))
        .collect();
    per_node.into_iter().flatten().collect()
}

/// Collapse rings that visit the same unordered node set, keeping the
/// first encountered ordering.
pub fn dedup_rings(rings: Vec<Vec<NodeId>>) -> Vec<Vec<NodeId>> {
    let mut seen: HashSet<BTreeSet<NodeId>> = HashSet::new();
    let mut unique = Vec::new();
    for ring in rings {
        let key: BTreeSet<NodeId> = ring.iter().copied().collect();
        if seen.insert(key) {
            unique.push(ring);
        }
    }
    unique
}

/// Indices of blocks whose pixel polygon contains another block's polygon.
///
/// An encompassing block is an artifact of the ring search walking around
/// a neighborhood instead of a single face, so the container is flagged
/// and the contained block kept. Mutually-containing pairs (identical
/// polygons reached via different rotations) flag both.
pub fn filter_encompassing(pixel_polygons: &[Vec<PixelPoint>]) -> HashSet<usize> {
    let n = pixel_polygons.len();
    let flagged: Vec<usize> = (0..n)
        .into_par_iter()
        .progress_count(n as u64)
        .flat_map_iter(|i| {
            let mut flags = Vec::new();
            for j in (i + 1)..n {
                if polygon_contains(&pixel_polygons[i], &pixel_polygons[j]) {
                    flags.push(i);
                }
                if polygon_contains(&pixel_polygons[j], &pixel_polygons[i]) {
                    flags.push(j);
                }
            }
            flags
        })
        .collect();
    flagged.into_iter().collect()
}

fn check_budget(stage: &'static str, actual: usize, budget: Option<usize>) -> Result<(), Error> {
    match budget {
        Some(budget) if actual > budget => Err(Error::BudgetExceeded {
            stage,
            actual,
            budget,
        }),
        _ => Ok(()),
    }
}

/// The full pipeline: merge near-duplicate nodes, build the road graph,
/// collect and deduplicate rings, project to pixel space, and drop
/// encompassing blocks.
///
/// Fails fast (before the superlinear stages) when the configured budgets
/// are exceeded; no partial block set is returned on any error.
pub fn extract_blocks(
    ways: &[Way],
    table: &NodeTable,
    geo_bounds: &GeoBounds,
    pixel_bounds: &PixelBounds,
    config: &PipelineConfig,
) -> Result<Vec<Block>> {
    let projection = Projection::new(*geo_bounds, *pixel_bounds, config.flip_y)
        .context("Invalid geographic bounds")?;

    let road_nodes = merge::collect_road_nodes(ways);
    check_budget("node merge", road_nodes.len(), config.max_nodes)?;
    let merges = merge::merge_nearby_nodes(&road_nodes, table, config.merge_threshold)
        .context("Failed to merge road nodes")?;

    let graph = RoadGraph::build(ways, &merges);
    let all_rings = find_all_rings(&graph, config.max_ring_len);
    let candidates = dedup_rings(all_rings);
    info!("{} unique block candidates", candidates.len());
    check_budget("encompass filter", candidates.len(), config.max_blocks)?;

    let geo_polygons: Vec<Vec<GeoPoint>> = candidates
        .iter()
        .map(|ring| ring.iter().map(|&id| table.point(id)).collect())
        .collect::<Result<_, Error>>()
        .context("Block node missing from the node table")?;
    let pixel_polygons = projection.project_polygons(&geo_polygons);

    let removed = filter_encompassing(&pixel_polygons);
    info!(
        "Encompass filter removed {} of {} candidates",
        removed.len(),
        candidates.len()
    );

    let blocks: Vec<Block> = candidates
        .into_iter()
        .zip(geo_polygons)
        .zip(pixel_polygons)
        .enumerate()
        .filter(|(index, _)| !removed.contains(index))
        .map(|(_, ((nodes, geo), pixel))| Block::new(nodes, geo, pixel))
        .collect();

    info!("Extracted {} blocks", blocks.len());
    Ok(blocks)
}
