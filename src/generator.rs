use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::model::{Graph, Point};

/// Builds the random graph for a level.
///
/// Positions are drawn first, then every pair `i < j` gets one Bernoulli draw with the
/// level's edge probability, so a seeded `rng` always reproduces the same graph.
pub fn generate_graph<R: Rng>(config: &GameConfig, level: u32, rng: &mut R) -> Graph {
    let n = config.vertex_count(level);
    let p = config.edge_probability(level);
    let (ox, oy) = config.canvas_origin;
    let (w, h) = config.canvas_extent;

    let positions: Vec<Point> = (0..n)
        .map(|_| Point {
            x: ox + rng.random_range(0..w.max(1)),
            y: oy + rng.random_range(0..h.max(1)),
        })
        .collect();

    let mut pairs = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            if rng.random_bool(p) {
                pairs.push((i, j));
            }
        }
    }
    debug!("Generated level {} graph: {} vertices, {} edges (p = {:.2})", level, n, pairs.len(), p);

    // Pairs are distinct and in range by construction.
    Graph::new(positions, &pairs).unwrap_or_default()
}
