use rayon::prelude::*;
use tracing::debug;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::model::{Color, Coloring, Graph, Palette};
use crate::rules::{is_proper, legal_colors};

/// Searches for a complete proper coloring that extends the current one.
///
/// Works on borrowed snapshots and never touches game state. The top-level branches
/// run in parallel; deeper levels are plain backtracking on the most constrained
/// uncolored vertex.
pub struct Solver<'a> {
    graph: &'a Graph,
    palette: &'a Palette,
}

impl<'a> Solver<'a> {
    pub fn new(graph: &'a Graph, palette: &'a Palette) -> Self {
        Self { graph, palette }
    }

    pub fn solve(&self, coloring: &Coloring) -> Option<Coloring> {
        if coloring.vertex_count() != self.graph.vertex_count() || !is_proper(self.graph, coloring) {
            return None;
        }
        let Some((vertex, candidates)) = self.most_constrained(coloring) else {
            return Some(coloring.clone());
        };
        debug!("Solver branching on vertex {} over {} colors", vertex, candidates.len());

        let found = Arc::new(AtomicBool::new(false));
        candidates.par_iter().find_map_any(|&color| {
            let mut next = coloring.clone();
            next.set(vertex, Some(color));
            let result = self.backtrack(next, &found);
            if result.is_some() {
                found.store(true, Ordering::Relaxed);
            }
            result
        })
    }

    pub fn is_solvable(&self, coloring: &Coloring) -> bool {
        self.solve(coloring).is_some()
    }

    /// First move of some completion, if the position is still completable.
    pub fn suggest_move(&self, coloring: &Coloring) -> Option<(usize, Color)> {
        let (vertex, _) = self.most_constrained(coloring)?;
        let solution = self.solve(coloring)?;
        solution.get(vertex).map(|color| (vertex, color))
    }

    fn backtrack(&self, mut coloring: Coloring, found: &Arc<AtomicBool>) -> Option<Coloring> {
        // Another branch already has an answer.
        if found.load(Ordering::Relaxed) {
            return None;
        }
        let Some((vertex, candidates)) = self.most_constrained(&coloring) else {
            return Some(coloring);
        };
        for color in candidates {
            coloring.set(vertex, Some(color));
            if let Some(done) = self.backtrack(coloring.clone(), found) {
                return Some(done);
            }
        }
        None
    }

    /// Uncolored vertex with the fewest legal colors, ties to the lowest index.
    fn most_constrained(&self, coloring: &Coloring) -> Option<(usize, Vec<Color>)> {
        coloring
            .uncolored()
            .map(|v| (v, legal_colors(self.graph, coloring, self.palette, v).collect::<Vec<_>>()))
            .min_by_key(|(v, colors)| (colors.len(), *v))
    }
}
