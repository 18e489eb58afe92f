use crate::model::{Color, Coloring, Graph, Palette};

/// Whether `vertex` may take `color`: it must be uncolored and no neighbor may
/// already hold exactly `color`.
pub fn can_assign(graph: &Graph, coloring: &Coloring, vertex: usize, color: Color) -> bool {
    if !graph.contains_vertex(vertex) || coloring.is_colored(vertex) {
        return false;
    }
    !graph
        .neighbors(vertex)
        .iter()
        .any(|&n| coloring.get(n) == Some(color))
}

/// Colors still legal for an uncolored vertex.
pub fn legal_colors<'a>(
    graph: &'a Graph,
    coloring: &'a Coloring,
    palette: &'a Palette,
    vertex: usize,
) -> impl Iterator<Item = Color> + 'a {
    palette
        .get_colors()
        .filter(move |&c| can_assign(graph, coloring, vertex, c))
}

/// Global stuck check: scans every uncolored vertex against every palette color.
pub fn has_any_valid_move(graph: &Graph, coloring: &Coloring, palette: &Palette) -> bool {
    (0..graph.vertex_count())
        .filter(|&v| !coloring.is_colored(v))
        .any(|v| legal_colors(graph, coloring, palette, v).next().is_some())
}

/// True when every edge with two colored endpoints joins different colors.
pub fn is_proper(graph: &Graph, coloring: &Coloring) -> bool {
    graph.get_edges().iter().all(|e| {
        let (u, v) = e.get_endpoints();
        match (coloring.get(u), coloring.get(v)) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    })
}
