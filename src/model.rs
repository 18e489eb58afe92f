use std::collections::BTreeSet;

use thiserror::Error;

/// A palette entry. Colors compare by palette index only; the display value is
/// looked up through [`Palette::get_rgb`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Color {
    color_id: usize,
}
impl Color {
    pub fn new(color_id: usize) -> Self {
        Color { color_id }
    }

    /// Parses a letter label like "A", "Z", "AA". Case-insensitive.
    pub fn new_from_repr(repr: &str) -> Option<Self> {
        let s = repr.trim();
        if s.is_empty() {
            return None;
        }
        Self::letters_to_color_id(s).map(Color::new)
    }

    /// Convert a single letter (A-Z) into a 0-based id.
    pub fn letter_to_color_id(ch: char) -> Option<usize> {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let up = ch.to_ascii_uppercase();
        Some((up as u8 - b'A') as usize)
    }

    /// Excel-style base-26 numbering: A=0, B=1, ..., Z=25, AA=26, AB=27, ...
    fn letters_to_color_id(s: &str) -> Option<usize> {
        let mut acc: usize = 0;
        for ch in s.chars() {
            let digit = Self::letter_to_color_id(ch)?;
            acc = acc.checked_mul(26)?.checked_add(digit + 1)?;
        }
        acc.checked_sub(1)
    }

    pub fn get_color_id(&self) -> usize {
        self.color_id
    }

    pub fn get_letter_representation(&self) -> String {
        let mut chars = Vec::new();
        let mut id = self.color_id + 1;
        while id > 0 {
            let rem = (id - 1) % 26;
            chars.push((b'A' + rem as u8) as char);
            id = (id - 1) / 26;
        }
        chars.iter().rev().collect()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Rgb {
    /// Hue wraps around; saturation and brightness are clamped to [0, 1].
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let v = brightness.clamp(0.0, 1.0);
        let to_byte = |x: f32| (x * 255.0 + 0.5) as u8;
        if s == 0.0 {
            let c = to_byte(v);
            return Rgb { r: c, g: c, b: c };
        }
        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match h.floor() as u32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Rgb { r: to_byte(r), g: to_byte(g), b: to_byte(b) }
    }
}

/// The ordered colors available during one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    size: usize,
}
impl Palette {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, color: Color) -> bool {
        color.get_color_id() < self.size
    }

    pub fn get_colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.size).map(Color::new)
    }

    pub fn first(&self) -> Option<Color> {
        self.get_colors().next()
    }

    pub fn get_rgb(&self, color: Color) -> Option<Rgb> {
        if !self.contains(color) {
            return None;
        }
        let hue = color.get_color_id() as f32 / self.size as f32;
        Some(Rgb::from_hsb(hue, 0.8, 0.9))
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Undirected edge, stored with `u < v`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Edge {
    u: usize,
    v: usize,
}
impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Edge { u: a.min(b), v: a.max(b) }
    }

    pub fn get_endpoints(&self) -> (usize, usize) {
        (self.u, self.v)
    }

    pub fn other(&self, vertex: usize) -> Option<usize> {
        if vertex == self.u {
            Some(self.v)
        } else if vertex == self.v {
            Some(self.u)
        } else {
            None
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge ({0}, {1}) is a self-loop")]
    SelfLoop(usize, usize),
    #[error("edge ({0}, {1}) references a vertex outside 0..{2}")]
    VertexOutOfRange(usize, usize, usize),
    #[error("edge ({0}, {1}) appears more than once")]
    DuplicateEdge(usize, usize),
}

/// Vertices and edges of one level. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Graph {
    positions: Vec<Point>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}
impl Graph {
    pub fn new(positions: Vec<Point>, pairs: &[(usize, usize)]) -> Result<Self, GraphError> {
        let n = positions.len();
        let mut seen = BTreeSet::new();
        let mut edges = Vec::with_capacity(pairs.len());
        let mut adjacency = vec![Vec::new(); n];
        for &(a, b) in pairs {
            if a >= n || b >= n {
                return Err(GraphError::VertexOutOfRange(a, b, n));
            }
            if a == b {
                return Err(GraphError::SelfLoop(a, b));
            }
            let edge = Edge::new(a, b);
            if !seen.insert(edge) {
                return Err(GraphError::DuplicateEdge(a, b));
            }
            edges.push(edge);
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        Ok(Self { positions, edges, adjacency })
    }

    /// Builds a graph with all vertices at the origin.
    pub fn from_edges(vertex_count: usize, pairs: &[(usize, usize)]) -> Result<Self, GraphError> {
        Self::new(vec![Point::default(); vertex_count], pairs)
    }

    pub fn complete(vertex_count: usize) -> Self {
        let pairs: Vec<(usize, usize)> = (0..vertex_count)
            .flat_map(|i| (i + 1..vertex_count).map(move |j| (i, j)))
            .collect();
        Self::from_edges(vertex_count, &pairs).unwrap_or_default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn get_positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn get_edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }
}

/// Partial assignment of colors to vertices.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Coloring {
    colors: Vec<Option<Color>>,
}
impl Coloring {
    pub fn new(vertex_count: usize) -> Self {
        Self { colors: vec![None; vertex_count] }
    }

    pub fn get(&self, vertex: usize) -> Option<Color> {
        self.colors.get(vertex).copied().flatten()
    }

    pub fn is_colored(&self, vertex: usize) -> bool {
        self.get(vertex).is_some()
    }

    /// Returns the previous color of the vertex.
    pub fn set(&mut self, vertex: usize, color: Option<Color>) -> Option<Color> {
        match self.colors.get_mut(vertex) {
            Some(slot) => std::mem::replace(slot, color),
            None => None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.colors.len()
    }

    pub fn colored_count(&self) -> usize {
        self.colors.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.colors.iter().all(Option::is_some)
    }

    pub fn distinct_colors(&self) -> BTreeSet<Color> {
        self.colors.iter().flatten().copied().collect()
    }

    pub fn uncolored(&self) -> impl Iterator<Item = usize> + '_ {
        self.colors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.colors
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i, c)))
    }
}

/// One committed move. `old_color` of `None` means the vertex was uncolored.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ColoringAction {
    pub vertex: usize,
    pub old_color: Option<Color>,
    pub new_color: Color,
}

/// Intents a front-end can issue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    StartGame,
    SelectColor(Color),
    ColorVertex(usize, Option<Color>),
    Undo,
    NextLevel,
    Hint,
    Solve,
    Show,
    Help,
    Quit,
}
