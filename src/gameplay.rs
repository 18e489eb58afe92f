use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::generator::generate_graph;
use crate::history::MoveHistory;
use crate::model::*;
use crate::rules::{can_assign, has_any_valid_move};
use crate::scoring::{completion_bonus, move_delta};
use crate::solver::Solver;

pub const HELP_TEXT: &str = "Color each vertex with a color such that no two adjacent vertices share the same color.\n\
Select a color from the palette and pick a vertex to color it.\n\
Finishing a level with fewer colors than the palette offers earns a bonus.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Active,
    LevelComplete,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: u32,
    pub score_before_bonus: i64,
    pub bonus: i64,
    pub total_score: i64,
    pub used_colors: usize,
}

/// Result of every engine command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    LevelStarted { level: u32, vertices: usize, palette_size: usize },
    Committed,
    AlreadyColored,
    ColorConflict,
    LevelCompleted(LevelSummary),
    GameOver { final_score: i64 },
    NotActive,
    UndoApplied { remaining: usize },
    UndoEmpty,
}

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("vertex already colored")]
    AlreadyColored,
    #[error("color not allowed due to adjacency")]
    ColorConflict,
}

/// Why a command was refused. Never fatal; the state is left untouched.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum Fault {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("no level in progress")]
    NotActive,
    #[error("nothing to undo")]
    EmptyHistory,
}

impl MoveOutcome {
    pub fn fault(&self) -> Option<Fault> {
        match self {
            MoveOutcome::AlreadyColored => Some(InvalidMove::AlreadyColored.into()),
            MoveOutcome::ColorConflict => Some(InvalidMove::ColorConflict.into()),
            MoveOutcome::NotActive => Some(Fault::NotActive),
            MoveOutcome::UndoEmpty => Some(Fault::EmptyHistory),
            _ => None,
        }
    }
}

/// Owns one game session and is the only thing that mutates it.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    state: GameState,
    level: u32,
    score: i64,
    palette: Palette,
    graph: Graph,
    coloring: Coloring,
    history: MoveHistory,
    last_bonus: i64,
}

impl GameEngine<StdRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let palette = Palette::new(config.palette_size(1));
        Self {
            config,
            rng,
            state: GameState::Idle,
            level: 1,
            score: 0,
            palette,
            graph: Graph::default(),
            coloring: Coloring::default(),
            history: MoveHistory::new(),
            last_bonus: 0,
        }
    }

    pub fn start_game(&mut self) -> MoveOutcome {
        self.level = 1;
        self.score = 0;
        info!("Starting new game");
        self.begin_level()
    }

    pub fn advance_level(&mut self) -> MoveOutcome {
        if self.state != GameState::LevelComplete {
            return MoveOutcome::NotActive;
        }
        self.level += 1;
        self.begin_level()
    }

    /// Restarts the current level on a caller-supplied graph.
    pub fn load_graph(&mut self, graph: Graph) -> MoveOutcome {
        self.install_level(graph)
    }

    fn begin_level(&mut self) -> MoveOutcome {
        let graph = generate_graph(&self.config, self.level, &mut self.rng);
        self.install_level(graph)
    }

    fn install_level(&mut self, graph: Graph) -> MoveOutcome {
        self.palette = Palette::new(self.config.palette_size(self.level));
        self.coloring = Coloring::new(graph.vertex_count());
        self.graph = graph;
        self.history.clear();
        self.last_bonus = 0;
        self.state = GameState::Active;
        info!(
            "Level {} started: {} vertices, {} edges, {} colors",
            self.level,
            self.graph.vertex_count(),
            self.graph.get_edges().len(),
            self.palette.len()
        );
        MoveOutcome::LevelStarted {
            level: self.level,
            vertices: self.graph.vertex_count(),
            palette_size: self.palette.len(),
        }
    }

    pub fn color_vertex(&mut self, vertex: usize, color: Color) -> MoveOutcome {
        if self.state != GameState::Active
            || !self.graph.contains_vertex(vertex)
            || !self.palette.contains(color)
        {
            return MoveOutcome::NotActive;
        }
        if self.coloring.is_colored(vertex) {
            return MoveOutcome::AlreadyColored;
        }
        if !can_assign(&self.graph, &self.coloring, vertex, color) {
            if !has_any_valid_move(&self.graph, &self.coloring, &self.palette) {
                return self.game_over();
            }
            debug!("Rejected color {:?} on vertex {}: adjacency conflict", color, vertex);
            return MoveOutcome::ColorConflict;
        }

        let old_color = self.coloring.set(vertex, Some(color));
        self.score += move_delta(&self.config, self.level);
        self.history.push(ColoringAction { vertex, old_color, new_color: color });
        debug!("Colored vertex {} with {:?}, score {}", vertex, color, self.score);

        if self.coloring.is_complete() {
            return self.complete_level();
        }
        MoveOutcome::Committed
    }

    fn complete_level(&mut self) -> MoveOutcome {
        let score_before_bonus = self.score;
        let bonus = completion_bonus(&self.config, self.level, self.palette.len(), &self.coloring);
        self.score += bonus;
        self.last_bonus = bonus;
        self.state = GameState::LevelComplete;
        let summary = LevelSummary {
            level: self.level,
            score_before_bonus,
            bonus,
            total_score: self.score,
            used_colors: self.coloring.distinct_colors().len(),
        };
        info!("Level {} completed: bonus {}, total {}", self.level, bonus, self.score);
        MoveOutcome::LevelCompleted(summary)
    }

    /// Clears everything except the score and level for display.
    fn game_over(&mut self) -> MoveOutcome {
        warn!("No valid moves remaining, game over with score {}", self.score);
        self.state = GameState::GameOver;
        self.graph = Graph::default();
        self.coloring = Coloring::default();
        self.history.clear();
        self.last_bonus = 0;
        MoveOutcome::GameOver { final_score: self.score }
    }

    pub fn undo(&mut self) -> MoveOutcome {
        if !matches!(self.state, GameState::Active | GameState::LevelComplete) {
            return MoveOutcome::NotActive;
        }
        let Some(action) = self.history.pop() else {
            return MoveOutcome::UndoEmpty;
        };
        self.coloring.set(action.vertex, action.old_color);
        self.score -= move_delta(&self.config, self.level);
        if self.state == GameState::LevelComplete {
            self.score -= self.last_bonus;
            self.last_bonus = 0;
            self.state = GameState::Active;
        }
        debug!("Undid vertex {}, score {}, {} moves left", action.vertex, self.score, self.history.len());
        MoveOutcome::UndoApplied { remaining: self.history.len() }
    }

    pub fn handle_game_action(&mut self, action: ControlAction) -> Option<MoveOutcome> {
        match action {
            ControlAction::StartGame => Some(self.start_game()),
            ControlAction::ColorVertex(vertex, Some(color)) => Some(self.color_vertex(vertex, color)),
            ControlAction::Undo => Some(self.undo()),
            ControlAction::NextLevel => Some(self.advance_level()),
            _ => None,
        }
    }

    pub fn get_state(&self) -> GameState {
        self.state
    }

    pub fn get_config(&self) -> &GameConfig {
        &self.config
    }

    pub fn get_vertices(&self) -> &[Point] {
        self.graph.get_positions()
    }

    pub fn get_edges(&self) -> &[Edge] {
        self.graph.get_edges()
    }

    pub fn get_graph(&self) -> &Graph {
        &self.graph
    }

    pub fn get_coloring(&self) -> &Coloring {
        &self.coloring
    }

    pub fn get_palette(&self) -> &Palette {
        &self.palette
    }

    pub fn get_score(&self) -> i64 {
        self.score
    }

    pub fn get_level(&self) -> u32 {
        self.level
    }

    pub fn get_min_colors(&self) -> usize {
        self.palette.len()
    }

    pub fn get_history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_active(&self) -> bool {
        self.state == GameState::Active
    }

    pub fn is_complete(&self) -> bool {
        self.graph.vertex_count() > 0 && self.coloring.is_complete()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.state, GameState::Active | GameState::LevelComplete) && !self.history.peek_empty()
    }

    pub fn has_valid_moves(&self) -> bool {
        has_any_valid_move(&self.graph, &self.coloring, &self.palette)
    }

    pub fn find_next_uncolored_vertex(&self) -> Option<usize> {
        self.coloring.uncolored().next()
    }

    pub fn is_solvable(&self) -> bool {
        Solver::new(&self.graph, &self.palette).is_solvable(&self.coloring)
    }

    pub fn suggest_move(&self) -> Option<(usize, Color)> {
        if self.state != GameState::Active {
            return None;
        }
        Solver::new(&self.graph, &self.palette).suggest_move(&self.coloring)
    }

    pub fn help_text(&self) -> &'static str {
        HELP_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_on(edges: &[(usize, usize)], vertices: usize) -> GameEngine {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 11);
        engine.start_game();
        engine.load_graph(Graph::from_edges(vertices, edges).unwrap());
        engine
    }

    #[test]
    fn commands_before_start_are_not_active() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        assert_eq!(engine.get_state(), GameState::Idle);
        assert_eq!(engine.color_vertex(0, Color::new(0)), MoveOutcome::NotActive);
        assert_eq!(engine.undo(), MoveOutcome::NotActive);
        assert_eq!(engine.advance_level(), MoveOutcome::NotActive);
        assert!(!engine.can_undo());
        assert!(!engine.is_complete());
    }

    #[test]
    fn start_game_generates_level_one() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 5);
        let outcome = engine.start_game();
        assert_eq!(
            outcome,
            MoveOutcome::LevelStarted { level: 1, vertices: 6, palette_size: 3 }
        );
        assert!(engine.is_active());
        assert_eq!(engine.get_vertices().len(), 6);
        assert_eq!(engine.get_min_colors(), 3);
        assert_eq!(engine.get_score(), 0);
        assert_eq!(engine.find_next_uncolored_vertex(), Some(0));
    }

    #[test]
    fn commit_scores_and_records_history() {
        let mut engine = engine_on(&[(0, 1), (1, 2)], 3);
        assert_eq!(engine.color_vertex(0, Color::new(0)), MoveOutcome::Committed);
        assert_eq!(engine.get_score(), 10);
        assert!(engine.can_undo());
        assert_eq!(engine.get_history_len(), 1);
        assert_eq!(engine.find_next_uncolored_vertex(), Some(1));
        assert_eq!(engine.color_vertex(0, Color::new(1)), MoveOutcome::AlreadyColored);
        assert_eq!(engine.color_vertex(1, Color::new(0)), MoveOutcome::ColorConflict);
        assert_eq!(engine.get_score(), 10);
        assert_eq!(engine.get_history_len(), 1);
    }

    #[test]
    fn out_of_range_inputs_are_ignored() {
        let mut engine = engine_on(&[(0, 1)], 2);
        assert_eq!(engine.color_vertex(2, Color::new(0)), MoveOutcome::NotActive);
        assert_eq!(engine.color_vertex(0, Color::new(3)), MoveOutcome::NotActive);
        assert_eq!(engine.get_coloring().colored_count(), 0);
        assert_eq!(engine.get_score(), 0);
    }

    #[test]
    fn completing_level_applies_bonus_and_advance_resets() {
        let mut engine = engine_on(&[(0, 1)], 2);
        engine.color_vertex(0, Color::new(0));
        let outcome = engine.color_vertex(1, Color::new(2));
        assert_eq!(
            outcome,
            MoveOutcome::LevelCompleted(LevelSummary {
                level: 1,
                score_before_bonus: 20,
                bonus: 100,
                total_score: 120,
                used_colors: 2,
            })
        );
        assert_eq!(engine.get_state(), GameState::LevelComplete);
        assert_eq!(engine.color_vertex(0, Color::new(0)), MoveOutcome::NotActive);

        let outcome = engine.advance_level();
        assert_eq!(
            outcome,
            MoveOutcome::LevelStarted { level: 2, vertices: 7, palette_size: 3 }
        );
        assert_eq!(engine.get_score(), 120);
        assert!(!engine.can_undo());
        assert_eq!(engine.get_coloring().colored_count(), 0);
    }

    #[test]
    fn undo_after_completion_reverts_bonus() {
        let mut engine = engine_on(&[(0, 1)], 2);
        engine.color_vertex(0, Color::new(0));
        engine.color_vertex(1, Color::new(1));
        assert_eq!(engine.get_score(), 120);
        assert_eq!(engine.undo(), MoveOutcome::UndoApplied { remaining: 1 });
        assert_eq!(engine.get_score(), 10);
        assert_eq!(engine.get_state(), GameState::Active);
        assert!(!engine.get_coloring().is_colored(1));
        assert_eq!(engine.undo(), MoveOutcome::UndoApplied { remaining: 0 });
        assert_eq!(engine.get_score(), 0);
        assert_eq!(engine.undo(), MoveOutcome::UndoEmpty);
    }

    #[test]
    fn stuck_board_ends_game() {
        // Triangle with a two-color palette is forced by a custom config.
        let config = GameConfig { min_palette_size: 2, ..GameConfig::default() };
        let mut engine = GameEngine::with_seed(config, 2);
        engine.start_game();
        engine.load_graph(Graph::complete(3));
        engine.color_vertex(0, Color::new(0));
        engine.color_vertex(1, Color::new(1));
        assert!(!engine.has_valid_moves());
        assert!(!engine.is_solvable());
        assert_eq!(engine.color_vertex(2, Color::new(0)), MoveOutcome::GameOver { final_score: 20 });
        assert_eq!(engine.get_state(), GameState::GameOver);
        assert!(engine.get_vertices().is_empty());
        assert!(engine.get_edges().is_empty());
        assert_eq!(engine.get_score(), 20);
        assert_eq!(engine.undo(), MoveOutcome::NotActive);
        assert!(matches!(engine.start_game(), MoveOutcome::LevelStarted { level: 1, .. }));
        assert_eq!(engine.get_score(), 0);
    }

    #[test]
    fn faults_map_to_taxonomy() {
        assert_eq!(
            MoveOutcome::AlreadyColored.fault(),
            Some(Fault::InvalidMove(InvalidMove::AlreadyColored))
        );
        assert_eq!(MoveOutcome::UndoEmpty.fault(), Some(Fault::EmptyHistory));
        assert_eq!(MoveOutcome::Committed.fault(), None);
        assert_eq!(
            Fault::from(InvalidMove::ColorConflict).to_string(),
            "invalid move: color not allowed due to adjacency"
        );
    }

    #[test]
    fn suggestions_only_while_active() {
        let mut engine = engine_on(&[(0, 1), (1, 2)], 3);
        let (vertex, color) = engine.suggest_move().unwrap();
        assert_eq!(engine.color_vertex(vertex, color), MoveOutcome::Committed);
        let mut idle = GameEngine::with_seed(GameConfig::default(), 1);
        assert_eq!(idle.suggest_move(), None);
        assert_eq!(idle.handle_game_action(ControlAction::Help), None);
        assert_eq!(idle.handle_game_action(ControlAction::Undo), Some(MoveOutcome::NotActive));
    }
}
