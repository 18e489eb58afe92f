use std::fmt::Write;

use rand::Rng;

use crate::gameplay::{GameEngine, GameState, MoveOutcome};
use crate::model::Color;

const UNCOLORED: &str = ".";

/// Message shown to the player for a command result.
pub fn describe_outcome(outcome: &MoveOutcome) -> String {
    if let Some(fault) = outcome.fault() {
        return fault.to_string();
    }
    match outcome {
        MoveOutcome::LevelStarted { level, vertices, palette_size } => {
            format!("Level {level}: {vertices} vertices, {palette_size} colors")
        }
        MoveOutcome::Committed => "ok".to_string(),
        MoveOutcome::LevelCompleted(summary) => format!(
            "Level {} completed!\nScore: {}\nBonus: +{}\nTotal Score: {}",
            summary.level, summary.score_before_bonus, summary.bonus, summary.total_score
        ),
        MoveOutcome::GameOver { final_score } => {
            format!("Game Over!\nNo valid moves remaining.\nFinal Score: {final_score}")
        }
        MoveOutcome::UndoApplied { remaining: 0 } => "undone (history exhausted)".to_string(),
        MoveOutcome::UndoApplied { remaining } => format!("undone ({remaining} left)"),
        // Faults are handled above.
        _ => String::new(),
    }
}

/// Text board: status line, palette, then one line per vertex with its neighbors.
pub fn render_board<R: Rng>(engine: &GameEngine<R>, selected: Option<Color>, hint: Option<usize>) -> String {
    let mut out = String::new();
    let state = match engine.get_state() {
        GameState::Idle => "idle",
        GameState::Active => "active",
        GameState::LevelComplete => "level complete",
        GameState::GameOver => "game over",
    };
    let _ = writeln!(
        out,
        "Level: {}  Score: {}  Min Colors: {}  [{}]",
        engine.get_level(),
        engine.get_score(),
        engine.get_min_colors(),
        state
    );

    let palette = engine.get_palette();
    let swatches: Vec<String> = palette
        .get_colors()
        .map(|c| {
            let label = c.get_letter_representation();
            let rgb = palette
                .get_rgb(c)
                .map(|rgb| format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b))
                .unwrap_or_default();
            if Some(c) == selected {
                format!("[{label} {rgb}]")
            } else {
                format!(" {label} {rgb} ")
            }
        })
        .collect();
    let _ = writeln!(out, "Colors: {}", swatches.join(""));

    let graph = engine.get_graph();
    let coloring = engine.get_coloring();
    for v in 0..graph.vertex_count() {
        let label = coloring
            .get(v)
            .map_or_else(|| UNCOLORED.to_string(), |c| c.get_letter_representation());
        let neighbors: Vec<String> = graph.neighbors(v).iter().map(|n| n.to_string()).collect();
        let marker = if hint == Some(v) { "*" } else { " " };
        let _ = writeln!(out, "{marker}{v:>3} {label:<3} -- {}", neighbors.join(" "));
    }
    out
}
