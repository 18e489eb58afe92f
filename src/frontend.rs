use rand::Rng;
use tracing::debug;

use crate::command::{CommandError, parse_command};
use crate::gameplay::{GameEngine, MoveOutcome};
use crate::model::{Color, ControlAction};
use crate::view::{describe_outcome, render_board};

/// What the driver should do after a line of input.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Thin adapter between text input and the engine. Holds only presentation state:
/// the selected palette color and the hinted vertex.
pub struct Frontend<R: Rng> {
    engine: GameEngine<R>,
    selected: Option<Color>,
    hint: Option<usize>,
}

impl<R: Rng> Frontend<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        Self { engine, selected: None, hint: None }
    }

    pub fn get_engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn get_selected(&self) -> Option<Color> {
        self.selected
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Reply, CommandError> {
        let action = parse_command(line)?;
        debug!("Input {:?}", action);
        Ok(self.handle_game_action(action))
    }

    pub fn handle_game_action(&mut self, action: ControlAction) -> Reply {
        let message = match action {
            ControlAction::Quit => return Reply::Quit,
            ControlAction::SelectColor(color) => {
                if self.engine.get_palette().contains(color) {
                    self.selected = Some(color);
                    format!("selected {}", color.get_letter_representation())
                } else {
                    format!("{} is not in the palette", color.get_letter_representation())
                }
            }
            ControlAction::ColorVertex(vertex, color) => {
                let Some(color) = color.or(self.selected) else {
                    return Reply::Print("Please select a color first!".to_string());
                };
                self.hint = None;
                let outcome = self.engine.color_vertex(vertex, color);
                self.report(outcome)
            }
            ControlAction::Hint => {
                self.hint = self.engine.find_next_uncolored_vertex();
                match self.hint {
                    Some(v) => format!("try vertex {v}\n{}", self.board()),
                    None => "no uncolored vertex".to_string(),
                }
            }
            ControlAction::Solve => match self.engine.suggest_move() {
                Some((v, c)) => format!(
                    "The current state is solvable, e.g. color {} {}",
                    v,
                    c.get_letter_representation()
                ),
                None if self.engine.is_active() => "The current state is not solvable.".to_string(),
                None => describe_outcome(&MoveOutcome::NotActive),
            },
            ControlAction::Show => self.board(),
            ControlAction::Help => self.engine.help_text().to_string(),
            ControlAction::StartGame | ControlAction::Undo | ControlAction::NextLevel => {
                self.hint = None;
                match self.engine.handle_game_action(action) {
                    Some(outcome) => self.report(outcome),
                    None => String::new(),
                }
            }
        };
        Reply::Print(message)
    }

    fn report(&mut self, outcome: MoveOutcome) -> String {
        if let MoveOutcome::LevelStarted { .. } = outcome {
            self.selected = self.engine.get_palette().first();
        }
        let message = describe_outcome(&outcome);
        match outcome {
            MoveOutcome::LevelStarted { .. }
            | MoveOutcome::Committed
            | MoveOutcome::UndoApplied { .. }
            | MoveOutcome::LevelCompleted(_) => format!("{message}\n{}", self.board()),
            _ => message,
        }
    }

    fn board(&self) -> String {
        render_board(&self.engine, self.selected, self.hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::model::Graph;

    fn frontend() -> Frontend<rand::rngs::StdRng> {
        Frontend::new(GameEngine::with_seed(GameConfig::default(), 9))
    }

    #[test]
    fn start_selects_first_color() {
        let mut ui = frontend();
        assert_eq!(ui.get_selected(), None);
        let reply = ui.handle_line("start").unwrap();
        assert!(matches!(reply, Reply::Print(ref s) if s.starts_with("Level 1: 6 vertices, 3 colors")));
        assert_eq!(ui.get_selected(), Some(Color::new(0)));
        assert!(ui.get_engine().is_active());
    }

    #[test]
    fn color_uses_selection_when_omitted() {
        let mut ui = frontend();
        assert_eq!(
            ui.handle_line("color 0").unwrap(),
            Reply::Print("Please select a color first!".to_string())
        );
        ui.handle_line("start").unwrap();
        ui.engine.load_graph(Graph::from_edges(2, &[(0, 1)]).unwrap());
        ui.handle_line("select B").unwrap();
        ui.handle_line("color 0").unwrap();
        assert_eq!(ui.get_engine().get_coloring().get(0), Some(Color::new(1)));
        assert_eq!(
            ui.handle_line("color 1").unwrap(),
            Reply::Print("invalid move: color not allowed due to adjacency".to_string())
        );
    }

    #[test]
    fn select_outside_palette_is_refused() {
        let mut ui = frontend();
        ui.handle_line("start").unwrap();
        ui.handle_line("select Z").unwrap();
        assert_eq!(ui.get_selected(), Some(Color::new(0)));
    }

    #[test]
    fn quit_and_parse_errors() {
        let mut ui = frontend();
        assert_eq!(ui.handle_line("quit"), Ok(Reply::Quit));
        assert!(ui.handle_line("fly").is_err());
    }
}
