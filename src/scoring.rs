use crate::config::GameConfig;
use crate::model::Coloring;

/// Points added on commit and removed on undo.
pub fn move_delta(config: &GameConfig, level: u32) -> i64 {
    i64::from(level) * config.points_per_move
}

/// Completion bonus: every palette color left unused is worth
/// `bonus_per_spare_color`, scaled by the level. Never negative.
pub fn completion_bonus(config: &GameConfig, level: u32, palette_size: usize, coloring: &Coloring) -> i64 {
    let used = coloring.distinct_colors().len() as i64;
    let spare = palette_size as i64 - used;
    (spare * config.bonus_per_spare_color).max(0) * i64::from(level)
}
