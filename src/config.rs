use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("max_vertices must be at least 1")]
    NoVertices,
    #[error("min_palette_size must be at least 1")]
    EmptyPalette,
    #[error("canvas extent must be positive on both axes, got {0}x{1}")]
    EmptyCanvas(i32, i32),
}

/// Rule constants for a game. Every level-dependent quantity is derived from these.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub base_vertices: usize,
    pub max_vertices: usize,
    pub base_edge_probability: f64,
    pub edge_probability_step: f64,
    pub max_edge_probability: f64,
    pub min_palette_size: usize,
    pub points_per_move: i64,
    pub bonus_per_spare_color: i64,
    pub canvas_origin: (i32, i32),
    pub canvas_extent: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_vertices: 5,
            max_vertices: 15,
            base_edge_probability: 0.2,
            edge_probability_step: 0.1,
            max_edge_probability: 0.5,
            min_palette_size: 3,
            points_per_move: 10,
            bonus_per_spare_color: 100,
            canvas_origin: (100, 100),
            canvas_extent: (600, 400),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("base_edge_probability", self.base_edge_probability),
            ("edge_probability_step", self.edge_probability_step),
            ("max_edge_probability", self.max_edge_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.max_vertices == 0 {
            return Err(ConfigError::NoVertices);
        }
        if self.min_palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        let (w, h) = self.canvas_extent;
        if w <= 0 || h <= 0 {
            return Err(ConfigError::EmptyCanvas(w, h));
        }
        Ok(())
    }

    pub fn vertex_count(&self, level: u32) -> usize {
        self.base_vertices
            .saturating_add(level as usize)
            .min(self.max_vertices)
    }

    pub fn edge_probability(&self, level: u32) -> f64 {
        let p = self.base_edge_probability + self.edge_probability_step * f64::from(level);
        p.min(self.max_edge_probability).clamp(0.0, 1.0)
    }

    pub fn palette_size(&self, level: u32) -> usize {
        self.min_palette_size.max((level as usize).saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_follow_level_formulas() {
        let config = GameConfig::default();
        assert_eq!(config.vertex_count(1), 6);
        assert_eq!(config.vertex_count(10), 15);
        assert_eq!(config.vertex_count(40), 15);
        assert!((config.edge_probability(1) - 0.3).abs() < 1e-9);
        assert!((config.edge_probability(3) - 0.5).abs() < 1e-9);
        assert!((config.edge_probability(9) - 0.5).abs() < 1e-9);
        assert_eq!(config.palette_size(1), 3);
        assert_eq!(config.palette_size(2), 3);
        assert_eq!(config.palette_size(5), 6);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert_eq!(GameConfig::default().validate(), Ok(()));

        let config = GameConfig { max_edge_probability: 1.5, ..GameConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { name: "max_edge_probability", .. })
        ));

        let config = GameConfig { max_vertices: 0, ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::NoVertices));

        let config = GameConfig { min_palette_size: 0, ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPalette));

        let config = GameConfig { canvas_extent: (0, 10), ..GameConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyCanvas(0, 10)));
    }
}
