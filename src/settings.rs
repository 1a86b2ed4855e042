//! Presentation preferences
//!
//! Quality/display options consumed by the embedding shell. The simulation
//! core never reads these; they cap what the renderer draws, not what the
//! session computes. Session state itself is ephemeral and never persisted.

use serde::{Deserialize, Serialize};

use crate::consts::POOL_CAPACITY;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// How many pooled particles the renderer should draw
    pub fn max_rendered_particles(&self) -> usize {
        match self {
            QualityPreset::Low => POOL_CAPACITY / 4,
            QualityPreset::Medium => POOL_CAPACITY / 2,
            QualityPreset::High => POOL_CAPACITY,
        }
    }

    /// Whether impact splats get cosmetic ring decals
    pub fn splat_decals_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub quality: QualityPreset,
    /// Draw spray particles at all
    pub particles: bool,
    /// Draw cosmetic impact splats
    pub impact_splats: bool,
    /// Show the coverage percentage meter
    pub show_coverage_meter: bool,
    /// Show the elapsed-time HUD readout
    pub show_timer: bool,
    /// Minimize motion effects
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            impact_splats: true,
            show_coverage_meter: true,
            show_timer: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent toggles)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        if preset == QualityPreset::Low {
            self.impact_splats = false;
        }
    }

    /// Effective particle render budget
    pub fn max_rendered_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_rendered_particles()
        }
    }

    /// Effective splat toggle (respects reduced_motion)
    pub fn effective_impact_splats(&self) -> bool {
        self.impact_splats && self.quality.splat_decals_enabled() && !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_round_trip() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_low_preset_disables_splats() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.effective_impact_splats());
        assert!(settings.max_rendered_particles() < POOL_CAPACITY);
    }

    #[test]
    fn test_particles_off_zeroes_budget() {
        let mut settings = Settings::from_preset(QualityPreset::High);
        settings.particles = false;
        assert_eq!(settings.max_rendered_particles(), 0);
    }
}
