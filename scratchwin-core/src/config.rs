use crate::error::{Result, ScratchError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest accepted card side, in mask pixels
pub const MAX_SURFACE_SIDE: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub surface: SurfaceConfig,
    pub session_ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub brush_radius: f64,
    /// Erased fraction above which the card counts as revealed
    pub reveal_threshold: f64,
    /// Cosmetic pause between the reveal and the full clear
    pub clear_delay: Duration,
    /// Erased fraction above which a manual reset is offered
    pub reset_offer_threshold: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            session_ttl: Duration::from_secs(24 * 60 * 60), // 24 hours
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            brush_radius: 30.0,
            reveal_threshold: 0.70,
            clear_delay: Duration::from_millis(300),
            reset_offer_threshold: 0.10,
        }
    }
}

impl GameConfig {
    /// Read overrides from a JSON file. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            ScratchError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;

        Ok(config)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::MAX)
    }

    pub fn validate(&self) -> Result<()> {
        self.surface.validate()?;

        if self.session_ttl.is_zero() {
            return Err(ScratchError::config("Session TTL must be greater than 0"));
        }

        Ok(())
    }
}

impl SurfaceConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.reveal_threshold > 0.0 && self.reveal_threshold < 1.0) {
            return Err(ScratchError::config("Reveal threshold must be between 0 and 1"));
        }

        if !(self.reset_offer_threshold >= 0.0 && self.reset_offer_threshold < 1.0) {
            return Err(ScratchError::config("Reset offer threshold must be between 0 and 1"));
        }

        if self.width > MAX_SURFACE_SIDE || self.height > MAX_SURFACE_SIDE {
            return Err(ScratchError::config(format!(
                "Surface must be at most {}x{} pixels",
                MAX_SURFACE_SIDE, MAX_SURFACE_SIDE
            )));
        }

        if !(self.brush_radius > 0.0) {
            return Err(ScratchError::config("Brush radius must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.surface.reveal_threshold, 0.70);
        assert_eq!(config.session_ttl(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let mut config = GameConfig::default();
        config.surface.reveal_threshold = 1.5;
        assert!(matches!(config.validate(), Err(ScratchError::Config(_))));

        config.surface.reveal_threshold = 0.7;
        config.surface.brush_radius = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_surface() {
        let mut config = GameConfig::default();
        config.surface.width = MAX_SURFACE_SIDE;
        config.surface.height = MAX_SURFACE_SIDE;
        config.validate().unwrap();

        config.surface.height = MAX_SURFACE_SIDE + 1;
        assert!(matches!(config.validate(), Err(ScratchError::Config(_))));

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"surface":{"width":100000,"height":100000}}"#).unwrap();
        assert!(matches!(
            GameConfig::load(&path),
            Err(ScratchError::Config(_))
        ));
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"surface":{"width":120,"height":80}}"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.surface.width, 120);
        assert_eq!(config.surface.height, 80);
        assert_eq!(config.surface.brush_radius, 30.0);
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        assert_eq!(GameConfig::load(&path).unwrap(), GameConfig::default());

        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            GameConfig::load(&path),
            Err(ScratchError::Config(_))
        ));
    }
}
