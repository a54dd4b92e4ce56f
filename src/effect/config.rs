use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::animation::ease::Ease;
use crate::foundation::error::{RevealError, RevealResult};
use crate::render::reveal::{DEFAULT_SPREAD, RevealParams, ShapeKind};
use crate::tiles::extract::DEFAULT_TILE_SIZE;

/// Per-instance effect configuration.
///
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    /// Overlay shape.
    pub kind: ShapeKind,
    /// Tile ("seed") size in pixels.
    pub seed: u32,
    /// Overlap between consecutive tile windows, `[0, 1]`.
    pub spread: f64,
    /// Hover timeline duration in milliseconds.
    pub duration_ms: u64,
    /// Hover timeline easing.
    pub ease: Ease,
    /// Fixed seed for the reveal-order shuffle. `None` draws from entropy.
    pub shuffle_seed: Option<u64>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Rect,
            seed: DEFAULT_TILE_SIZE,
            spread: DEFAULT_SPREAD,
            duration_ms: 1000,
            ease: Ease::default(),
            shuffle_seed: None,
        }
    }
}

impl EffectConfig {
    pub fn validate(&self) -> RevealResult<()> {
        if self.seed == 0 {
            return Err(RevealError::validation("seed (tile size) must be > 0"));
        }
        if !self.spread.is_finite() || !(0.0..=1.0).contains(&self.spread) {
            return Err(RevealError::validation(format!(
                "spread must be within [0, 1], got {}",
                self.spread
            )));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn reveal_params(&self) -> RevealParams {
        RevealParams {
            kind: self.kind,
            tile_size: self.seed,
            spread: self.spread,
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> RevealResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| RevealError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> RevealResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read effect config '{}'", path.display()))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/config.rs"]
mod tests;
