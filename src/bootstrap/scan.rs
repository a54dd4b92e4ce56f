//! Page bootstrap: find containers that ask for the effect and instantiate it on each.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::assets::decode::load_image;
use crate::effect::config::EffectConfig;
use crate::effect::controller::EffectController;
use crate::foundation::error::{RevealError, RevealResult};
use crate::render::cpu::CpuTarget;
use crate::render::reveal::ShapeKind;

/// Class marking a container as an effect host.
pub const CONTAINER_CLASS: &str = "image-container";
pub const ATTR_SRC: &str = "data-src";
pub const ATTR_KIND: &str = "data-kind";
pub const ATTR_SEED: &str = "data-seed";

/// Markup snapshot: the containers of one page.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub containers: Vec<Container>,
}

/// One markup element with its class list, attributes and layout size.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Container {
    #[serde(default)]
    pub id: Option<String>,
    /// Whitespace-separated class list.
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    pub width: u32,
    pub height: u32,
}

impl Manifest {
    pub fn from_json(json: &str) -> RevealResult<Self> {
        serde_json::from_str(json).map_err(|e| RevealError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> RevealResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read manifest '{}'", path.display()))?;
        Self::from_json(&json)
    }
}

/// What to instantiate for one container.
#[derive(Clone, Debug, PartialEq)]
pub struct MountRequest {
    /// Container id, or `container-<index>` when it has none.
    pub id: String,
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub config: EffectConfig,
}

/// An instantiated effect.
pub struct Mounted {
    pub id: String,
    pub effect: EffectController<CpuTarget>,
}

/// Collect mount requests for every effect container that carries a source.
///
/// `base` supplies everything the attributes do not override.
pub fn scan_containers(manifest: &Manifest, base: &EffectConfig) -> Vec<MountRequest> {
    let mut out = Vec::new();
    for (i, c) in manifest.containers.iter().enumerate() {
        if !c.class.split_whitespace().any(|cls| cls == CONTAINER_CLASS) {
            continue;
        }
        let id = c.id.clone().unwrap_or_else(|| format!("container-{i}"));
        let Some(src) = c.attrs.get(ATTR_SRC).filter(|s| !s.trim().is_empty()) else {
            tracing::debug!(%id, "container without data-src, skipped");
            continue;
        };

        let mut config = base.clone();
        if let Some(kind) = c.attrs.get(ATTR_KIND).filter(|k| !k.trim().is_empty()) {
            config.kind = ShapeKind::parse(kind);
        }
        if let Some(seed) = c.attrs.get(ATTR_SEED).and_then(|s| parse_seed_attr(s)) {
            config.seed = seed;
        }

        out.push(MountRequest {
            id,
            src: src.trim().to_string(),
            width: c.width,
            height: c.height,
            config,
        });
    }
    out
}

/// Read a tile size the way a lenient integer attribute parser would: optional sign, then the
/// leading decimal digits. Anything that does not produce a positive value is `None`.
pub fn parse_seed_attr(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    let value: u64 = digits[..end].parse().ok()?;
    if negative || value == 0 {
        return None;
    }
    u32::try_from(value).ok()
}

/// Decode each requested source relative to `assets_root` and create its effect.
///
/// Requests whose image cannot be loaded, or whose config is invalid, are skipped.
#[tracing::instrument(skip(requests), fields(requests = requests.len()))]
pub fn mount_all(requests: &[MountRequest], assets_root: &Path) -> Vec<Mounted> {
    let mut out = Vec::with_capacity(requests.len());
    for req in requests {
        let path = assets_root.join(&req.src);
        let image = match load_image(&path) {
            Ok(img) => img,
            Err(err) => {
                tracing::warn!(id = %req.id, %err, "image failed to load, effect not created");
                continue;
            }
        };
        let target = CpuTarget::new(req.width, req.height);
        match EffectController::new(image, target, req.config.clone()) {
            Ok(effect) => out.push(Mounted {
                id: req.id.clone(),
                effect,
            }),
            Err(err) => {
                tracing::warn!(id = %req.id, %err, "invalid effect config, effect not created");
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/bootstrap/scan.rs"]
mod tests;
