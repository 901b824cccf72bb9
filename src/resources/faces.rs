//! Face images for fighters and the bag.
//!
//! Loaded once at startup from the configured paths. A face that failed to
//! load, or that was never configured, is simply "not ready" and the
//! renderer draws a placeholder for it for the whole session.

use std::path::{Path, PathBuf};

use log::{info, warn};
use raylib::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// Non-send store of face textures keyed by their source path.
#[derive(Default)]
pub struct FaceTextures {
    textures: FxHashMap<PathBuf, Texture2D>,
    failed: FxHashSet<PathBuf>,
}

impl FaceTextures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` unless it is already loaded or already failed.
    pub fn load(&mut self, rl: &mut RaylibHandle, th: &RaylibThread, path: &Path) {
        if self.textures.contains_key(path) || self.failed.contains(path) {
            return;
        }
        match rl.load_texture(th, &path.to_string_lossy()) {
            Ok(texture) => {
                info!("face loaded: {}", path.display());
                self.textures.insert(path.to_path_buf(), texture);
            }
            Err(e) => {
                warn!("face {} unavailable, using placeholder: {}", path.display(), e);
                self.failed.insert(path.to_path_buf());
            }
        }
    }

    /// The texture for `path` when it is loaded and has a drawable size.
    pub fn ready(&self, path: Option<&PathBuf>) -> Option<&Texture2D> {
        let texture = self.textures.get(path?)?;
        (texture.width() > 0 && texture.height() > 0).then_some(texture)
    }
}
