//! Asset and style resolution for the banner.
//!
//! All bundled files live next to the executable and are optional:
//! - `Mantinia.otf` - display font
//! - `elden_ring_sound.mp3` - sound cue
//! - `banner_style.json` - overrides for [`BannerStyle`]
//!
//! Nothing here fails: a missing or broken file means the built-in
//! fallback is used instead.
//!
//! # Example
//!
//! ```rust,no_run
//! use elden_banner::config::{load_style, Assets};
//!
//! let assets = Assets::beside_executable();
//! let style = load_style(&assets.style_path());
//! println!("strip height: {}", style.strip_height);
//! ```
use crate::style::BannerStyle;
use std::fs;
use std::path::{Path, PathBuf};

pub const FONT_FILE: &str = "Mantinia.otf";
pub const SOUND_FILE: &str = "elden_ring_sound.mp3";
pub const STYLE_FILE: &str = "banner_style.json";

/// Get the directory the executable lives in
/// Falls back to the current directory if it can't be determined
pub fn asset_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Location of the bundled files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    dir: PathBuf,
}

impl Assets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Assets { dir: dir.into() }
    }

    pub fn beside_executable() -> Self {
        Self::new(asset_directory())
    }

    pub fn font_path(&self) -> PathBuf {
        self.dir.join(FONT_FILE)
    }

    pub fn sound_path(&self) -> PathBuf {
        self.dir.join(SOUND_FILE)
    }

    pub fn style_path(&self) -> PathBuf {
        self.dir.join(STYLE_FILE)
    }
}

/// Load the banner style from a JSON file
/// Returns the default style if the file doesn't exist or can't be parsed
pub fn load_style(path: &Path) -> BannerStyle {
    if !path.exists() {
        tracing::debug!("No style file at {}, using defaults", path.display());
        return BannerStyle::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return BannerStyle::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(style) => {
            tracing::info!("Loaded style overrides from {}", path.display());
            style
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            BannerStyle::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        let assets = Assets::new("/opt/banner");
        assert_eq!(assets.font_path(), Path::new("/opt/banner/Mantinia.otf"));
        assert_eq!(
            assets.sound_path(),
            Path::new("/opt/banner/elden_ring_sound.mp3")
        );
        assert_eq!(
            assets.style_path(),
            Path::new("/opt/banner/banner_style.json")
        );
    }

    #[test]
    fn test_asset_directory_is_absolute() {
        let dir = asset_directory();
        assert!(dir.is_absolute());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_missing_style_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let style = load_style(&dir.path().join(STYLE_FILE));
        assert_eq!(style, BannerStyle::default());
    }

    #[test]
    fn test_malformed_style_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STYLE_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_style(&path), BannerStyle::default());
    }

    #[test]
    fn test_style_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STYLE_FILE);
        fs::write(&path, r#"{ "strip_height": 200.0, "shadow_blur_radius": 4.0 }"#).unwrap();

        let style = load_style(&path);
        assert_eq!(style.strip_height, 200.0);
        assert_eq!(style.shadow_blur_radius, 4.0);
        assert_eq!(style.glow_font_size, 78.0);
    }
}
