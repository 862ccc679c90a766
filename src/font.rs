//! Font resolution: bundled display font when present, system serif otherwise

use crate::config::Assets;
use cosmic_text::{Family, FontSystem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    /// Family loaded from the bundled font file
    Bundled(String),
    /// Named system family
    System(String),
}

impl FontChoice {
    pub fn family(&self) -> Family<'_> {
        match self {
            FontChoice::Bundled(name) | FontChoice::System(name) => Family::Name(name),
        }
    }
}

/// Pick the font for the banner text
///
/// Loads the bundled font into `font_system` when the file exists. A missing
/// or unreadable file falls back to `fallback` without failing.
pub fn resolve_font(font_system: &mut FontSystem, assets: &Assets, fallback: &str) -> FontChoice {
    let path = assets.font_path();

    if !path.exists() {
        tracing::debug!("No bundled font at {}, using {}", path.display(), fallback);
        return FontChoice::System(fallback.to_string());
    }

    let db = font_system.db_mut();
    let before = db.len();

    if let Err(e) = db.load_font_file(&path) {
        tracing::warn!("Failed to load {}: {}", path.display(), e);
        return FontChoice::System(fallback.to_string());
    }

    let family = db
        .faces()
        .skip(before)
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()));

    match family {
        Some(name) => {
            tracing::info!("Using bundled font '{}'", name);
            FontChoice::Bundled(name)
        }
        None => {
            tracing::warn!("{} contains no usable faces", path.display());
            FontChoice::System(fallback.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut font_system = FontSystem::new_with_locale_and_db("en-US".into(), Default::default());

        let choice = resolve_font(&mut font_system, &Assets::new(dir.path()), "Times New Roman");
        assert_eq!(choice, FontChoice::System("Times New Roman".to_string()));
    }

    #[test]
    fn test_corrupt_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let assets = Assets::new(dir.path());
        std::fs::write(assets.font_path(), b"not a font").unwrap();
        let mut font_system = FontSystem::new_with_locale_and_db("en-US".into(), Default::default());

        let choice = resolve_font(&mut font_system, &assets, "Times New Roman");
        assert_eq!(choice, FontChoice::System("Times New Roman".to_string()));
    }

    #[test]
    fn test_family_name() {
        let choice = FontChoice::Bundled("Mantinia".to_string());
        assert_eq!(choice.family(), Family::Name("Mantinia"));
    }
}
