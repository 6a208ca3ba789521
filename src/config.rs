//! Configuration handling for pen-paint
//!
//! `PaintConfig` holds the window/canvas size, the starting pen, the undo
//! depth, the default document path and the quick-color palette. It is read
//! from `<config_dir>/pen-paint/config.toml`; a missing file is created with
//! the defaults.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::canvas::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{Error, Result};
use crate::pen::{Pen, Thickness};
use crate::types::Rgb;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenConfig {
    pub color: [u8; 3],
    pub thickness: i64, // clamped into 1..=100 when applied
}

impl Default for PenConfig {
    fn default() -> Self {
        Self { color: [0, 0, 0], thickness: Thickness::DEFAULT.get() as i64 }
    }
}

impl PenConfig {
    pub fn to_pen(&self) -> Pen {
        Pen { color: Rgb::from(self.color), thickness: Thickness::clamped(self.thickness) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Max undo snapshots kept; absent means unbounded.
    pub undo_depth: Option<usize>,
    pub document: PathBuf,
    pub palette: Vec<[u8; 3]>,
    pub pen: PenConfig,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            title: "Pen Paint".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            undo_depth: None,
            document: PathBuf::from("drawing.png"),
            palette: vec![
                [0, 0, 0],
                [255, 0, 0],
                [0, 160, 0],
                [0, 0, 255],
                [255, 200, 0],
                [255, 0, 255],
                [0, 200, 200],
                [128, 128, 128],
                [255, 255, 255],
            ],
            pen: PenConfig::default(),
        }
    }
}

impl PaintConfig {
    /// Get the path to the configuration file
    pub fn default_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("pen-paint")
        } else {
            PathBuf::from(".config/pen-paint")
        };

        config_dir.join("config.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `path`, writing the defaults there if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Self::default();
                default_config.save_to(path)?;
                Ok(default_config)
            }
            Err(e) => Err(Error::Config(format!("{}: {e}", path.display()))),
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Config(format!("{}: {e}", parent.display())))?;
            }
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        Ok(())
    }

    pub fn palette_color(&self, slot: usize) -> Option<Rgb> {
        self.palette.get(slot).copied().map(Rgb::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        let cfg = PaintConfig::from_toml("").unwrap();
        assert_eq!(cfg, PaintConfig::default());
        assert_eq!((cfg.width, cfg.height), (900, 700));
        assert_eq!(cfg.pen.to_pen(), Pen::default());
        assert_eq!(cfg.undo_depth, None);
    }

    #[test]
    fn partial_file_overrides_only_what_it_names() {
        let cfg = PaintConfig::from_toml(
            r#"
            undo_depth = 20
            document = "art/sketch.png"

            [pen]
            color = [255, 0, 0]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.undo_depth, Some(20));
        assert_eq!(cfg.document, PathBuf::from("art/sketch.png"));
        assert_eq!(cfg.pen.to_pen().color, Rgb::new(255, 0, 0));
        assert_eq!(cfg.pen.to_pen().thickness, Thickness::DEFAULT);
        assert_eq!(cfg.title, "Pen Paint");
    }

    #[test]
    fn out_of_range_pen_thickness_is_clamped() {
        let cfg = PaintConfig::from_toml("[pen]\nthickness = 400\n").unwrap();
        assert_eq!(cfg.pen.to_pen().thickness, Thickness::MAX);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        assert!(matches!(PaintConfig::from_toml("width = \"wide\""), Err(Error::Config(_))));
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = std::env::temp_dir().join(format!("pen-paint-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let cfg = PaintConfig::load_from(&path).unwrap();
        assert_eq!(cfg, PaintConfig::default());
        assert!(path.exists());
        assert_eq!(PaintConfig::load_from(&path).unwrap(), cfg);

        let _ = fs::remove_dir_all(&dir);
    }
}
