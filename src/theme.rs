//! Light/dark preference and its persistence.
//!
//! The store owns the preference; animations never look it up themselves.
//! Whoever hosts them subscribes to changes and passes the current theme
//! into each frame.

use crate::graphics::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Brand colour used for particles, links and sphere labels
pub const PRIMARY: Rgb = Rgb::new(16, 185, 129);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn background(self) -> Rgb {
        match self {
            Theme::Light => Rgb::new(249, 250, 251),
            Theme::Dark => Rgb::new(0, 0, 0),
        }
    }

    pub fn foreground(self) -> Rgb {
        match self {
            Theme::Light => Rgb::new(17, 24, 39),
            Theme::Dark => Rgb::new(255, 255, 255),
        }
    }

    pub fn muted(self) -> Rgb {
        match self {
            Theme::Light => Rgb::new(75, 85, 99),
            Theme::Dark => Rgb::new(161, 161, 170),
        }
    }

    /// Guess from the terminal's `COLORFGBG` ("fg;bg"); background 0-6 and 8 are dark
    pub fn from_colorfgbg(value: &str) -> Option<Theme> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(if bg <= 6 || bg == 8 {
            Theme::Dark
        } else {
            Theme::Light
        })
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to access theme file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed theme file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct SavedTheme {
    theme: Theme,
}

type Subscriber = Box<dyn FnMut(Theme)>;

/// Owns the current theme, persists it and notifies subscribers on change
pub struct ThemeStore {
    theme: Theme,
    path: Option<PathBuf>,
    subscribers: Vec<Subscriber>,
}

impl ThemeStore {
    /// In-memory store that never touches disk
    pub fn new(theme: Theme) -> Self {
        ThemeStore {
            theme,
            path: None,
            subscribers: Vec::new(),
        }
    }

    /// Loads the saved preference, falling back to the terminal's background
    /// and finally to light
    pub fn load(path: Option<PathBuf>) -> Self {
        let saved = path.as_deref().and_then(|p| match read_theme(p) {
            Ok(theme) => theme,
            Err(err) => {
                log::warn!("Ignoring saved theme: {}", err);
                None
            }
        });
        let theme = saved
            .or_else(|| {
                std::env::var("COLORFGBG")
                    .ok()
                    .and_then(|v| Theme::from_colorfgbg(&v))
            })
            .unwrap_or_default();
        log::info!("Starting with {:?} theme", theme);
        ThemeStore {
            theme,
            path,
            subscribers: Vec::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Registers a callback invoked with the current theme now and on every change
    pub fn subscribe(&mut self, mut callback: impl FnMut(Theme) + 'static) {
        callback(self.theme);
        self.subscribers.push(Box::new(callback));
    }

    /// Flips the theme, persists it and notifies subscribers.
    /// A failed save is logged; the in-memory switch still happens.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Some(path) = &self.path {
            if let Err(err) = write_theme(path, self.theme) {
                log::error!("Failed to save theme: {}", err);
            }
        }
        for subscriber in self.subscribers.iter_mut() {
            subscriber(self.theme);
        }
        self.theme
    }
}

fn read_theme(path: &Path) -> Result<Option<Theme>, ThemeError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ThemeError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let saved: SavedTheme = serde_json::from_str(&text)?;
    Ok(Some(saved.theme))
}

fn write_theme(path: &Path, theme: Theme) -> Result<(), ThemeError> {
    let io_err = |source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let json = serde_json::to_string(&SavedTheme { theme })?;
    fs::write(path, json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn toggle_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("theme.json");

        let mut store = ThemeStore::new(Theme::Light);
        store.path = Some(path.clone());
        assert_eq!(store.toggle(), Theme::Dark);

        let reloaded = ThemeStore::load(Some(path.clone()));
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert_eq!(fs::read_to_string(path).unwrap(), r#"{"theme":"dark"}"#);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        fs::write(&path, "{not json").unwrap();
        assert!(read_theme(&path).is_err());
        // falls back rather than failing
        let _ = ThemeStore::load(Some(path));
    }

    #[test]
    fn missing_file_means_no_preference() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_theme(&dir.path().join("absent.json")).unwrap(), None);
    }

    #[test]
    fn subscribers_see_every_change() {
        let seen = Rc::new(Cell::new(Theme::Light));
        let mut store = ThemeStore::new(Theme::Dark);
        let sink = seen.clone();
        store.subscribe(move |theme| sink.set(theme));
        assert_eq!(seen.get(), Theme::Dark);
        store.toggle();
        assert_eq!(seen.get(), Theme::Light);
    }

    #[test]
    fn colorfgbg_detection() {
        assert_eq!(Theme::from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(Theme::from_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(Theme::from_colorfgbg("garbage"), None);
    }
}
