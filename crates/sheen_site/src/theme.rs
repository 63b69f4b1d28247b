//! Theme preference
//!
//! The only persisted state in the site: one dark/light flag, read on
//! startup and written on every toggle. Storage failures never reach the
//! user; they are logged and the site carries on with the default.

use crate::error::ThemeStoreError;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Color scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence for the theme flag
pub trait ThemeStore {
    /// Stored preference, `None` when nothing was saved yet
    fn load(&self) -> Result<Option<ThemeMode>, ThemeStoreError>;

    fn save(&mut self, mode: ThemeMode) -> Result<(), ThemeStoreError>;
}

#[derive(Debug, Deserialize, Serialize)]
struct ThemeFile {
    theme: ThemeMode,
}

/// Stores the preference in a small TOML file
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>, ThemeStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| ThemeStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: ThemeFile = toml::from_str(&content)?;
        Ok(Some(file.theme))
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), ThemeStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ThemeStoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let content = toml::to_string(&ThemeFile { theme: mode })?;
        fs::write(&self.path, content).map_err(|source| ThemeStoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store for headless runs and tests
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: Cell<Option<ThemeMode>>,
    unavailable: bool,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mode: ThemeMode) -> Self {
        Self {
            value: Cell::new(Some(mode)),
            unavailable: false,
        }
    }

    /// A store whose every call fails, like storage blocked by the browser
    pub fn unavailable() -> Self {
        Self {
            value: Cell::new(None),
            unavailable: true,
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>, ThemeStoreError> {
        if self.unavailable {
            return Err(ThemeStoreError::Unavailable);
        }
        Ok(self.value.get())
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), ThemeStoreError> {
        if self.unavailable {
            return Err(ThemeStoreError::Unavailable);
        }
        self.value.set(Some(mode));
        Ok(())
    }
}

/// Startup read: stored value, else `default`. Errors are logged.
pub fn resolve_initial(store: &dyn ThemeStore, default: ThemeMode) -> ThemeMode {
    match store.load() {
        Ok(Some(mode)) => mode,
        Ok(None) => default,
        Err(err) => {
            tracing::warn!("theme store unreadable, using {}: {}", default, err);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggle().to_string(), "dark");
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileThemeStore::new(dir.path().join("prefs").join("theme.toml"));

        assert_eq!(store.load().unwrap(), None);
        store.save(ThemeMode::Light).unwrap();
        assert_eq!(store.load().unwrap(), Some(ThemeMode::Light));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.trim(), r#"theme = "light""#);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "theme = \"sepia\"").unwrap();

        let store = FileThemeStore::new(&path);
        assert!(matches!(store.load(), Err(ThemeStoreError::Parse(_))));
        assert_eq!(resolve_initial(&store, ThemeMode::Dark), ThemeMode::Dark);
    }

    #[test]
    fn test_unavailable_store_uses_default() {
        let mut store = MemoryThemeStore::unavailable();
        assert!(store.save(ThemeMode::Light).is_err());
        assert_eq!(resolve_initial(&store, ThemeMode::Light), ThemeMode::Light);
    }

    #[test]
    fn test_memory_store_prefers_stored_value() {
        let store = MemoryThemeStore::with_value(ThemeMode::Light);
        assert_eq!(resolve_initial(&store, ThemeMode::Dark), ThemeMode::Light);
    }
}
