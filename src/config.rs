use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::viewer::DocumentVariant;

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub documents: DocumentsConfig,
    pub zoom: ZoomConfig,
    pub render: RenderConfig,
    pub keymap: KeymapConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocumentsConfig {
    pub full: PathBuf,
    pub condensed: PathBuf,
    pub initial: DocumentVariant,
    /// Where `d` copies the active variant. Defaults to `~/Downloads`.
    pub export_dir: Option<PathBuf>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            full: PathBuf::from("resume.pdf"),
            condensed: PathBuf::from("resume_condensed.pdf"),
            initial: DocumentVariant::Full,
            export_dir: None,
        }
    }
}

impl DocumentsConfig {
    pub fn path_for(&self, variant: DocumentVariant) -> &Path {
        match variant {
            DocumentVariant::Full => &self.full,
            DocumentVariant::Condensed => &self.condensed,
        }
    }

    pub fn resolved_export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.export_dir {
            return dir.clone();
        }
        match std::env::var_os("HOME") {
            Some(home) if !home.is_empty() => PathBuf::from(home).join("Downloads"),
            _ => std::env::temp_dir(),
        }
    }
}

/// Zoom bounds and responsive defaults, all in integer percent.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_percent: u16,
    pub max_percent: u16,
    pub step_percent: u16,
    pub compact_default_percent: u16,
    pub wide_default_percent: u16,
    pub compact_breakpoint_px: u32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_percent: 50,
            max_percent: 200,
            step_percent: 10,
            compact_default_percent: 120,
            wide_default_percent: 150,
            compact_breakpoint_px: 768,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    pub input_poll_timeout_ms: u64,
    pub scroll_step_cells: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout_ms: 50,
            scroll_step_cells: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    pub fn resolved_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("dpv.log"))
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    pub(crate) fn sanitized(mut self) -> Self {
        let zoom = &mut self.zoom;
        zoom.min_percent = zoom.min_percent.max(1);
        zoom.max_percent = zoom.max_percent.max(zoom.min_percent);
        zoom.step_percent = zoom.step_percent.max(1);
        zoom.compact_default_percent = zoom
            .compact_default_percent
            .clamp(zoom.min_percent, zoom.max_percent);
        zoom.wide_default_percent = zoom
            .wide_default_percent
            .clamp(zoom.min_percent, zoom.max_percent);

        self.render.input_poll_timeout_ms = self.render.input_poll_timeout_ms.max(1);
        self.render.scroll_step_cells = self.render.scroll_step_cells.max(1);
        if self
            .documents
            .export_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            self.documents.export_dir = None;
        }
        if self.log.filter.trim().is_empty() {
            self.log.filter = LogConfig::default().filter;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("DPV_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("dpv").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("dpv")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("dpv").join("config.toml"));
    }
    None
}
