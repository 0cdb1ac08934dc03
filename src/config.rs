// Runtime settings for the command-line front end.
// Layered: defaults, then an optional catalog.toml, then CATALOG__* env vars.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::fields::{Context, WidthFilterType, DEFAULT_MIRROR_BUFFER};
use crate::models::ViewState;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub dataset_path: PathBuf,
    pub mirror_buffer: f64,
    pub width_filter: WidthFilterType,
    pub export_dir: PathBuf,
    // JSON file with the decoded filter/sort/baseline state
    pub view_path: Option<PathBuf>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            .set_default("dataset_path", "data/vehicles.json")?
            .set_default("mirror_buffer", DEFAULT_MIRROR_BUFFER)?
            .set_default("width_filter", "extended")?
            .set_default("export_dir", "exports")?
            .add_source(File::with_name("catalog").required(false))
            // e.g. CATALOG__MIRROR_BUFFER=8
            .add_source(Environment::with_prefix("CATALOG").prefix_separator("__").separator("__"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    pub fn context(&self) -> Context {
        Context {
            mirror_buffer: self.mirror_buffer,
            width_filter: self.width_filter,
        }
    }

    /// Reads the saved view, if one is configured and present on disk.
    /// An unreadable or malformed view is logged and replaced by the default
    /// view, so a stale file never keeps the catalog from starting.
    pub fn load_view(&self) -> ViewState {
        match self.view_path.as_deref() {
            Some(path) if path.exists() => read_view(path).unwrap_or_else(|e| {
                tracing::warn!(error = %format!("{e:#}"), "using default view");
                ViewState::default()
            }),
            Some(path) => {
                tracing::info!(path = %path.display(), "view file not found, using default view");
                ViewState::default()
            }
            None => ViewState::default(),
        }
    }
}

pub fn read_view(path: &Path) -> Result<ViewState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read view file {}", path.display()))?;
    let view = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse view file {}", path.display()))?;
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;

    #[test]
    fn view_file_round_trip() {
        let dir = scratch_dir("round_trip");
        let path = dir.join("view.json");
        let json = r#"{"sort":{"field":"width","direction":"desc"},"baselineId":"rav4"}"#;
        fs::write(&path, json).unwrap();

        let view = read_view(&path).unwrap();
        assert_eq!(view.sort.field, "width");
        assert_eq!(view.sort.direction, SortDirection::Desc);
        assert_eq!(view.baseline_id.as_deref(), Some("rav4"));

        fs::remove_dir_all(&dir).ok();
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("vehicle_catalog_view_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn settings_with_view(view_path: Option<PathBuf>) -> Settings {
        Settings {
            dataset_path: PathBuf::from("data/vehicles.json"),
            mirror_buffer: 4.0,
            width_filter: WidthFilterType::Folded,
            export_dir: PathBuf::from("exports"),
            view_path,
        }
    }

    #[test]
    fn stale_view_file_keeps_what_still_decodes() {
        let dir = scratch_dir("stale");
        let path = dir.join("view.json");
        let json = r#"{"filter":{"bodyTypes":["van","suv"],"maxPrice":40000},
                       "sort":{"field":"width","direction":"DESC"}}"#;
        fs::write(&path, json).unwrap();

        let view = settings_with_view(Some(path)).load_view();
        assert_eq!(view.filter.body_types, vec![crate::models::BodyType::Suv]);
        assert_eq!(view.filter.max_price, Some(40000.0));
        assert_eq!(view.sort.direction, SortDirection::Desc);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn malformed_view_file_falls_back_to_default() {
        let dir = scratch_dir("malformed");
        let path = dir.join("view.json");
        fs::write(&path, r#"{"filter":{"maxPrice":"cheap"}}"#).unwrap();

        assert!(read_view(&path).is_err());
        assert_eq!(settings_with_view(Some(path)).load_view(), ViewState::default());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_view_file_falls_back_to_default() {
        let settings = settings_with_view(Some(PathBuf::from("no/such/view.json")));
        assert_eq!(settings.load_view(), ViewState::default());
        assert_eq!(settings.context().mirror_buffer, 4.0);
        assert_eq!(settings.context().width_filter, WidthFilterType::Folded);
    }
}
