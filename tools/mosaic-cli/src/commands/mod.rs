pub mod check;
pub mod inspect;
pub mod run;

use std::path::PathBuf;

use anyhow::Context;
use mosaic_area_core::AreaConfig;
use mosaic_common::config::AppConfig;
use mosaic_frame_model::AreaFamily;

/// Engine config from `--engine-config`, else the app default, else
/// built-in defaults. A non-empty `families` replaces the configured list.
pub fn load_engine_config(
    path: Option<PathBuf>,
    families: Vec<AreaFamily>,
    app: &AppConfig,
) -> anyhow::Result<AreaConfig> {
    let mut config = match path.or_else(|| app.processing.engine_config.clone()) {
        Some(path) => AreaConfig::from_path(&path)
            .with_context(|| format!("Failed to load engine config {}", path.display()))?,
        None => AreaConfig::default(),
    };

    if !families.is_empty() {
        let mut selected = Vec::with_capacity(families.len());
        for family in families {
            if !selected.contains(&family) {
                selected.push(family);
            }
        }
        config.families = selected;
    }
    config.validate()?;
    Ok(config)
}
