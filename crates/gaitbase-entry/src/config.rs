use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gaitbase_export::config::ReportConfig;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitbaseConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub json: JsonConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Text report template. The bundled template is used if unset or missing.
    #[serde(default)]
    pub text: Option<PathBuf>,
    /// XLSX report template. There is no bundled spreadsheet.
    #[serde(default)]
    pub xlsx: Option<PathBuf>,
}

/// Backup of newly created records as JSON files, written on close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonConfig {
    pub dump_json: bool,
    pub json_path: PathBuf,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gaitbase")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: data_dir().join("gaitbase.db"),
        }
    }
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            dump_json: false,
            json_path: data_dir().join("json"),
        }
    }
}

impl Default for GaitbaseConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            database: DatabaseConfig::default(),
            templates: TemplateConfig::default(),
            report: ReportConfig::default(),
            json: JsonConfig::default(),
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("gaitbase"))
}

/// Default location of the user config file.
pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn load_config(path: &Path) -> eyre::Result<GaitbaseConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(version) => u32::try_from(version)
            .map_err(|_| eyre::eyre!("config_version {version} is out of range"))?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: GaitbaseConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Load the config at `path`, writing the defaults there first if the file
/// does not exist.
pub fn load_or_create(path: &Path) -> eyre::Result<GaitbaseConfig> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "reading user config");
        return load_config(path);
    }
    tracing::warn!(path = %path.display(), "no config file, creating one with defaults");
    let config = GaitbaseConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update gaitbase."
        ));
    }

    // v0 → v1: the spreadsheet template key was `templates.xls`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(templates) = obj.get_mut("templates").and_then(|t| t.as_object_mut()) {
            if let Some(xls) = templates.remove("xls") {
                templates.entry("xlsx").or_insert(xls);
            }
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (templates.xls renamed to templates.xlsx)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &GaitbaseConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
