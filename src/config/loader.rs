use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::QualityBarConfig;
use crate::errors::ConfigError;

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".qualitybar.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(
    contents: &str,
    origin: &Path,
) -> Result<QualityBarConfig, ConfigError> {
    let config = toml::from_str::<QualityBarConfig>(contents).map_err(|e| ConfigError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    config.validate()?;
    Ok(config)
}

/// Load an explicitly named config file; every failure is reported.
///
/// A relative `history.storage_dir` is resolved against the file's directory.
pub fn load_config_from_path(path: &Path) -> Result<QualityBarConfig, ConfigError> {
    let contents = read_config_file(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_and_validate_config(&contents, path)?;
    if let Some(dir) = path.parent() {
        config.history = config.history.anchored_at(dir);
    }
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading a discovered config file, falling back on any failure
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<QualityBarConfig> {
    match load_config_from_path(config_path) {
        Ok(config) => Some(config),
        Err(ConfigError::Read { source, .. }) => {
            handle_read_error(config_path, &source);
            None
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Per-user config location, e.g. `~/.config/qualitybar/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("qualitybar").join("config.toml"))
}

/// Search `start` and its ancestors, then the user config, for a config file.
pub fn load_config_from(start: PathBuf) -> QualityBarConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            QualityBarConfig::default()
        })
}

pub fn load_config() -> QualityBarConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            QualityBarConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_ancestors_stops_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_directory_ancestors_reaches_root() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a"), 10).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a"), PathBuf::from("/")]);
    }

    #[test]
    fn test_parse_reports_origin_on_bad_toml() {
        let err = parse_and_validate_config("preset = ", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == Path::new("x.toml")));
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_and_validate_config(
            "[thresholds.base]\nsecurity = 120\n",
            Path::new("x.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_empty_file_is_default_config() {
        let config = parse_and_validate_config("", Path::new("x.toml")).unwrap();
        assert_eq!(config, QualityBarConfig::default());
    }
}
