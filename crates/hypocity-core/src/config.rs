//! Loading a [`GameConfig`] from JSON.
//!
//! Missing fields take their defaults, so a file only needs the values it
//! changes. Every loaded config is validated before it is returned.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use hypocity_logic::config::{GameConfig, InvalidConfig};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(Vec<InvalidConfig>),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(problems) => {
                write!(f, "Invalid config:")?;
                for p in problems {
                    write!(f, " {};", p)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Parse and validate a config from any reader.
pub fn load_config<R: Read>(reader: R) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = serde_json::from_reader(reader)?;
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Parse and validate a config file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let config = load_config(BufReader::new(file))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg = load_config("{}".as_bytes()).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = load_config(r#"{ "npc_count": 10, "chase_speed": 4.0 }"#.as_bytes()).unwrap();
        assert_eq!(cfg.npc_count, 10);
        assert_eq!(cfg.chase_speed, 4.0);
        assert_eq!(cfg.walk_speed, GameConfig::default().walk_speed);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(load_config("{ nope".as_bytes()), Err(ConfigError::Json(_))));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = load_config(r#"{ "hypocrite_probability": 1.5 }"#.as_bytes()).unwrap_err();
        match &err {
            ConfigError::Invalid(problems) => {
                assert!(problems.iter().any(|p| p.field == "hypocrite_probability"))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Invalid config:"));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_config_file("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
