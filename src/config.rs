use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::router::Router;

/// Represents the complete configuration for cbs-publish.
///
/// Contains the package name, the series-to-target mapping table, and
/// behavior options. The mapping table is hand-maintained: each new upstream
/// series needs an entry here before its tags can be built.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default)]
    pub mapping: Vec<MappingEntry>,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// One row of the mapping table: a version series, the build target its tags
/// are submitted into, and the channel tags applied after a successful build.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MappingEntry {
    pub series: String,
    pub target: String,

    #[serde(default)]
    pub candidates: Vec<String>,
}

/// Configuration for behavior customization.
///
/// Controls runtime behavior without affecting routing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Submit scratch builds rather than real ones
    #[serde(default = "default_scratch")]
    pub scratch: bool,
}

fn default_package() -> String {
    "ceph-ansible".to_string()
}

fn default_scratch() -> bool {
    true
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            scratch: default_scratch(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            package: default_package(),
            mapping: vec![
                MappingEntry {
                    series: "v2".to_string(),
                    target: "storage7-ceph-jewel-el7".to_string(),
                    candidates: vec!["storage7-ceph-jewel-candidate".to_string()],
                },
                MappingEntry {
                    series: "v3".to_string(),
                    target: "storage7-ceph-luminous-el7".to_string(),
                    candidates: vec!["storage7-ceph-luminous-candidate".to_string()],
                },
            ],
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Build the validated routing table from this configuration.
    ///
    /// Fails if the table is empty or contains duplicate series entries.
    pub fn routes(&self) -> Result<Router> {
        if self.mapping.is_empty() {
            return Err(crate::error::CbsPublishError::config(
                "No series mappings configured",
            ));
        }
        Router::from_entries(&self.mapping)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `cbspublish.toml` in current directory
/// 3. `~/.config/.cbspublish.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./cbspublish.toml").exists() {
        fs::read_to_string("./cbspublish.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".cbspublish.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| crate::error::CbsPublishError::config(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_routes() {
        let config = Config::default();
        let router = config.routes().unwrap();
        assert_eq!(router.series_names(), vec!["v2", "v3"]);
        assert_eq!(
            router.route_for("v2").unwrap().target,
            "storage7-ceph-jewel-el7"
        );
    }

    #[test]
    fn test_default_behavior_is_scratch() {
        let config = Config::default();
        assert!(config.behavior.scratch);
    }

    #[test]
    fn test_parse_mapping_table() {
        let toml_content = r#"
package = "ceph-ansible"

[[mapping]]
series = "v3"
target = "storage7-ceph-jewel-el7"
candidates = ["storage7-ceph-luminous-candidate"]
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.package, "ceph-ansible");
        assert_eq!(config.mapping.len(), 1);
        assert_eq!(config.mapping[0].series, "v3");
        // behavior section omitted entirely, defaults apply
        assert!(config.behavior.scratch);
    }

    #[test]
    fn test_empty_mapping_rejected() {
        let config: Config = toml::from_str(r#"package = "ceph-ansible""#).unwrap();
        assert!(config.routes().is_err());
    }
}
