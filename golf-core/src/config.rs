//! Configuration loader.
//!
//! Loads alternate physical constants and club sets from YAML files, so a
//! venue or a validation run can change them without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! data/
//! ├── constants/
//! │   ├── sea_level.yaml
//! │   └── denver.yaml
//! └── clubs/
//!     └── standard.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::clubs::ClubTable;
use crate::constants::PhysicalConstants;

/// Error type for configuration and club lookup.
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
    UnknownClub(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            ConfigError::NotFound(name) => write!(f, "Config not found: {}", name),
            ConfigError::UnknownClub(id) => write!(f, "Unknown club: {}", id),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err)
    }
}

/// Config loader with configurable base directory.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain `constants/` and `clubs/` subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a constants set by name (without .yaml extension).
    ///
    /// Fields missing from the file keep their sea-level defaults. Step
    /// sizes must be positive and the flight ceiling finite, or the
    /// simulators could not terminate.
    ///
    /// # Example
    /// ```ignore
    /// let loader = ConfigLoader::new("data");
    /// let denver = loader.load_constants("denver")?;
    /// ```
    pub fn load_constants(&self, name: &str) -> Result<PhysicalConstants, ConfigError> {
        let contents = self.read("constants", name)?;
        let constants: PhysicalConstants = serde_yaml::from_str(&contents)?;
        check_time_steps(&constants)?;
        Ok(constants)
    }

    /// Load a club set by name.
    pub fn load_clubs(&self, name: &str) -> Result<ClubTable, ConfigError> {
        let contents = self.read("clubs", name)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// List all available constants sets.
    pub fn list_constants(&self) -> Result<Vec<String>, ConfigError> {
        self.list_configs("constants")
    }

    /// List all available club sets.
    pub fn list_club_sets(&self) -> Result<Vec<String>, ConfigError> {
        self.list_configs("clubs")
    }

    fn read(&self, subdir: &str, name: &str) -> Result<String, ConfigError> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        Ok(fs::read_to_string(&path)?)
    }

    fn list_configs(&self, subdir: &str) -> Result<Vec<String>, ConfigError> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn check_time_steps(constants: &PhysicalConstants) -> Result<(), ConfigError> {
    let positive = |value: f64| value.is_finite() && value > 0.0;

    if !positive(constants.flight_time_step) {
        return Err(ConfigError::InvalidValue(format!(
            "flight_time_step must be positive, got {}",
            constants.flight_time_step
        )));
    }
    if !positive(constants.putt_time_step) {
        return Err(ConfigError::InvalidValue(format!(
            "putt_time_step must be positive, got {}",
            constants.putt_time_step
        )));
    }
    if !constants.max_flight_time.is_finite() {
        return Err(ConfigError::InvalidValue(format!(
            "max_flight_time must be finite, got {}",
            constants.max_flight_time
        )));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn get_data_path() -> PathBuf {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join("..").join("data")
    }

    #[test]
    fn test_load_sea_level_matches_defaults() {
        let loader = ConfigLoader::new(get_data_path());
        let result = loader.load_constants("sea_level");

        assert!(result.is_ok(), "Should load sea_level: {:?}", result.err());
        assert_eq!(result.unwrap(), PhysicalConstants::default());
    }

    #[test]
    fn test_load_partial_constants() {
        let loader = ConfigLoader::new(get_data_path());
        let denver = loader.load_constants("denver").unwrap();
        let defaults = PhysicalConstants::default();

        let expected = defaults.adjust_air_density(20.0, 1609.0);
        assert!(
            (denver.air_density - expected).abs() < 0.01,
            "denver density {} vs {}",
            denver.air_density,
            expected
        );
        assert_eq!(denver.gravity, defaults.gravity);
    }

    #[test]
    fn test_load_standard_clubs_matches_builtin() {
        let loader = ConfigLoader::new(get_data_path());
        let result = loader.load_clubs("standard");

        assert!(result.is_ok(), "Should load standard: {:?}", result.err());
        assert_eq!(result.unwrap(), ClubTable::standard());
    }

    #[test]
    fn test_load_nonexistent_config() {
        let loader = ConfigLoader::new(get_data_path());
        match loader.load_clubs("nonexistent_bag_xyz") {
            Err(ConfigError::NotFound(name)) => assert_eq!(name, "nonexistent_bag_xyz"),
            other => panic!("Expected NotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_positive_time_step() {
        let dir = env::temp_dir().join(format!("golf-config-{}", std::process::id()));
        fs::create_dir_all(dir.join("constants")).unwrap();
        fs::write(dir.join("constants").join("frozen.yaml"), "flight_time_step: 0.0\n").unwrap();
        fs::write(dir.join("constants").join("backwards.yaml"), "putt_time_step: -0.01\n").unwrap();

        let loader = ConfigLoader::new(&dir);
        for name in ["frozen", "backwards"] {
            match loader.load_constants(name) {
                Err(ConfigError::InvalidValue(msg)) => assert!(msg.contains("time_step"), "{}", msg),
                other => panic!("Expected InvalidValue for {}, got {:?}", name, other),
            }
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_list_configs() {
        let loader = ConfigLoader::new(get_data_path());
        let constants = loader.list_constants().unwrap();
        assert_eq!(constants, vec!["denver".to_string(), "sea_level".to_string()]);

        let clubs = loader.list_club_sets().unwrap();
        assert!(clubs.contains(&"standard".to_string()));
    }

    #[test]
    fn test_missing_base_lists_nothing() {
        let loader = ConfigLoader::new(get_data_path().join("does_not_exist"));
        assert!(loader.list_constants().unwrap().is_empty());
    }
}
