//! Profile configuration loading

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use keyforge::ChainProfiles;
use tracing::info;

/// Load the profile table, applying the JSON overrides in `path` when given
pub fn load_profiles(path: Option<&Path>) -> Result<ChainProfiles> {
    let Some(path) = path else {
        return Ok(ChainProfiles::default());
    };

    info!("Loading profile overrides from {}", path.display());

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    ChainProfiles::from_json(&json)
        .with_context(|| format!("invalid profile overrides in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyforge::Chain;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        assert_eq!(load_profiles(None).unwrap(), ChainProfiles::default());
    }

    #[test]
    fn test_loads_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "evm": {{ "defaultPath": "m/44'/60'/0'/0/7" }} }}"#).unwrap();

        let profiles = load_profiles(Some(file.path())).unwrap();
        assert_eq!(profiles.get(Chain::Evm).default_path, "m/44'/60'/0'/0/7");
    }

    #[test]
    fn test_reports_bad_files() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_profiles(Some(file.path())).is_err());

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_profiles(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
