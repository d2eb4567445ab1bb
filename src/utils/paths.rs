use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn get_wildclip_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".wildclip"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let dir = get_wildclip_dir()?;
    Ok(dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_wildclip_dir() {
        let dir = get_wildclip_dir().unwrap();
        assert!(dir.to_string_lossy().ends_with(".wildclip"));
    }

    #[test]
    fn test_get_config_path() {
        let path = get_config_path().unwrap();
        assert!(path.to_string_lossy().contains(".wildclip"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
