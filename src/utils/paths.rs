use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub fn get_paytui_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".paytui"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let paytui_dir = get_paytui_dir()?;
    Ok(paytui_dir.join("config.toml"))
}

pub fn get_log_path() -> Result<PathBuf> {
    let paytui_dir = get_paytui_dir()?;
    Ok(paytui_dir.join("paytui.log"))
}

pub fn ensure_directories_exist() -> Result<()> {
    let paytui_dir = get_paytui_dir()?;

    if !paytui_dir.exists() {
        fs::create_dir_all(&paytui_dir)?;
    }

    Ok(())
}
