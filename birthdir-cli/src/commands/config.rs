use anyhow::Result;
use birthdir_core::config::Settings;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let path = Settings::config_path()?;

    if path.exists() {
        println!("Config already exists at {}", path.display().to_string().bold());
        return Ok(());
    }

    Settings::create_default_config(&path)?;
    println!("Created {}", path.display().to_string().green());
    Ok(())
}
