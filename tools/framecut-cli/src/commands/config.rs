//! Show or write the configuration.

use framecut_common::config::AppConfig;

pub fn run(write_default: bool, config: &AppConfig) -> anyhow::Result<()> {
    if write_default {
        let path = AppConfig::default().save()?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    println!("# {}", AppConfig::default_path().display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
