use anyhow::Result;
use gencal_core::GencalConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = GencalConfig::config_path()?;
    let config = GencalConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!();
    println!("{}", "Effective settings".bold());
    print!("{}", config.to_toml()?);

    Ok(())
}
