use anyhow::Result;
use invite_core::config::InviteConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let path = InviteConfig::config_path()?;
    let cfg = InviteConfig::load()?;

    println!("Config file: {}", path.display().bold());
    println!();
    print!("{}", cfg.to_display_toml()?);

    Ok(())
}
