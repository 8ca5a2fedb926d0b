use anyhow::Result;

use crate::config::WebsiteGeneratorConfig;

pub fn show(config: &WebsiteGeneratorConfig) -> Result<()> {
    println!("⚙️  Effective configuration");
    println!();
    print!("{}", config.to_redacted_toml()?);
    Ok(())
}
