use crate::{
    config::{records_dir, Config},
    helpers::messages::success,
    Result,
};
use colored::Colorize;
use std::path::Path;

pub async fn run(data_dir: &Path, config: &Config, init: bool) -> Result<()> {
    let file = Config::file(data_dir);
    if init {
        config.save(&file).await?;
        success(format!("Config written to {}", file.display()));
        return Ok(());
    }

    println!("{} {}", "Data".bold(), data_dir.display());
    println!("{} {}", "Config".bold(), file.display());
    println!("{} {}", "Records".bold(), records_dir(data_dir).display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
