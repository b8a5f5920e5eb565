use clap::Subcommand;
use dayseries_core::Config;

use super::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "smoothing.window_size", "storage.duplicate_policy")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file and series file locations
    Path,
}

pub fn run(ctx: &Context, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml_listing(&config)?);
            }
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            let config = Config::load()?;
            println!("config: {}", Config::path()?.display());
            let data = match &ctx.data {
                Some(path) => path.clone(),
                None => config.data_file()?,
            };
            println!("data:   {}", data.display());
        }
    }
    Ok(())
}

fn toml_listing(config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    let json = serde_json::to_value(config)?;
    let mut out = String::new();
    if let Some(sections) = json.as_object() {
        for (section, fields) in sections {
            for key in fields.as_object().into_iter().flat_map(|f| f.keys()) {
                let path = format!("{section}.{key}");
                let shown = config.get(&path).unwrap_or_default();
                out.push_str(&format!("{path} = {shown}\n"));
            }
        }
    }
    Ok(out)
}
