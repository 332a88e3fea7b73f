use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if !*print_config && !*edit_config {
            info(format!("Config file: {}", Config::config_file().display()));
            info("Use --print to show it or --edit to change it.");
            return Ok(());
        }

        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", ConfigLogic::render(cfg)?);
        }

        if *edit_config {
            let used = ConfigLogic::edit(&Config::config_file(), editor.as_deref())?;
            success(format!("Configuration file edited using '{}'", used));
        }
    }

    Ok(())
}
