use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Settings;

pub fn run(action: ConfigAction, settings: &Settings) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), settings),
    }
}

fn show(format: OutputFormat, settings: &Settings) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(settings)?);
        }
        OutputFormat::Text => {
            println!("{}", "cellhost Configuration".bold());
            println!();

            println!("  log_level: {}", settings.log_level.as_filter());
            println!();

            let host = &settings.host;
            println!("{}:", "host".cyan());
            println!(
                "  initial_selection: {}",
                host.initial_selection.as_deref().unwrap_or("(first registered)")
            );
            match &host.initial_config {
                Some(fields) => {
                    println!("  initial_config:");
                    for (field, value) in fields {
                        println!("    {}: {}", field, value);
                    }
                }
                None => println!("  initial_config: {}", "(built-in seed)".dimmed()),
            }
            if host.peers.is_empty() {
                println!("  peers: {}", "(none)".dimmed());
            } else {
                println!("  peers: {}", host.peers.join(", "));
            }
        }
    }

    Ok(())
}
