use eyre::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::host::Host;
use crate::registry::CellRegistry;
use crate::script;

pub fn run(
    script_path: Option<&PathBuf>,
    format: OutputFormat,
    settings: &Settings,
    registry: &CellRegistry,
) -> Result<()> {
    let source = match script_path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read script from stdin")?;
            buf
        }
    };

    let steps = script::parse(&source).context("Failed to parse script")?;
    log::info!("Running script with {} step(s)", steps.len());

    let mut host = Host::new(registry, settings.host.to_options());
    let mut first = true;

    script::run(&mut host, steps, |view| {
        match format {
            // One document per line
            OutputFormat::Json => println!("{}", serde_json::to_string(view)?),
            OutputFormat::Yaml => {
                println!("---");
                print!("{}", serde_yaml::to_string(view)?);
            }
            OutputFormat::Text => {
                if !first {
                    println!();
                }
                println!("{}", view.render_text());
            }
        }
        first = false;
        Ok(())
    })
}
