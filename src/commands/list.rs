use colored::*;
use eyre::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::registry::CellRegistry;

#[derive(Serialize)]
struct CellEntry<'a> {
    id: &'a str,
    description: &'a str,
}

pub fn run(filter: Option<&str>, format: OutputFormat, registry: &CellRegistry) -> Result<()> {
    let entries: Vec<CellEntry> = match filter {
        Some(query) => registry
            .search(query)
            .into_iter()
            .map(|(id, cell)| CellEntry {
                id,
                description: cell.description(),
            })
            .collect(),
        None => registry
            .iter()
            .map(|(id, cell)| CellEntry {
                id,
                description: cell.description(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&entries)?),
        OutputFormat::Text => {
            println!("{}", "Cell types:".bold());
            println!();

            if entries.is_empty() {
                println!("  {}", "(none)".dimmed());
                return Ok(());
            }

            for entry in &entries {
                if entry.description.is_empty() {
                    println!("  {}", entry.id.cyan());
                } else {
                    println!("  {} - {}", entry.id.cyan(), entry.description.dimmed());
                }
            }
        }
    }

    Ok(())
}
