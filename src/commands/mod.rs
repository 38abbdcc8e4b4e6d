pub mod completions;
pub mod config;
pub mod list;
pub mod render;
pub mod run;

use eyre::Result;

use crate::cli::OutputFormat;
use crate::view::HostView;

/// Print a host view in the requested format
pub(crate) fn print_view(view: &HostView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(view)?),
        OutputFormat::Text => println!("{}", view.render_text()),
    }
    Ok(())
}
