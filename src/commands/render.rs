use eyre::{Context, Result};

use crate::cell::CellInput;
use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::host::{Host, HostEvent};
use crate::registry::CellRegistry;
use crate::script::parse_assignment;

use super::print_view;

pub fn run(
    select: Option<&str>,
    sets: &[String],
    format: OutputFormat,
    settings: &Settings,
    registry: &CellRegistry,
) -> Result<()> {
    let mut options = settings.host.to_options();
    if let Some(id) = select {
        options = options.with_selection(id);
    }

    // Parse every edit before touching the host
    let inputs = sets
        .iter()
        .map(|raw| parse_assignment(raw).map(|(name, text)| CellInput::new(name, text)))
        .collect::<Result<Vec<_>>>()
        .context("Invalid --set argument")?;

    let mut host = Host::new(registry, options);
    for input in inputs {
        host.dispatch(HostEvent::Input(input));
    }

    print_view(&host.render(), format)
}
