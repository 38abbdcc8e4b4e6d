//! Built-in example cell
//!
//! A title and a description, plus an optional list of peer cells.

use serde_json::Value;

use super::{Cell, CellInput, CellProps, FieldChange};
use crate::store::ConfigSnapshot;
use crate::view::{CellView, Widget};

/// Input names, which double as the config fields they edit
const EDITABLE_FIELDS: &[&str] = &["title", "description"];

#[derive(Debug, Default, Clone, Copy)]
pub struct ExampleCell;

impl ExampleCell {
    pub fn new() -> Self {
        Self
    }
}

impl Cell for ExampleCell {
    fn description(&self) -> &str {
        "Boilerplate cell with a title and a description"
    }

    fn on_activate(&self, config: &ConfigSnapshot) {
        log::info!("ExampleCell activated with config: {}", config.to_pretty_json());
    }

    fn render(&self, props: &CellProps<'_>) -> CellView {
        let mut view = CellView::new()
            .push(Widget::Heading {
                text: "Example Cell".to_string(),
            })
            .push(Widget::TextInput {
                name: "title".to_string(),
                label: "Title:".to_string(),
                value: props.config.get_str("title").to_string(),
                placeholder: "e.g., My Special Cell".to_string(),
            })
            .push(Widget::TextArea {
                name: "description".to_string(),
                label: "Description:".to_string(),
                value: props.config.get_str("description").to_string(),
                placeholder: "Describe your cell...".to_string(),
                rows: 2,
            });

        if !props.peers.is_empty() {
            view = view.push(Widget::List {
                title: "Available Cells:".to_string(),
                items: props.peers.to_vec(),
            });
        }

        view
    }

    fn handle_input(&self, _props: &CellProps<'_>, input: &CellInput, on_change: &mut dyn FnMut(FieldChange)) {
        if !EDITABLE_FIELDS.contains(&input.name.as_str()) {
            log::debug!("ExampleCell ignoring input for unknown widget '{}'", input.name);
            return;
        }

        // Text widgets only ever carry strings
        let text = match &input.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };

        on_change(FieldChange::new(input.name.clone(), text));
    }
}
