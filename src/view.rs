//! Render output of the host and its cells
//!
//! Views are plain data. `render_text` turns them into terminal output;
//! the JSON/YAML forms come straight from serde.

#![allow(dead_code)] // Embedder API; the CLI only drives part of it

use colored::*;
use serde::Serialize;

use crate::store::ConfigSnapshot;

/// One element of a cell's rendered form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Heading {
        text: String,
    },
    TextInput {
        name: String,
        label: String,
        value: String,
        placeholder: String,
    },
    TextArea {
        name: String,
        label: String,
        value: String,
        placeholder: String,
        rows: u8,
    },
    List {
        title: String,
        items: Vec<String>,
    },
}

impl Widget {
    /// Input name for editable widgets
    pub fn name(&self) -> Option<&str> {
        match self {
            Widget::TextInput { name, .. } | Widget::TextArea { name, .. } => Some(name),
            Widget::Heading { .. } | Widget::List { .. } => None,
        }
    }
}

/// Everything a cell rendered for one cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CellView {
    pub widgets: Vec<Widget>,
}

impl CellView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Find an editable widget by input name
    pub fn input(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name() == Some(name))
    }
}

/// The cell type dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorView {
    pub label: String,
    pub options: Vec<String>,
    pub selected: String,
}

/// What the host produced for one render cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HostView {
    Error {
        identifier: String,
        message: String,
    },
    Cell {
        title: String,
        selector: SelectorView,
        config: ConfigSnapshot,
        cell: CellView,
    },
}

impl HostView {
    pub fn is_error(&self) -> bool {
        matches!(self, HostView::Error { .. })
    }

    /// Format for terminal display
    pub fn render_text(&self) -> String {
        let mut out = Vec::new();

        match self {
            HostView::Error { message, .. } => {
                out.push(format!("{} {}", "Error:".red().bold(), message.red()));
            }
            HostView::Cell {
                title,
                selector,
                config,
                cell,
            } => {
                out.push(title.bold().to_string());
                out.push(String::new());

                out.push(format!("{}", selector.label.bold()));
                for option in &selector.options {
                    if *option == selector.selected {
                        out.push(format!("  {} {}", "●".green(), option.green()));
                    } else {
                        out.push(format!("  {} {}", "○".dimmed(), option));
                    }
                }
                out.push(String::new());

                out.push(format!("{}", "Current config:".bold()));
                for line in config.to_pretty_json().lines() {
                    out.push(format!("  {}", line.dimmed()));
                }
                out.push(String::new());

                for widget in &cell.widgets {
                    render_widget(widget, &mut out);
                }
            }
        }

        out.join("\n")
    }
}

fn render_widget(widget: &Widget, out: &mut Vec<String>) {
    match widget {
        Widget::Heading { text } => out.push(text.cyan().bold().to_string()),
        Widget::TextInput {
            name,
            label,
            value,
            placeholder,
        } => {
            out.push(format!("{} {}", label.bold(), format!("[{}]", name).dimmed()));
            out.push(format!("  {}", display_value(value, placeholder)));
        }
        Widget::TextArea {
            name,
            label,
            value,
            placeholder,
            ..
        } => {
            out.push(format!("{} {}", label.bold(), format!("[{}]", name).dimmed()));
            if value.is_empty() {
                out.push(format!("  {}", display_value(value, placeholder)));
            } else {
                for line in value.lines() {
                    out.push(format!("  {}", line));
                }
            }
        }
        Widget::List { title, items } => {
            out.push(title.bold().to_string());
            for item in items {
                out.push(format!("  - {}", item));
            }
        }
    }
}

fn display_value(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.dimmed().italic().to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cell() -> CellView {
        CellView::new()
            .push(Widget::Heading {
                text: "Example Cell".to_string(),
            })
            .push(Widget::TextInput {
                name: "title".to_string(),
                label: "Title:".to_string(),
                value: "Hello".to_string(),
                placeholder: "e.g., My Special Cell".to_string(),
            })
    }

    #[test]
    fn test_input_lookup_skips_non_editable() {
        let view = sample_cell();
        assert!(view.input("title").is_some());
        assert!(view.input("Example Cell").is_none());
    }

    #[test]
    fn test_error_view_text_names_identifier() {
        colored::control::set_override(false);
        let view = HostView::Error {
            identifier: "bogus".to_string(),
            message: "No valid cell type found for \"bogus\".".to_string(),
        };
        let text = view.render_text();
        assert!(text.contains("Error:"));
        assert!(text.contains("\"bogus\""));
    }

    #[test]
    fn test_cell_view_text_marks_selected_option() {
        colored::control::set_override(false);
        let view = HostView::Cell {
            title: "Cell Selector".to_string(),
            selector: SelectorView {
                label: "Select Cell Type:".to_string(),
                options: vec!["example".to_string(), "other".to_string()],
                selected: "example".to_string(),
            },
            config: ConfigSnapshot::seed(),
            cell: sample_cell(),
        };
        let text = view.render_text();
        assert!(text.contains("● example"));
        assert!(text.contains("○ other"));
        assert!(text.contains("Dummy Title"));
        assert!(text.contains("Hello"));
    }

    #[test]
    fn test_json_shape_is_tagged_by_mode() {
        let view = HostView::Error {
            identifier: "x".to_string(),
            message: "m".to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["mode"], "error");
        assert_eq!(json["identifier"], "x");
    }
}
