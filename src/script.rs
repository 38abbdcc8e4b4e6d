//! Event scripts
//!
//! A line-oriented way to drive a host from the CLI:
//!
//! ```text
//! # comment
//! select example
//! input title My Cell
//! set color "red"
//! render
//! ```
//!
//! `input` values are delivered to the cell as typed. `set` values are JSON
//! when they parse as JSON, otherwise literal strings.

use eyre::Result;
use lazy_regex::regex_captures;
use serde_json::Value;

use crate::cell::CellInput;
use crate::host::{Host, HostEvent};
use crate::view::HostView;

/// One parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Deliver an event to the host
    Event(HostEvent),
    /// Write a config field directly, bypassing the cell
    Set { field: String, value: Value },
    /// Render and report the view
    Render,
}

/// Parse a whole script
pub fn parse(source: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let step = parse_line(line).map_err(|e| eyre::eyre!("line {}: {}", idx + 1, e))?;
        steps.push(step);
    }

    Ok(steps)
}

fn parse_line(line: &str) -> Result<Step> {
    let Some((_, command, target, rest)) = regex_captures!(r"^(\w+)(?:\s+(\S+))?(?:\s+(.*))?$", line) else {
        eyre::bail!("Malformed line: {}", line);
    };

    match command {
        "select" => {
            if target.is_empty() {
                eyre::bail!("select needs a cell type identifier");
            }
            Ok(Step::Event(HostEvent::Select(target.to_string())))
        }
        "input" => {
            if target.is_empty() {
                eyre::bail!("input needs a widget name");
            }
            Ok(Step::Event(HostEvent::Input(CellInput::new(target, rest))))
        }
        "set" => {
            if target.is_empty() {
                eyre::bail!("set needs a field name");
            }
            Ok(Step::Set {
                field: target.to_string(),
                value: parse_value(rest),
            })
        }
        "render" => Ok(Step::Render),
        other => eyre::bail!("Unknown command: {}", other),
    }
}

/// Interpret a raw value as JSON, falling back to a plain string
pub fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Split a `name=text` pair, keeping the text exactly as given
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match regex_captures!(r"^([^=\s][^=]*)=(.*)$", raw) {
        Some((_, name, text)) => Ok((name.trim().to_string(), text.to_string())),
        None => eyre::bail!("Expected FIELD=VALUE, got '{}'", raw),
    }
}

/// Replay steps against a host, reporting each render
pub fn run<F>(host: &mut Host<'_>, steps: Vec<Step>, mut on_render: F) -> Result<()>
where
    F: FnMut(&HostView) -> Result<()>,
{
    for step in steps {
        match step {
            Step::Event(event) => host.dispatch(event),
            Step::Set { field, value } => {
                host.write(&field, value);
            }
            Step::Render => {
                let view = host.render();
                on_render(&view)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostOptions;
    use crate::registry::CellRegistry;
    use serde_json::json;

    #[test]
    fn test_parse_all_commands() {
        let steps = parse(
            r#"
# set up
select example
input title My Cell
set count 3
set tags ["a", "b"]
render
"#,
        )
        .unwrap();

        assert_eq!(
            steps,
            vec![
                Step::Event(HostEvent::Select("example".to_string())),
                Step::Event(HostEvent::Input(CellInput::new("title", "My Cell"))),
                Step::Set {
                    field: "count".to_string(),
                    value: json!(3),
                },
                Step::Set {
                    field: "tags".to_string(),
                    value: json!(["a", "b"]),
                },
                Step::Render,
            ]
        );
    }

    #[test]
    fn test_parse_input_without_value_is_empty_string() {
        let steps = parse("input description").unwrap();
        assert_eq!(
            steps,
            vec![Step::Event(HostEvent::Input(CellInput::new("description", "")))]
        );
    }

    #[test]
    fn test_input_text_reaches_config_verbatim() {
        let registry = CellRegistry::default();
        let mut host = Host::new(&registry, HostOptions::default());
        let steps = parse("input title 1.50\ninput description null").unwrap();

        run(&mut host, steps, |_| Ok(())).unwrap();

        let config = host.config();
        assert_eq!(config.get("title"), Some(&json!("1.50")));
        assert_eq!(config.get("description"), Some(&json!("null")));
    }

    #[test]
    fn test_set_still_interprets_json() {
        let steps = parse("set count 1.50\nset flag null").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Set {
                    field: "count".to_string(),
                    value: json!(1.5),
                },
                Step::Set {
                    field: "flag".to_string(),
                    value: Value::Null,
                },
            ]
        );
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let err = parse("render\n\nfrobnicate x").unwrap_err();
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_parse_select_requires_identifier() {
        assert!(parse("select").is_err());
        assert!(parse("set").is_err());
    }

    #[test]
    fn test_parse_value_json_or_string() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("{\"a\": 1}"), json!({"a": 1}));
        assert_eq!(parse_value("plain words"), json!("plain words"));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("title=My Cell").unwrap(), ("title".to_string(), "My Cell".to_string()));
        assert_eq!(parse_assignment("n=1.50").unwrap(), ("n".to_string(), "1.50".to_string()));
        assert_eq!(parse_assignment("a=b=c").unwrap().1, "b=c");
        assert_eq!(parse_assignment("empty=").unwrap(), ("empty".to_string(), String::new()));
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn test_run_reports_each_render() {
        let registry = CellRegistry::default();
        let mut host = Host::new(&registry, HostOptions::default());
        let steps = parse("render\ninput title My Cell\nselect ghost\nrender\nselect example\nrender").unwrap();

        let mut views = Vec::new();
        run(&mut host, steps, |view| {
            views.push(view.clone());
            Ok(())
        })
        .unwrap();

        assert_eq!(views.len(), 3);
        assert!(!views[0].is_error());
        assert!(views[1].is_error());
        match &views[2] {
            HostView::Cell { config, .. } => assert_eq!(config.get_str("title"), "My Cell"),
            HostView::Error { .. } => panic!("expected cell view"),
        }
    }
}
