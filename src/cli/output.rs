//! Output formatting for CLI commands.

use serde::Serialize;
use serde_json::Value;

use crate::cli::args::{LexevalArgs, OutputFormat};
use crate::error::Result;

/// Output a stage summary in the selected format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &LexevalArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_human<T: Serialize>(message: &str, result: &T, args: &LexevalArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    for line in human_lines(&value, 0) {
        println!("{line}");
    }
    Ok(())
}

/// Render `value` as indented `key: value` lines.
fn human_lines(value: &Value, indent: usize) -> Vec<String> {
    let spaces = "  ".repeat(indent);
    let mut lines = Vec::new();

    match value {
        Value::Object(obj) => {
            for (key, val) in obj {
                if is_nested(val) {
                    lines.push(format!("{spaces}{key}:"));
                    lines.extend(human_lines(val, indent + 1));
                } else {
                    lines.push(format!("{spaces}{key}: {}", format_value(val)));
                }
            }
        }
        Value::Array(arr) if arr.iter().any(is_nested) => {
            for item in arr {
                lines.push(format!("{spaces}-"));
                lines.extend(human_lines(item, indent + 1));
            }
        }
        _ => lines.push(format!("{spaces}{}", format_value(value))),
    }

    lines
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(arr) => arr.iter().any(is_nested),
        _ => false,
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexevalArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a scalar JSON value for display.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => format!("{f:.4}"),
            None => n.to_string(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        Value::Object(_) => "[object]".to_string(),
        Value::Null => "null".to_string(),
    }
}
