//! CLI output formatting.
//!
//! JSON is syntax-highlighted when written to a terminal; `colored` drops
//! the escape codes on its own when stdout is not a TTY.

use colored::Colorize;

/// Prints a value as pretty, highlighted JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{}", highlight_json(&pretty));
    Ok(())
}

/// Where the highlighter is inside a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Between tokens.
    Outside,
    /// Inside a string; `escaped` is set right after a backslash.
    InString { escaped: bool },
}

/// Colors pretty-printed JSON.
///
/// Object keys are cyan, string values green, numbers yellow, and
/// booleans/null magenta. Punctuation keeps the default color.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut scan = Scan::Outside;
    let mut token = String::new();
    // `true` for each open object, `false` for each open array.
    let mut containers: Vec<bool> = Vec::new();
    let mut expecting_value = false;

    for ch in json.chars() {
        match scan {
            Scan::InString { escaped } => {
                token.push(ch);
                if escaped {
                    scan = Scan::InString { escaped: false };
                } else if ch == '\\' {
                    scan = Scan::InString { escaped: true };
                } else if ch == '"' {
                    let colored = if expecting_value { token.green() } else { token.cyan() };
                    out.push_str(&colored.to_string());
                    token.clear();
                    scan = Scan::Outside;
                }
            }
            Scan::Outside => {
                if ch == '"' {
                    flush_scalar(&mut out, &mut token);
                    token.push(ch);
                    scan = Scan::InString { escaped: false };
                    continue;
                }
                if !matches!(ch, ':' | ',' | '{' | '}' | '[' | ']') {
                    token.push(ch);
                    continue;
                }

                flush_scalar(&mut out, &mut token);
                out.push(ch);
                match ch {
                    ':' => expecting_value = true,
                    '{' => {
                        containers.push(true);
                        expecting_value = false;
                    }
                    '[' => {
                        containers.push(false);
                        expecting_value = true;
                    }
                    '}' | ']' => {
                        containers.pop();
                    }
                    _ => expecting_value = containers.last() == Some(&false),
                }
            }
        }
    }

    flush_scalar(&mut out, &mut token);
    out
}

/// Writes a pending bare token, coloring the scalar inside its whitespace.
fn flush_scalar(out: &mut String, token: &mut String) {
    if token.trim().is_empty() {
        out.push_str(token);
        token.clear();
        return;
    }

    let start = token.len() - token.trim_start().len();
    let end = token.trim_end().len();
    let (prefix, rest) = token.split_at(start);
    let (value, suffix) = rest.split_at(end - start);

    out.push_str(prefix);
    match value {
        "" => {}
        "true" | "false" | "null" => out.push_str(&value.magenta().to_string()),
        number if number.parse::<f64>().is_ok() => out.push_str(&number.yellow().to_string()),
        other => out.push_str(other),
    }
    out.push_str(suffix);
    token.clear();
}

/// Formats a presence marker for path listings.
#[must_use]
pub fn format_marker(active: bool, exists: bool) -> String {
    match (active, exists) {
        (true, _) => "(active)".green().to_string(),
        (false, true) => "(exists)".yellow().to_string(),
        (false, false) => String::new(),
    }
}
