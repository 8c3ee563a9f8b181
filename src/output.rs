//! Shared output formatting for agen commands.

use serde::Serialize;

use crate::error::{Error, Result};

pub const SCHEMA_VERSION: &str = "agen.v1";

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Human-readable report: a header line, then optional sections.
#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    lines: Vec<String>,
    next_steps: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            summary: Vec::new(),
            lines: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    /// Plain line printed under the header, e.g. a task summary.
    pub fn push_line(&mut self, value: impl Into<String>) {
        self.lines.push(value.into());
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.next_steps.push(value.into());
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let next_steps = human.map(|h| h.next_steps.clone()).unwrap_or_default();

        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            next_steps: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
            next_steps,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if options.quiet {
        return Ok(());
    }

    if let Some(human) = human {
        println!("{}", format_human(human));
    }

    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    if json {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            message: &'a str,
            code: i32,
            kind: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<serde_json::Value>,
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: ErrorBody<'a>,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            next_steps: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: ErrorBody {
                message: &err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
                details: err.details(),
            },
            next_steps,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = next_steps.first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = vec![output.header.clone()];

    if !output.summary.is_empty() {
        for (key, value) in &output.summary {
            lines.push(format!("  {key}: {value}"));
        }
    }
    lines.extend(output.lines.iter().cloned());
    if !output.next_steps.is_empty() {
        lines.push(String::new());
        lines.push("Next steps:".to_string());
        for step in &output.next_steps {
            lines.push(format!("- {step}"));
        }
    }

    lines.join("\n")
}

/// First non-flag argument, used to label error envelopes before parsing.
pub fn infer_command_name_from_args() -> String {
    command_name(std::env::args().skip(1))
}

/// Global flags that consume the following argument.
const VALUE_FLAGS: [&str; 2] = ["--tasks-dir", "--config"];

fn command_name(args: impl IntoIterator<Item = String>) -> String {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            args.next();
        } else if !arg.starts_with('-') {
            return arg;
        }
    }
    "agen".to_string()
}

fn error_kind(err: &Error) -> &'static str {
    if err.is_validation() {
        "validation"
    } else if err.is_format() {
        "format"
    } else {
        match err {
            Error::InvalidIdentifier(_) | Error::TaskNotFound(_) | Error::AmbiguousPrefix { .. } => {
                "resolution"
            }
            _ if err.exit_code() == crate::error::exit_codes::USER_ERROR => "user_error",
            _ => "operation_failed",
        }
    }
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::AmbiguousPrefix { matches, .. } => match matches.split_first() {
            Some((first, others)) => vec![format!(
                "use a longer id, e.g. {}",
                distinguishing_prefix(first, others)
            )],
            None => Vec::new(),
        },
        Error::TaskNotFound(_) => vec!["agen list".to_string()],
        Error::InvalidStorePath(_) => vec!["agen init".to_string()],
        Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            vec!["agen init".to_string()]
        }
        Error::InvalidConfig(_) => vec!["fix ~/.agen/config.toml then retry".to_string()],
        Error::TruncatedRecord { .. }
        | Error::InvalidText { .. }
        | Error::InvalidRecordIdentifier(_) => {
            vec!["remove or restore the corrupt file in the task directory".to_string()]
        }
        _ => Vec::new(),
    }
}

/// Shortest prefix of `id` that no other identifier shares.
fn distinguishing_prefix<'a>(id: &'a str, others: &[String]) -> &'a str {
    let shared = others
        .iter()
        .map(|other| {
            id.chars()
                .zip(other.chars())
                .take_while(|(a, b)| a == b)
                .count()
        })
        .max()
        .unwrap_or(0);
    match id.char_indices().nth(shared + 1) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_output_layout() {
        let mut human = HumanOutput::new("agen new: created task");
        human.push_summary("id", "0f8e");
        human.push_line("> [To do] x <medium> 0f8e");
        human.push_next_step("agen list");

        assert_eq!(
            format_human(&human),
            "agen new: created task\n  id: 0f8e\n> [To do] x <medium> 0f8e\n\nNext steps:\n- agen list"
        );
    }

    #[test]
    fn command_name_skips_global_flags() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(command_name(args(&["--json", "list", "done"])), "list");
        assert_eq!(
            command_name(args(&["--config", "/tmp/c.toml", "-q", "rm", "ab"])),
            "rm"
        );
        assert_eq!(command_name(args(&["--tasks-dir=/x", "mark"])), "mark");
        assert_eq!(command_name(args(&["--json"])), "agen");
    }

    #[test]
    fn error_kinds() {
        assert_eq!(error_kind(&Error::TitleTooLong), "validation");
        assert_eq!(error_kind(&Error::TaskNotFound("a".into())), "resolution");
        assert_eq!(error_kind(&Error::InvalidArgument("a".into())), "user_error");
        assert_eq!(
            error_kind(&Error::InvalidText { field: "title" }),
            "format"
        );
        assert_eq!(
            error_kind(&Error::LockFailed("x".into())),
            "operation_failed"
        );
    }

    #[test]
    fn ambiguous_prefix_suggests_longer_id() {
        let err = Error::AmbiguousPrefix {
            prefix: "ab".to_string(),
            matches: vec![
                "abcdef01-0000-4000-8000-000000000001".to_string(),
                "abcdef01-1111-4000-8000-000000000002".to_string(),
            ],
        };
        assert_eq!(
            error_next_steps(&err),
            vec!["use a longer id, e.g. abcdef01-0".to_string()]
        );
    }

    #[test]
    fn distinguishing_prefix_is_unique_among_matches() {
        let first = "abcdef01-0000-4000-8000-000000000001";
        let others = vec![
            "abcdef01-0000-4000-8000-000000000002".to_string(),
            "abcdef01-0000-4000-8000-000000000003".to_string(),
        ];
        let prefix = distinguishing_prefix(first, &others);

        assert_eq!(prefix, first);
        assert!(others.iter().all(|other| !other.starts_with(prefix)));

        let others = vec!["abd".to_string(), "b".to_string()];
        assert_eq!(distinguishing_prefix("abc", &others), "abc");
        assert_eq!(distinguishing_prefix("abcdef", &others), "abc");
        assert_eq!(distinguishing_prefix("x", &[]), "x");
    }
}
