pub mod human;
pub mod json;

use serde::Serialize;

use crate::error::Result;
use json::JsonEnvelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Trait for command outputs that can be rendered in both human and JSON formats.
pub trait CommandOutput: Serialize {
    fn human_display(&self) -> String;
}

/// Render a command output in the requested format.
pub fn render_output<T: CommandOutput>(output: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(output.human_display()),
        OutputFormat::Json => JsonEnvelope::success(output).to_pretty(),
    }
}

/// Print a command output in the requested format.
pub fn print_output<T: CommandOutput>(output: &T, format: OutputFormat) -> Result<()> {
    let rendered = render_output(output, format)?;
    match format {
        OutputFormat::Human => human::success(&rendered),
        OutputFormat::Json => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Count {
        files: usize,
    }

    impl CommandOutput for Count {
        fn human_display(&self) -> String {
            format!("{} files", self.files)
        }
    }

    #[test]
    fn test_render_human() {
        let out = render_output(&Count { files: 3 }, OutputFormat::Human).unwrap();
        assert_eq!(out, "3 files");
    }

    #[test]
    fn test_render_json_envelope() {
        let out = render_output(&Count { files: 3 }, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["data"]["files"], 3);
    }

    #[test]
    fn test_format_from_flag() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Human);
    }
}
