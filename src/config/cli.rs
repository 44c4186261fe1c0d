use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "form-gate")]
#[command(about = "Validate form fields typed on stdin as `Field=value` lines")]
pub struct CliConfig {
    /// Path to a TOML form configuration (defaults to the built-in registration form)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the debounce interval in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Print each form state as a JSON line
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    /// Validate and print the configuration without reading input
    #[arg(long)]
    pub dry_run: bool,
}

/// 把一行 `Field=value` 拆成欄位名稱與文字；value 可以是空字串
pub fn parse_input_line(line: &str) -> Option<(&str, &str)> {
    let (field, text) = line.split_once('=')?;
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    Some((field, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_line() {
        assert_eq!(parse_input_line("Email=x@y.com"), Some(("Email", "x@y.com")));
        assert_eq!(parse_input_line(" Phone =123"), Some(("Phone", "123")));
        assert_eq!(parse_input_line("Password="), Some(("Password", "")));
        assert_eq!(parse_input_line("Password=a=b"), Some(("Password", "a=b")));
        assert_eq!(parse_input_line("=abc"), None);
        assert_eq!(parse_input_line("no separator"), None);
    }

    #[test]
    fn test_cli_args() {
        let args = CliConfig::parse_from(["form-gate", "--json", "--debounce-ms", "50"]);
        assert!(args.json);
        assert_eq!(args.debounce_ms, Some(50));
        assert!(args.config.is_none());
    }
}
