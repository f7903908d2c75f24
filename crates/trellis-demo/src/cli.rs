#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Arguments are parsed by hand. `TRELLIS_DEMO_*` environment variables
//! supply defaults that explicit flags override.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
Trellis notes demo

USAGE:
    trellis-demo [OPTIONS] [FILE]

OPTIONS:
    --theme=NAME         Theme: 'dark', 'light', or 'auto' (default: auto)
    --no-mouse           Disable mouse reporting
    --no-line-numbers    Hide the line-number gutter
    --log=PATH           Write logs to PATH
    --exit-after-ms=N    Quit after N milliseconds (for scripted runs)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Ctrl+Q          Quit
    Ctrl+S          Save the notes page to FILE
    Ctrl+N / Ctrl+P Next / previous page
    Ctrl+F / F3     Find / find next
    Ctrl+G          Go to line
    F1              Show this help
    Escape          Close the open overlay

ENVIRONMENT VARIABLES:
    TRELLIS_DEMO_THEME          Override --theme
    TRELLIS_DEMO_LOG            Override --log
    TRELLIS_DEMO_EXIT_AFTER_MS  Override --exit-after-ms";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// File loaded into the notes page and written by Ctrl+S.
    pub file: Option<PathBuf>,
    /// "dark", "light", or "auto".
    pub theme: String,
    pub mouse: bool,
    pub line_numbers: bool,
    /// Log destination; logging is off without one.
    pub log: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            file: None,
            theme: "auto".into(),
            mouse: true,
            line_numbers: true,
            log: None,
            exit_after_ms: 0,
        }
    }
}

/// What the arguments asked for besides running.
#[derive(Debug, PartialEq, Eq)]
pub enum Request {
    Run,
    Help,
    Version,
}

impl Opts {
    /// Parse environment variables and process arguments, exiting on
    /// `--help`, `--version`, or a bad argument.
    pub fn parse() -> Self {
        let mut opts = Self::default();
        opts.apply_env(|key| env::var(key).ok());

        let args: Vec<String> = env::args().skip(1).collect();
        match opts.apply_args(&args) {
            Ok(Request::Run) => opts,
            Ok(Request::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Request::Version) => {
                println!("trellis-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Apply `TRELLIS_DEMO_*` overrides read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("TRELLIS_DEMO_THEME") {
            self.theme = val;
        }
        if let Some(val) = lookup("TRELLIS_DEMO_LOG") {
            self.log = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("TRELLIS_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            self.exit_after_ms = n;
        }
    }

    /// Apply command-line arguments.
    pub fn apply_args(&mut self, args: &[String]) -> Result<Request, String> {
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Request::Help),
                "--version" | "-V" => return Ok(Request::Version),
                "--no-mouse" => self.mouse = false,
                "--no-line-numbers" => self.line_numbers = false,
                other => {
                    if let Some(val) = other.strip_prefix("--theme=") {
                        match val {
                            "dark" | "light" | "auto" => self.theme = val.to_string(),
                            _ => return Err(format!("Invalid --theme value: {val}")),
                        }
                    } else if let Some(val) = other.strip_prefix("--log=") {
                        self.log = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        self.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else if other.starts_with('-') {
                        return Err(format!("Unknown argument: {other}"));
                    } else if self.file.is_none() {
                        self.file = Some(PathBuf::from(other));
                    } else {
                        return Err(format!("Unexpected extra file: {other}"));
                    }
                }
            }
        }
        Ok(Request::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.theme, "auto");
        assert!(opts.mouse);
        assert!(opts.line_numbers);
        assert_eq!(opts.file, None);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn flags_and_file() {
        let mut opts = Opts::default();
        let req = opts
            .apply_args(&args(&["--no-mouse", "--theme=light", "notes.txt"]))
            .unwrap();
        assert_eq!(req, Request::Run);
        assert!(!opts.mouse);
        assert_eq!(opts.theme, "light");
        assert_eq!(opts.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut opts = Opts::default();
        assert!(opts.apply_args(&args(&["--theme=neon"])).is_err());
        assert!(opts.apply_args(&args(&["--exit-after-ms=soon"])).is_err());
        assert!(opts.apply_args(&args(&["--frobnicate"])).is_err());
        assert!(opts.apply_args(&args(&["a.txt", "b.txt"])).is_err());
    }

    #[test]
    fn help_short_circuits() {
        let mut opts = Opts::default();
        assert_eq!(opts.apply_args(&args(&["-h", "--bogus"])), Ok(Request::Help));
        assert_eq!(opts.apply_args(&args(&["--version"])), Ok(Request::Version));
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let mut opts = Opts::default();
        opts.apply_env(|key| match key {
            "TRELLIS_DEMO_THEME" => Some("dark".into()),
            "TRELLIS_DEMO_EXIT_AFTER_MS" => Some("250".into()),
            _ => None,
        });
        assert_eq!(opts.theme, "dark");
        assert_eq!(opts.exit_after_ms, 250);

        opts.apply_args(&args(&["--theme=light"])).unwrap();
        assert_eq!(opts.theme, "light");
    }

    #[test]
    fn help_text_lists_bindings() {
        assert!(HELP_TEXT.contains("Ctrl+Q"));
        assert!(HELP_TEXT.contains("F1"));
        assert!(!VERSION.is_empty());
    }
}
