//! External command execution.
//!
//! Used to hand generated glyph sources to a font compiler.
//!
//! ```ignore
//! Cmd::from_slice(&config.font.compiler)
//!     .args([glyph_dir, fonts_dir])
//!     .arg(&config.font.name)
//!     .cwd(root)
//!     .run()?;
//! ```

use crate::log;
use anyhow::{Context, Result, bail};
use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Output},
    sync::OnceLock,
};

// ============================================================================
// Builder API
// ============================================================================

#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    filter: Option<&'static FilterRule>,
}

impl Cmd {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Create from a command array such as `["npx", "fantasticon"]`.
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_owned())
            .unwrap_or_default();
        Self {
            program,
            args: iter.map(|s| s.as_ref().to_owned()).collect(),
            ..Default::default()
        }
    }

    /// Add an argument. Empty arguments are dropped.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().fold(self, Self::arg)
    }

    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set output filter for logging.
    pub fn filter(mut self, filter: &'static FilterRule) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Program and arguments joined for display.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute, logging stderr through the filter. A non-zero exit status is
    /// an error carrying the command's output.
    pub fn run(self) -> Result<Output> {
        if self.program.is_empty() {
            bail!("empty command");
        }
        let filter = self.filter.unwrap_or(&EMPTY_FILTER);
        let name = self.program.to_string_lossy().into_owned();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute `{name}`"))?;

        log_output(&name, &output, filter)?;
        Ok(output)
    }
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Prefixes of output lines that are not worth logging.
pub struct FilterRule {
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Log output lines that pass the filter.
    pub fn log(&self, name: &str, output: &str) {
        let lines: Vec<_> = output
            .lines()
            .filter(|line| !self.should_skip(strip_ansi(line).trim()))
            .collect();

        if !lines.is_empty() {
            log!(name; "{}", lines.join("\n"));
        }
    }
}

pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

// ============================================================================
// Helpers
// ============================================================================

fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
    re.replace_all(s, "")
}

fn log_output(name: &str, output: &Output, filter: &'static FilterRule) -> Result<()> {
    if !output.status.success() {
        bail!(format_error(name, output));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(name, stderr.trim());
    Ok(())
}

fn format_error(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut msg = format!("Command `{name}` failed with {}", output.status);
    for (label, text) in [("stderr", stderr.trim()), ("stdout", stdout.trim())] {
        if !text.is_empty() {
            msg.push_str(&format!("\n{label}:\n{}", strip_ansi(text)));
        }
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================
