//! Command line definition.

use clap::{Args, Parser, Subcommand, ValueEnum};
use kurbo::Size;
use sketchpad_core::config::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchpad", version, about = "Headless Sketchpad renderer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a saved drawing (JSON) to the chosen formats
    Export {
        /// Structured drawing produced by a JSON export
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Feed a script of pointer events and commands through the engine, then
    /// export the result
    Replay {
        /// JSON script: `{"config": {...}, "steps": [...]}`
        script: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Options shared by every subcommand that writes files.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format; defaults to the configuration's export format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Directory the artifacts are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Canvas configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Container size used to resolve percentage dimensions, e.g. 1024x768
    #[arg(long, value_parser = parse_size)]
    pub container: Option<Size>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Svg,
    Png,
    Both,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Svg => ExportFormat::Svg,
            FormatArg::Png => ExportFormat::Png,
            FormatArg::Both => ExportFormat::Both,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(text: &str) -> Result<Size, String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {text:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n > 0.0)
            .ok_or_else(|| format!("invalid extent {v:?}"))
    };
    Ok(Size::new(parse(w)?, parse(h)?))
}
