//! `form-preview`: development harness for the form engine.
//!
//! Reads a JSON request from a file (or stdin when no file is given), runs
//! it through the engine and writes the result to stdout. Logging goes to
//! stderr and is controlled with `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use common::model::pattern::{MatchType, PatternBuilderState};
use common::requests::{PreviewRequest, SubmissionRequest};
use engine::detection::detect_mergeable_groups;
use engine::pattern::{build, parse, validate_pattern};
use engine::preview::assign_colors;
use engine::validation::validate_form;
use engine::{build_submission, render_preview, PreviewInput, RenderConfig};
use env_logger::Env;
use log::{info, warn};

/// Preview, flatten and inspect structured form data.
#[derive(Parser, Debug)]
#[command(name = "form-preview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file overriding the render configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the preview HTML for a preview request
    Preview {
        /// Request JSON file; stdin when omitted
        input: Option<PathBuf>,
    },

    /// Flatten a submission request into the generator payload
    Submit {
        /// Request JSON file; stdin when omitted
        input: Option<PathBuf>,
    },

    /// Propose merge groups for a JSON array of placeholder names
    Detect {
        /// Placeholder list JSON file; stdin when omitted
        input: Option<PathBuf>,
    },

    /// Work with rule patterns
    Pattern {
        #[command(subcommand)]
        command: PatternCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PatternCommand {
    /// Build the stored regex from a structured description
    Build {
        #[arg(short, long, value_enum, default_value_t = MatchArg::Contains)]
        match_type: MatchArg,

        /// Comma-separated values
        value: String,

        #[arg(short = 's', long)]
        case_sensitive: bool,
    },

    /// Reopen a stored regex as a structured description
    Parse {
        pattern: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MatchArg {
    StartsWith,
    EndsWith,
    Contains,
    Exact,
    Regex,
}

impl From<MatchArg> for MatchType {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::StartsWith => MatchType::StartsWith,
            MatchArg::EndsWith => MatchType::EndsWith,
            MatchArg::Contains => MatchType::Contains,
            MatchArg::Exact => MatchType::Exact,
            MatchArg::Regex => MatchType::Regex,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Preview { input } => preview(input.as_deref(), &config),
        Command::Submit { input } => submit(input.as_deref()),
        Command::Detect { input } => detect(input.as_deref()),
        Command::Pattern { command } => pattern(command),
    }
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!("using render config from {}", path.display());
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading request from stdin")?;
            Ok(text)
        }
    }
}

fn preview(input: Option<&Path>, config: &RenderConfig) -> Result<()> {
    let request: PreviewRequest =
        serde_json::from_str(&read_input(input)?).context("parsing preview request")?;
    let colors = request
        .colors
        .clone()
        .unwrap_or_else(|| assign_colors(&request.fields, &config.palette));

    let html = render_preview(
        &PreviewInput {
            template: &request.template,
            form_data: &request.form_data,
            fields: &request.fields,
            active_field: request.active_field.as_deref(),
            colors: &colors,
        },
        config,
    );
    println!("{html}");
    Ok(())
}

fn submit(input: Option<&Path>) -> Result<()> {
    let request: SubmissionRequest =
        serde_json::from_str(&read_input(input)?).context("parsing submission request")?;

    for (key, issues) in validate_form(&request.form_data, &request.fields) {
        for issue in issues {
            warn!("{key}: {issue}");
        }
    }
    let payload = build_submission(&request.form_data, &request.fields);
    info!("submission has {} placeholders", payload.len());
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn detect(input: Option<&Path>) -> Result<()> {
    let placeholders: Vec<String> =
        serde_json::from_str(&read_input(input)?).context("parsing placeholder list")?;
    let groups = detect_mergeable_groups(&placeholders);
    info!("{} merge candidates", groups.len());
    println!("{}", serde_json::to_string_pretty(&groups)?);
    Ok(())
}

fn pattern(command: PatternCommand) -> Result<()> {
    match command {
        PatternCommand::Build {
            match_type,
            value,
            case_sensitive,
        } => {
            let state = PatternBuilderState::new(match_type.into(), value, case_sensitive);
            let regex = build(&state);
            validate_pattern(&regex).context("pattern is not ready to be stored")?;
            println!("{regex}");
        }
        PatternCommand::Parse { pattern } => match parse(&pattern) {
            Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
            None => warn!("empty pattern"),
        },
    }
    Ok(())
}
