use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};

use clap::{Args, Parser, Subcommand};
use idcard::consts::EXPORT_FILE_NAME;
use idcard::doc::{CardDoc, DocError};
use idcard::svg::export_svg;
use idcard::template::{Template, TemplateKind};
use tracing::{Level, info};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error on {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Doc(#[from] DocError),
    #[error("invalid field `{0}`; expected key=value")]
    InvalidField(String),
    #[error("unknown template `{0}`; expected modern, classic or vertical")]
    UnknownTemplate(String),
}

#[derive(Parser, Debug)]
#[command(name = "idcard", about = "Create, merge and export ID card designs")]
struct Cli {
    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the sample design snapshot.
    New(NewArgs),
    /// Render a design snapshot to SVG.
    Export(ExportArgs),
    /// Fill `{{key}}` placeholders in a design, then render it to SVG.
    Merge(MergeArgs),
    /// List the card template presets as JSON.
    Templates,
}

#[derive(Args, Debug)]
struct NewArgs {
    #[arg(long, default_value = "modern")]
    template: String,

    #[arg(short, long, default_value = "-", help = "Output file path, or - for stdout")]
    output: String,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(default_value = "-", help = "Design snapshot path, or - for stdin")]
    input: String,

    #[arg(short, long, env = "IDCARD_OUTPUT", default_value = EXPORT_FILE_NAME, help = "Output file path, or - for stdout")]
    output: String,
}

#[derive(Args, Debug)]
struct MergeArgs {
    #[command(flatten)]
    export: ExportArgs,

    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();

    match cli.command {
        Command::New(args) => run_new(&args),
        Command::Export(args) => run_export(&args, &HashMap::new()),
        Command::Merge(args) => {
            let values = parse_fields(&args.fields)?;
            run_export(&args.export, &values)
        }
        Command::Templates => write_output("-", &templates_json()?),
    }
}

fn templates_json() -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(&Template::presets())?;
    json.push('\n');
    Ok(json)
}

fn run_new(args: &NewArgs) -> Result<(), CliError> {
    let kind = TemplateKind::from_name(&args.template).ok_or_else(|| CliError::UnknownTemplate(args.template.clone()))?;
    let doc = CardDoc { template: Template::preset(kind), ..CardDoc::default() };
    let json = serde_json::to_string_pretty(&doc)?;
    write_output(&args.output, &json)?;
    info!(template = ?kind, output = %args.output, "wrote design");
    Ok(())
}

fn run_export(args: &ExportArgs, values: &HashMap<String, String>) -> Result<(), CliError> {
    let raw = read_input(&args.input)?;
    let mut doc = CardDoc::from_json(&raw)?;
    if !values.is_empty() {
        doc = doc.merge_fields(values);
    }
    let svg = export_svg(&doc);
    write_output(&args.output, &svg)?;
    info!(
        input = %args.input,
        output = %args.output,
        texts = doc.texts.len(),
        shapes = doc.shapes.len(),
        bytes = svg.len(),
        "exported card"
    );
    Ok(())
}

fn parse_fields(raw: &[String]) -> Result<HashMap<String, String>, CliError> {
    raw.iter()
        .map(|field| {
            let (key, value) = field.split_once('=').ok_or_else(|| CliError::InvalidField(field.clone()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::InvalidField(field.clone()));
            }
            Ok((key.to_owned(), value.to_owned()))
        })
        .collect()
}

fn read_input(path: &str) -> Result<String, CliError> {
    let io_err = |source: io::Error| CliError::Io { path: path.to_owned(), source };
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(io_err)
}

fn write_output(path: &str, contents: &str) -> Result<(), CliError> {
    let io_err = |source: io::Error| CliError::Io { path: path.to_owned(), source };
    if path == "-" {
        let mut out = io::stdout().lock();
        out.write_all(contents.as_bytes()).map_err(io_err)?;
        return out.flush().map_err(io_err);
    }
    fs::write(path, contents).map_err(io_err)
}
