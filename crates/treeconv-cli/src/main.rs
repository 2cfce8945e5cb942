use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use treeconv::{extract, json_to_value, value_to_json, value_to_xml_str, xml_str_to_value, Value};

#[derive(Debug, Parser)]
#[command(name = "treeconv", version, about = "Convert between JSON and XML, extract key paths")]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Input format (inferred from the file extension when omitted)
    #[arg(short, long, value_enum)]
    from: Option<FormatArg>,
    /// Output format
    #[arg(short, long, value_enum)]
    to: FormatArg,
    /// Dot-separated key path to extract before writing output
    #[arg(short, long, value_name = "PATH")]
    get: Option<String>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Xml,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();

    let input_data = read_input(&args.input)?;
    let from = match args.from.or_else(|| infer_format(&args.input)) {
        Some(format) => format,
        None => {
            bail!("could not infer input format; pass --from or provide an input file with extension")
        }
    };
    debug!(?from, to = ?args.to, "parsed arguments");

    let mut value = parse(&input_data, from)?;

    if let Some(path) = &args.get {
        let keys: Vec<&str> = path.split('.').filter(|k| !k.is_empty()).collect();
        value = match extract(&value, &keys) {
            Some(found) => found,
            None => bail!("no value at path {path:?}"),
        };
    }

    let rendered = render(&value, args.to)?;
    write_output(&args.output, rendered.as_bytes())
}

fn parse(input: &str, format: FormatArg) -> Result<Value> {
    let value = match format {
        FormatArg::Json => json_to_value(input),
        FormatArg::Xml => xml_str_to_value(input),
    };
    value.with_context(|| format!("failed to parse {format:?} input"))
}

fn render(value: &Value, format: FormatArg) -> Result<String> {
    let rendered = match format {
        FormatArg::Json => value_to_json(value),
        FormatArg::Xml => value_to_xml_str(value, &treeconv::Config::default()),
    };
    rendered.with_context(|| format!("failed to render {format:?} output"))
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            stdout.write_all(b"\n").context("failed to write stdout")?;
            Ok(())
        }
    }
}

fn infer_format(path: &Option<PathBuf>) -> Option<FormatArg> {
    let ext = path.as_ref()?.extension()?.to_str()?;
    match ext {
        "json" => Some(FormatArg::Json),
        "xml" => Some(FormatArg::Xml),
        _ => None,
    }
}
