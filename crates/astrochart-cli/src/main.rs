use astrochart::render::{HeadlessDocument, HeadlessError};
use astrochart::{ElementApi, MAX_INDENT_WIDTH, RenderConfig};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Chart(HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Chart(value)
    }
}

impl From<astrochart::Error> for CliError {
    fn from(value: astrochart::Error) -> Self {
        Self::Chart(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Default)]
enum Command {
    #[default]
    Render,
    Ids,
    Query(String),
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Jsx,
    Svg,
    Json,
    Native,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsx" | "component" => Ok(Self::Jsx),
            "svg" => Ok(Self::Svg),
            "json" => Ok(Self::Json),
            "native" => Ok(Self::Native),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    format: OutputFormat,
    indent: Option<usize>,
    keep_transform: bool,
    pretty: bool,
    config: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "astrochart-cli\n\
\n\
USAGE:\n\
  astrochart-cli [render] [--format jsx|svg|json|native] [--indent <0-16>] [--keep-transform] [--pretty] [--config <path>] [--out <path>] [<path>|-]\n\
  astrochart-cli ids [<path>|-]\n\
  astrochart-cli query <selector> [<path>|-]\n\
\n\
NOTES:\n\
  - Input is a raw chart tree as JSON. If <path> is omitted or '-', it is read from stdin.\n\
  - render prints component source (jsx) by default; use --out to write a file.\n\
  - --config points at a JSON render config ({\"component\":..,\"markup\":..,\"native\":..}).\n\
  - ids lists every registered element id, sorted.\n\
  - query accepts `#<id>` or `<tag>` and prints each match as raw JSON, one per line.\n\
  - Set RUST_LOG=debug for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "ids" => args.command = Command::Ids,
            "query" => {
                let Some(selector) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.command = Command::Query(selector.clone());
            }
            "--pretty" => args.pretty = true,
            "--keep-transform" => args.keep_transform = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--indent" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let width = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
                if width > MAX_INDENT_WIDTH {
                    return Err(CliError::Usage(usage()));
                }
                args.indent = Some(width);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(path.clone());
            }
            "-" => args.input = None,
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other => args.input = Some(other.to_string()),
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn to_json_text(value: &impl Serialize, pretty: bool) -> Result<String, CliError> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn build_config(args: &Args) -> Result<RenderConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => RenderConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => RenderConfig::default(),
    };
    if let Some(indent) = args.indent {
        config.component.indent_width = indent;
        config.markup.indent_width = indent;
    }
    if args.keep_transform {
        config.component.attributes =
            std::mem::take(&mut config.component.attributes).without_drop("transform");
        config.native.keep_transform = true;
    }
    if args.pretty {
        config.markup.pretty = true;
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let config = build_config(&args)?;
    let chart = HeadlessDocument::from_json(&text)?.with_config(config);
    tracing::debug!(ids = chart.document.registered_ids().len(), "loaded chart tree");

    match &args.command {
        Command::Render => {
            let out = match args.format {
                OutputFormat::Jsx => chart.render_component_source()?,
                OutputFormat::Svg => chart.render_svg()?,
                OutputFormat::Json => chart.render_json(args.pretty)?,
                OutputFormat::Native => {
                    // Unknown kinds are already logged as warnings; they also stay in the output.
                    to_json_text(&chart.render_native()?, args.pretty)?
                }
            };
            write_text(&out, args.out.as_deref())
        }
        Command::Ids => write_text(
            &chart.document.registered_ids().join("\n"),
            args.out.as_deref(),
        ),
        Command::Query(selector) => {
            let root = chart.root()?;
            let mut lines = Vec::new();
            for hit in root.query_selector_all(selector) {
                lines.push(to_json_text(hit.node(), args.pretty)?);
            }
            write_text(&lines.join("\n"), args.out.as_deref())
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
