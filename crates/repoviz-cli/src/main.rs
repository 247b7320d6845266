use futures::executor::block_on;
use repoviz::{
    Connection, DirectoryPicker, Engine, EngineConfig, FileInfo, FixedDirectory, Focus, FsScanner,
    GraphView, JsonConnections, LayoutMode, Scanner,
};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Repoviz(repoviz::Error),
    Json(serde_json::Error),
    NoConnectionsForFocus(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Repoviz(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NoConnectionsForFocus(focus) => {
                write!(f, "No connections found for {focus}")
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<repoviz::Error> for CliError {
    fn from(value: repoviz::Error) -> Self {
        Self::Repoviz(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Graph,
    Tree,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    root: Option<String>,
    connections: Option<String>,
    focus: Option<String>,
    layout: Option<LayoutMode>,
    config: Option<String>,
    pretty: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "repoviz-cli\n\
\n\
USAGE:\n\
  repoviz-cli [graph] [--root <dir>] [--connections <path>|-] [--focus <path>] [--layout auto|tree|force] [--config <path>] [--pretty] [--out <path>]\n\
  repoviz-cli tree --root <dir> [--pretty] [--out <path>]\n\
\n\
NOTES:\n\
  - graph prints the positioned node/edge graph as JSON.\n\
  - With --root, the directory is scanned and --connections defaults to <dir>/connections.json;\n\
    a relative --connections path is resolved against <dir>.\n\
  - Without --root, connections are read from --connections, or from stdin if it is omitted or '-'.\n\
  - --focus narrows the graph to one file's neighborhood; a directory shows the full graph.\n\
  - Exit code 3 means the focused file has no connections (the empty view is still printed).\n\
  - Set RUST_LOG to see logs on stderr, REPOVIZ_LAYOUT_TIMING=1 for phase timings.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "graph" => args.command = Command::Graph,
            "tree" | "scan" => args.command = Command::Tree,
            "--pretty" => args.pretty = true,
            "--root" => {
                let Some(root) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.root = Some(root.clone());
            }
            "--connections" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.connections = Some(path.clone());
            }
            "--focus" => {
                let Some(focus) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !focus.trim().is_empty() {
                    args.focus = Some(focus.trim().to_string());
                }
            }
            "--layout" => {
                let Some(mode) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.layout = Some(
                    mode.parse::<LayoutMode>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn read_stdin() -> Result<String, CliError> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn read_connections(input: Option<&str>) -> Result<Vec<Connection>, CliError> {
    let text = match input {
        None | Some("-") => read_stdin()?,
        Some(path) => std::fs::read_to_string(path)?,
    };
    Ok(JsonConnections::parse(&text).map_err(repoviz::Error::from)?)
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    match out {
        None => std::io::stdout().lock().write_all(text.as_bytes())?,
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<EngineConfig, CliError> {
    match path {
        None => Ok(EngineConfig::default()),
        Some(path) => Ok(EngineConfig::from_json(&std::fs::read_to_string(path)?)?),
    }
}

fn scan(root: &Path) -> Result<FileInfo, CliError> {
    Ok(block_on(FsScanner::default().scan(root)).map_err(repoviz::Error::from)?)
}

fn build_view(
    engine: &Engine,
    connections: &[Connection],
    tree: Option<&FileInfo>,
    focus: Option<&str>,
) -> Result<GraphView, CliError> {
    let Some(focus) = focus else {
        return Ok(engine.overview(connections)?);
    };
    let entry = tree.and_then(|t| t.find(focus));
    let view = match entry {
        Some(entry) => engine.select(connections, entry)?,
        None => engine.build_view(connections, Some(&Focus::new(focus)))?,
    };
    Ok(view)
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(mode) = args.layout {
        config.layout = mode;
    }
    let engine = Engine::new().with_config(config);
    let picker = FixedDirectory(args.root.as_deref().map(Into::into));

    match args.command {
        Command::Tree => {
            let Some(root) = picker.select_directory() else {
                return Err(CliError::Usage(usage()));
            };
            let tree = scan(&root)?;
            write_json(&tree, args.pretty, args.out.as_deref())
        }
        Command::Graph => {
            let (tree, connections) = match picker.select_directory() {
                Some(root) if args.connections.as_deref() == Some("-") => {
                    let tree = scan(&root)?;
                    (Some(tree), read_connections(None)?)
                }
                Some(root) => {
                    let source = JsonConnections::new(
                        args.connections.as_deref().unwrap_or("connections.json"),
                    );
                    let loaded = block_on(engine.load(&FsScanner::default(), &source, &root))?;
                    (Some(loaded.tree), loaded.connections)
                }
                None => (None, read_connections(args.connections.as_deref())?),
            };
            tracing::info!(
                connections = connections.len(),
                focus = args.focus.as_deref().unwrap_or(""),
                "building graph"
            );

            let view = build_view(&engine, &connections, tree.as_ref(), args.focus.as_deref())?;
            write_json(&view, args.pretty, args.out.as_deref())?;
            match view {
                GraphView::NoConnectionsForFocus { focus } => {
                    Err(CliError::NoConnectionsForFocus(focus))
                }
                _ => Ok(()),
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err @ CliError::NoConnectionsForFocus(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
