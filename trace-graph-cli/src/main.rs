mod actions;
mod svg;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trace_graph::{InteractionController, TraceParser, VisualizerConfig};

use crate::actions::Action;

#[derive(Parser, Debug)]
#[command(name = "trace-graph")]
#[command(about = "Lay out nested execution traces as collapsible node-link diagrams")]
#[command(version)]
struct Cli {
    /// TOML file overriding layout and view defaults
    #[arg(long, global = true, env = "TRACE_GRAPH_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay interactions on a trace and write the resulting scene
    Render {
        /// Trace JSON file, or `-` for stdin
        #[arg(value_name = "TRACE")]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value = "svg")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Interaction step, repeatable: toggle:ID, select:ID, expand-all,
        /// collapse-all, zoom-in, zoom-out, reset-view, pan:DX,DY, click:X,Y,
        /// fullscreen
        #[arg(short, long = "action", value_name = "ACTION")]
        actions: Vec<Action>,

        /// Start with every node expanded
        #[arg(long)]
        expand_all: bool,
    },
    /// Print the parsed node tree
    Inspect {
        /// Trace JSON file, or `-` for stdin
        #[arg(value_name = "TRACE")]
        input: PathBuf,

        /// Print the trace pretty-printed instead of the outline
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    run(cli)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trace_graph=info,trace_graph_cli=info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Render {
            input,
            format,
            output,
            actions,
            expand_all,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let raw = read_input(&input)?;
            let rendered = render(&raw, config, &actions, expand_all, format)?;
            write_output(output.as_deref(), &rendered)
        }
        Command::Inspect { input, json } => {
            let raw = read_input(&input)?;
            let tree = TraceParser::parse_text(&raw);
            let text = if json {
                let mut pretty = tree.to_pretty_json();
                pretty.push('\n');
                pretty
            } else {
                tree.outline()
            };
            write_output(None, &text)
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<VisualizerConfig> {
    let config = match path {
        Some(path) => VisualizerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => VisualizerConfig::default(),
    };
    config
        .with_env_overrides()
        .context("invalid TRACE_GRAPH_* environment override")
}

fn render(
    raw: &str,
    config: VisualizerConfig,
    actions: &[Action],
    expand_all: bool,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let mut controller = InteractionController::new(TraceParser::read_value(raw), config);
    if expand_all {
        controller.expand_all();
    }
    for action in actions {
        for event in action.events() {
            let effect = controller.dispatch(event);
            tracing::debug!(%action, ?effect, "Applied action");
        }
    }

    let scene = controller.scene();
    info!(
        nodes = scene.nodes.len(),
        edges = scene.edges.len(),
        zoom = scene.transform.zoom,
        empty = scene.is_empty(),
        "Rendered trace"
    );
    match format {
        OutputFormat::Svg => Ok(svg::render_svg(&scene)),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&scene).context("failed to serialize scene")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read trace from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}
