//! joinwise CLI - classify columns and infer joins from a schema catalog
//!
//! Usage:
//!   joinwise classify <raw-type>...
//!   joinwise infer <schema.json> <table-a> <table-b> [--kind <kind>]
//!   joinwise build <schema.json> <table>... [--output json]
//!
//! Examples:
//!   joinwise classify Integer Datetime
//!   joinwise infer demos/shop.json orders customers
//!   joinwise build demos/shop.json customers orders products

use clap::{Parser, Subcommand, ValueEnum};
use joinwise::config::Settings;
use joinwise::model::{JoinKind, RawType};
use joinwise::schema::SchemaCatalog;
use joinwise::semantic::{
    classify, filter_type_for, granularity_options_for, JoinOutcome, QueryBuilder,
    RelationshipInferrer,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "joinwise")]
#[command(about = "joinwise - relationship inference and join graphs for query builders")]
#[command(version)]
struct Cli {
    /// Path to a joinwise.toml (defaults to the standard search path)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the type classes of raw column types
    Classify {
        /// Raw type names (e.g. Integer, Datetime)
        #[arg(required = true)]
        raw_types: Vec<String>,
    },

    /// Propose a join between two tables
    Infer {
        /// Path to the schema catalog (JSON)
        schema: PathBuf,

        /// Table already in the query
        table_a: String,

        /// Table being added
        table_b: String,

        /// Join kind for the proposal
        #[arg(short, long)]
        kind: Option<KindArg>,
    },

    /// Add tables in order and auto-join them
    Build {
        /// Path to the schema catalog (JSON)
        schema: PathBuf,

        /// Tables to add, main table first
        #[arg(required = true)]
        tables: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Inner,
    Left,
    Right,
    Full,
}

impl From<KindArg> for JoinKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Inner => JoinKind::Inner,
            KindArg::Left => JoinKind::Left,
            KindArg::Right => JoinKind::Right,
            KindArg::Full => JoinKind::Full,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Outcomes and final graph as JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Classify { raw_types } => cmd_classify(&raw_types),
        Commands::Infer {
            schema,
            table_a,
            table_b,
            kind,
        } => cmd_infer(&settings, schema, &table_a, &table_b, kind),
        Commands::Build {
            schema,
            tables,
            output,
        } => cmd_build(&settings, schema, &tables, output),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "joinwise=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, joinwise::config::SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn load_catalog(path: &PathBuf) -> Option<SchemaCatalog> {
    match SchemaCatalog::from_file(path) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            eprintln!("Error reading schema '{}': {}", path.display(), e);
            None
        }
    }
}

fn cmd_classify(raw_types: &[String]) -> ExitCode {
    for name in raw_types {
        let raw = RawType::parse(name);
        let classes = classify(&raw);
        let granularity: Vec<&str> = granularity_options_for(classes)
            .iter()
            .map(|g| g.as_str())
            .collect();

        println!("{}: {}", raw, classes);
        if raw.is_unknown() {
            println!("  (unrecognized type)");
            continue;
        }
        println!(
            "  measure={} dimension={} discrete={} continuous={}",
            classes.is_measure(),
            classes.is_dimension(),
            classes.is_discrete(),
            classes.is_continuous()
        );
        if let Some(filter) = filter_type_for(classes) {
            println!("  filter: {}", filter);
        }
        if !granularity.is_empty() {
            println!("  granularity: {}", granularity.join(", "));
        }
    }
    ExitCode::SUCCESS
}

fn cmd_infer(
    settings: &Settings,
    schema: PathBuf,
    table_a: &str,
    table_b: &str,
    kind: Option<KindArg>,
) -> ExitCode {
    let Some(catalog) = load_catalog(&schema) else {
        return ExitCode::FAILURE;
    };

    let (a, b) = match (catalog.table(table_a), catalog.table(table_b)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let inferrer = RelationshipInferrer::new(settings.inference_config());
    let kind = kind
        .map(JoinKind::from)
        .unwrap_or(inferrer.config().default_join_kind);

    match inferrer.infer_join_with_kind(&a, &b, kind) {
        Some(proposal) => {
            let rule = proposal.match_kind;
            println!("{} ({})", proposal.into_join(), rule);
            ExitCode::SUCCESS
        }
        None => {
            println!(
                "No relationship found between {} and {}",
                a.display_label(),
                b.display_label()
            );
            ExitCode::FAILURE
        }
    }
}

fn cmd_build(
    settings: &Settings,
    schema: PathBuf,
    tables: &[String],
    output: OutputFormat,
) -> ExitCode {
    let Some(catalog) = load_catalog(&schema) else {
        return ExitCode::FAILURE;
    };

    let mut builder = QueryBuilder::from_settings(settings);
    let mut outcomes = Vec::new();

    for id in tables {
        let table = match catalog.table(id) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        };
        match builder.add_table_and_auto_join(table) {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                eprintln!("Error adding '{}': {} [{:?}]", id, e, e.kind());
                return ExitCode::FAILURE;
            }
        }
    }

    match output {
        OutputFormat::Text => print_build_text(&builder, &outcomes),
        OutputFormat::Json => {
            let report = serde_json::json!({
                "outcomes": outcomes,
                "main_table": builder.graph().main_table_id(),
                "joins": builder.graph().list_joins(),
                "pending": builder
                    .graph()
                    .pending_tables()
                    .iter()
                    .map(|t| t.id.as_str())
                    .collect::<Vec<_>>(),
            });
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing output: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_build_text(builder: &QueryBuilder, outcomes: &[JoinOutcome]) {
    let graph = builder.graph();

    for outcome in outcomes {
        match outcome {
            JoinOutcome::MainTableSet { table } => println!("main table: {}", table),
            JoinOutcome::Joined { join, match_kind } => {
                println!("joined: {} ({})", join, match_kind)
            }
            JoinOutcome::NoRelationshipFound { table_a, table_b } => println!(
                "warning: unable to find a relationship between {} and {}",
                table_a, table_b
            ),
        }
    }

    let pending = graph.pending_tables();
    if !pending.is_empty() {
        let ids: Vec<&str> = pending.iter().map(|t| t.id.as_str()).collect();
        println!();
        println!("pending relationship: {}", ids.join(", "));
    }
}
