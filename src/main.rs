use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use gaffer_schema::diagnostics;
use gaffer_schema::render::{ReportOptions, render_schema_report};
use gaffer_schema::schema::{BuiltSchema, SchemaDocument};
use gaffer_schema::{Alert, Result};

#[derive(Parser)]
#[command(name = "gaffer-schema")]
#[command(about = "Validate and render graph store schemas", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a schema document and print the combined outcome.
    Validate {
        #[arg(long)]
        schema: String,
    },

    /// Check a schema document and write an HTML report.
    Report {
        #[arg(long)]
        schema: String,

        #[arg(short = 'o', long)]
        out: String,

        #[arg(long, default_value = "Graph schema")]
        title: String,

        #[arg(long)]
        docs_url: Option<String>,
    },

    /// Check a schema document and print its canonical form.
    Normalize {
        #[arg(long)]
        schema: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Validate { schema } => {
            let built = load(&schema)?;
            let alert = outcome(&schema, &built);
            println!("{}", alert);
            if alert.is_failure() {
                std::process::exit(1);
            }
        }
        Commands::Report {
            schema,
            out,
            title,
            docs_url,
        } => {
            let built = load(&schema)?;
            let alert = outcome(&schema, &built);
            let options = ReportOptions { title, docs_url };
            let html = render_schema_report(built.accumulator.schema(), &alert, &options);
            std::fs::write(&out, html)
                .with_context(|| diagnostics::error_message(format!("write report {}", out)))?;
            println!("Wrote {}", out);
        }
        Commands::Normalize { schema, out } => {
            let built = load(&schema)?;
            let alert = outcome(&schema, &built);
            if alert.is_failure() {
                bail!("{}", diagnostics::error_message(alert.message()));
            }
            let json = serde_json::to_string_pretty(&built.accumulator.serialize())?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json).with_context(|| {
                        diagnostics::error_message(format!("write schema {}", path))
                    })?;
                    println!("Wrote {}", path);
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Read, parse and replay a schema document.
fn load(path: &str) -> Result<BuiltSchema> {
    let text = std::fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read schema file {}", path)))?;
    let document = SchemaDocument::parse(&text)
        .with_context(|| diagnostics::error_message(format!("parse schema file {}", path)))?;
    Ok(document.build())
}

fn outcome(path: &str, built: &BuiltSchema) -> Alert {
    let schema = built.accumulator.schema();
    built.notifications.to_alert(format!(
        "{}: {} edge and {} entity groups are valid",
        path,
        schema.edges.len(),
        schema.entities.len()
    ))
}
