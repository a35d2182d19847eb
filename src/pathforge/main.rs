use clap::Parser;
use directories::ProjectDirs;
use pathforge::api::PathforgeApi;
use pathforge::error::{PathforgeError, Result};
use pathforge::model::TrainingContext;
use pathforge::store::fs::FileSession;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;

use args::{Cli, Commands};
use cli::print;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = resolve_data_dir(&cli)?;
    let store = FileSession::new(data_dir);
    let mut api = PathforgeApi::open(store)?;

    match cli.command {
        Some(Commands::Import { file }) => {
            let json = std::fs::read_to_string(&file).map_err(PathforgeError::Io)?;
            let result = api.import_pathway_json(&json)?;
            print::print_result(&result);
        }
        Some(Commands::Ingest { files, fallback }) => {
            let mut contents = Vec::with_capacity(files.len());
            for path in files {
                let text = std::fs::read_to_string(&path).map_err(PathforgeError::Io)?;
                contents.push((file_name(&path), text));
            }
            let result = api.ingest_files(&contents, fallback)?;
            print::print_result(&result);
        }
        Some(Commands::Apply { instruction }) => {
            let result = api.instruct(&instruction)?;
            print::print_result(&result);
        }
        Some(Commands::Search { term }) => {
            let result = api.search(&term.join(" "))?;
            print::print_result(&result);
        }
        Some(Commands::List) | None => {
            let result = api.list_references()?;
            print::print_result(&result);
        }
        Some(Commands::Context {
            training_type,
            audience,
            industry,
            goals,
        }) => {
            let mut context = api.session().context.clone();
            apply_context_overrides(&mut context, training_type, audience, industry, goals);
            api.set_context(context)?;
            println!("Training context updated.");
        }
        Some(Commands::ClearPending) => {
            let dropped = api.clear_pending()?;
            println!("Dropped {} pending module(s).", dropped);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pathforge=debug" } else { "pathforge=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    let proj_dirs = ProjectDirs::from("com", "pathforge", "pathforge")
        .ok_or_else(|| PathforgeError::Store("Could not determine data dir".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn apply_context_overrides(
    context: &mut TrainingContext,
    training_type: Option<String>,
    audience: Option<String>,
    industry: Option<String>,
    goals: Option<String>,
) {
    if let Some(value) = training_type {
        context.training_type = value;
    }
    if let Some(value) = audience {
        context.target_audience = value;
    }
    if let Some(value) = industry {
        context.industry = value;
    }
    if let Some(value) = goals {
        context.primary_goals = value;
    }
}
