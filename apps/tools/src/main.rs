use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::{
    load_settings, load_settings_from, LoggingOpener, MenuContext, MenuEngine, OutlineToolkit,
};
use tracing_subscriber::EnvFilter;
use url::Url;

mod registry_file;

use registry_file::RegistryFile;

#[derive(Parser, Debug)]
#[command(
    name = "menu-tools",
    about = "Build and exercise the application menu from a command registry"
)]
struct Cli {
    /// TOML file listing `[[commands]]`.
    #[arg(long)]
    registry: PathBuf,
    /// Engine settings; defaults to `engine.toml` in the working directory.
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(long, default_value = "Project")]
    context_label: String,
    #[arg(long, default_value = "https://localhost/")]
    site_url: Url,
    /// Filesystem location of the context; repeatable.
    #[arg(long = "fs-location")]
    fs_locations: Vec<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the menu as an outline, or as JSON.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Fire the action reached through the given menu titles, one argument
    /// per level, e.g. `Loader "Publish..."`.
    Activate {
        #[arg(required = true)]
        path: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    let registry = RegistryFile::load(&cli.registry)?.into_registry()?;
    let context = MenuContext::new(cli.context_label, cli.site_url)
        .with_filesystem_locations(cli.fs_locations);

    let engine = MenuEngine::new(registry, context, settings, LoggingOpener::new());

    match cli.command {
        Command::Show { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(engine.menu()).context("failed to encode menu")?
                );
            } else {
                let mut outline = OutlineToolkit::new();
                engine.render(&mut outline);
                print!("{outline}");
            }
        }
        Command::Activate { path } => {
            let segments: Vec<&str> = path.iter().map(String::as_str).collect();
            engine.activate_path(&segments)?;
            for url in engine.opener().opened() {
                println!("would open {url}");
            }
        }
    }

    Ok(())
}
