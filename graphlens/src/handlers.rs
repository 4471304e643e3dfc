use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use graphlens_core::html::{HtmlOptions, render_html, save_html};
use graphlens_core::translate::translate;
use graphlens_gexf::{GexfError, read_gexf};
use graphlens_server::ServerConfig;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Expand a leading `~` so paths from the command line work as typed
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Everything `render` needs, resolved from the command line
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub label_attribute: String,
    pub title: String,
}

/// Read the GEXF file, translate it and write the HTML page.
///
/// Returns the absolute path of the written file. Nothing is written when the
/// input is missing or cannot be parsed.
pub fn render_visualization(options: &RenderOptions) -> anyhow::Result<PathBuf> {
    let graph = read_gexf(&options.input).map_err(|e| match e {
        GexfError::NotFound(path) => anyhow!("Error: GEXF file not found at {}", path.display()),
        other => anyhow!("Error reading GEXF file: {}", other),
    })?;
    debug!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let elements = translate(&graph, &options.label_attribute);
    let html_options = HtmlOptions {
        title: options.title.clone(),
        ..HtmlOptions::default()
    };
    let html = render_html(&elements, &html_options).context("Failed to serialize graph elements")?;

    save_html(&html, &options.output)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;
    info!("Wrote {} elements to {}", elements.len(), options.output.display());

    absolute_path(&options.output)
}

fn absolute_path(path: &Path) -> anyhow::Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve {}", path.display()))
}

pub fn handle_render(args: &ArgMatches, quiet: bool) {
    let options = RenderOptions {
        input: expand_path(args.get_one::<String>("GEXF_FILE").map_or("", String::as_str)),
        output: expand_path(args.get_one::<String>("output").map_or("", String::as_str)),
        label_attribute: args
            .get_one::<String>("label-attr")
            .cloned()
            .unwrap_or_default(),
        title: args.get_one::<String>("title").cloned().unwrap_or_default(),
    };

    if !quiet {
        println!(
            "{} Rendering {}",
            "→".blue(),
            options.input.display().to_string().bright_white()
        );
    }

    match render_visualization(&options) {
        Ok(saved) => {
            if quiet {
                println!("{}", saved.display());
            } else {
                println!(
                    "{} Visualization saved to {}",
                    "✓".green().bold(),
                    saved.display().to_string().bright_white()
                );
            }
        }
        // Reported, not fatal: the command still exits 0
        Err(e) => eprintln!("{} {:#}", "✗".red().bold(), e),
    }
}

pub async fn handle_serve(args: &ArgMatches, quiet: bool) {
    let defaults = ServerConfig::default();
    let config = ServerConfig {
        bind: args
            .get_one::<SocketAddr>("bind")
            .copied()
            .unwrap_or(defaults.bind),
        frontend_dir: args
            .get_one::<String>("frontend-dir")
            .map(|dir| expand_path(dir))
            .unwrap_or(defaults.frontend_dir),
        label_attribute: args
            .get_one::<String>("label-attr")
            .cloned()
            .unwrap_or(defaults.label_attribute),
    };

    if !quiet {
        println!(
            "{} Serving on {}",
            "→".blue(),
            format!("http://{}", config.bind).bright_white()
        );
        println!("  {} POST /graph_vis", "•".yellow());
        println!(
            "  {} /app from {}",
            "•".yellow(),
            config.frontend_dir.display()
        );
        println!();
    }

    if let Err(e) = graphlens_server::serve(config).await {
        eprintln!("{} {}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub fn print_banner() {
    println!(
        "{}",
        r#"
                         _     _
   __ _ _ __ __ _ _ __ | |__ | | ___ _ __  ___
  / _` | '__/ _` | '_ \| '_ \| |/ _ \ '_ \/ __|
 | (_| | | | (_| | |_) | | | | |  __/ | | \__ \
  \__, |_|  \__,_| .__/|_| |_|_|\___|_| |_|___/
  |___/          |_|
"#
        .bright_cyan()
        .bold()
    );
    println!(
        "  {} v{}\n",
        "GEXF to Cytoscape.js".bright_white(),
        env!("CARGO_PKG_VERSION")
    );
}
