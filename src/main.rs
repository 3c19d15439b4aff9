//! `jsxc`: transform a markup file into constructor-call text.

use anyhow::{Context, Result, bail};
use clap::Parser;
use jsx::debug::outline;
use jsx::traverse::collect_diagnostics;
use jsx::{RenderConfig, TransformConfig, render, transform_with_config};
use mimalloc::MiMalloc;
use std::io::Read;
use std::path::{Path, PathBuf};

mod logging;

use logging::{LoggingConfig, init_logging};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Transform XML-like markup with inline expressions into nested constructor calls
#[derive(Debug, Parser)]
#[command(name = "jsxc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Markup file to read, or `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Print an indented tree outline instead of call text
    #[arg(long)]
    outline: bool,

    /// Callee used for every constructor call
    #[arg(long, default_value = "React.createElement")]
    factory: String,

    /// First argument of fragment calls
    #[arg(long, default_value = "React.Fragment")]
    fragment: String,

    /// Maximum element nesting depth
    #[arg(long, default_value_t = jsx::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum scan steps for one input
    #[arg(long, default_value_t = jsx::DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Exit non-zero when the output contains diagnostics
    #[arg(long)]
    strict: bool,

    /// Log filter in `env_logger` syntax (overrides `RUST_LOG`)
    #[arg(long)]
    log: Option<String>,
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read markup from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    let source = read_input(&cli.input)?;
    let config = TransformConfig {
        max_depth: cli.max_depth,
        max_steps: cli.max_steps,
    };
    let (node, stats) = transform_with_config(&source, &config)
        .with_context(|| format!("failed to transform {}", cli.input.display()))?;
    log::info!(
        "elements={} expressions={} diagnostics={} steps={}",
        stats.elements,
        stats.expressions,
        stats.diagnostics,
        stats.steps
    );

    if cli.outline {
        for line in outline(&node, usize::MAX) {
            println!("{line}");
        }
    } else {
        let render_config = RenderConfig {
            factory: cli.factory,
            fragment: cli.fragment,
            ..RenderConfig::default()
        };
        println!("{}", render(&node, &render_config));
    }

    let diagnostics = collect_diagnostics(&node);
    for diag in &diagnostics {
        log::warn!("{} at {}..{}", diag.message(), diag.span.start, diag.span.end);
    }
    if cli.strict && !diagnostics.is_empty() {
        bail!("{} diagnostic(s) in {}", diagnostics.len(), cli.input.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}
