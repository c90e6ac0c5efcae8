//! slidelines binary
//!
//! Inserts a page of ruled lines after every page of a PDF.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use slidelines_core::{
    interleave_ruled_pages, load_document, save_document, LayoutParams, SlidelinesError,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            exit_code(&err)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let params = LayoutParams::new(
        args.num_lines,
        args.horizontal_margin,
        args.vertical_margin,
        args.thickness,
    )?;
    let output_path = args.output_path();

    let input = load_document(&args.filename)
        .with_context(|| format!("reading {}", args.filename.display()))?;
    let mut output = interleave_ruled_pages(&input, &params, args.sizing())
        .with_context(|| format!("adding lines to {}", args.filename.display()))?;
    save_document(&mut output, &output_path)
        .with_context(|| format!("writing {}", output_path.display()))?;

    tracing::info!(
        input = %args.filename.display(),
        output = %output_path.display(),
        "done"
    );
    Ok(())
}

/// 2 for bad parameters, 1 for everything else
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<SlidelinesError>() {
        Some(SlidelinesError::InvalidParameter(_)) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
