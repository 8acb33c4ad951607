use std::{io::Read, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use portal_solutions_featscan::{Analyzer, AnalyzerOpts, catalogue};
use tracing_subscriber::EnvFilter;

/// Report the JavaScript features a file uses and the browsers that run it.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Source file to analyze; reads stdin when omitted.
    file: Option<PathBuf>,
    /// Lines of context kept around each match.
    #[arg(long, default_value_t = AnalyzerOpts::default().context_lines)]
    context_lines: usize,
    /// Accept JSX syntax.
    #[arg(long)]
    jsx: bool,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
    /// Print the feature catalogue instead of analyzing anything.
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let out = if args.list {
        to_json(&catalogue::all(), args.pretty)?
    } else {
        let src = match &args.file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut src = String::new();
                std::io::stdin()
                    .read_to_string(&mut src)
                    .context("reading stdin")?;
                src
            }
        };
        let mut opts = AnalyzerOpts::default();
        opts.context_lines = args.context_lines;
        opts.jsx = args.jsx;
        let result = Analyzer::new(opts).analyze(&src)?;
        to_json(&result, args.pretty)?
    };
    println!("{out}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
