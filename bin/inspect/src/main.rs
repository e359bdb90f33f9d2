// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Lists the tables and columns of a bulk table file and counts their rows.

mod report;

use std::{
	fs::File,
	io::{self, Write},
	path::PathBuf,
};

use anyhow::{Context, Result};
use bulktable_format::{ReaderConfig, TableFileReader};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::report::{inspect, render};

#[derive(Parser)]
#[command(name = "bulktable-inspect", version, about = "Inspect a bulk table file")]
struct Cli {
	/// Table file, plain or gzip-compressed. `-` reads standard input.
	path: PathBuf,

	/// Print the report as JSON
	#[arg(long)]
	json: bool,

	/// Decode and print up to this many rows per table
	#[arg(long, value_name = "N", default_value_t = 0)]
	rows: usize,

	/// Enable debug logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	let filter = if cli.verbose {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
	};
	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
		.init();

	let config = ReaderConfig::default();
	let reports = if cli.path.as_os_str() == "-" {
		let mut reader = TableFileReader::open_forward(io::stdin().lock(), &config).context("reading standard input")?;
		inspect(&mut reader, cli.rows).context("reading standard input")?
	} else {
		let file = File::open(&cli.path).with_context(|| format!("opening {}", cli.path.display()))?;
		let mut reader =
			TableFileReader::open(file, &config).with_context(|| format!("reading {}", cli.path.display()))?;
		inspect(&mut reader, cli.rows).with_context(|| format!("reading {}", cli.path.display()))?
	};

	let mut out = io::stdout().lock();
	if cli.json {
		serde_json::to_writer_pretty(&mut out, &reports)?;
		writeln!(out)?;
	} else {
		render(&reports, &mut out)?;
	}
	Ok(())
}
