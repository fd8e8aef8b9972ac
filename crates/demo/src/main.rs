// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relay-demo - walk through event channel behavior

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod sections;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use sections::Section;
use std::io::Write;

#[derive(Parser)]
#[command(
    name = "relay-demo",
    version,
    about = "Demonstrates multicast event channels"
)]
struct Cli {
    /// Sections to run, in order (default: all)
    #[arg(value_enum)]
    sections: Vec<Section>,

    /// Id given to the sample receiver objects
    #[arg(long, default_value_t = 5)]
    receiver_id: u32,
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let sections = if cli.sections.is_empty() {
        Section::value_variants().to_vec()
    } else {
        cli.sections
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for section in sections {
        tracing::debug!(?section, "running section");
        section.run(&mut out, cli.receiver_id)?;
    }
    out.flush()?;

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
