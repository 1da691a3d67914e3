//! Synapse terminal chat client.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use synapse_adapters::datasets::DatasetLoader;
use synapse_adapters::worker::{WorkerAdapter, WorkerConfig};
use synapse_chat::{AccessGate, ChatSession, render_fatal, render_message};
use synapse_config::SynapseConfig;
use synapse_primitives::Readiness;

#[derive(Debug, Parser)]
#[command(name = "synapse-chat", version, about = "AI experimental protocol generator")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the relay worker endpoint.
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = synapse_config::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    if !run_gate(&config, &mut input).await? {
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Loading essential data...".dimmed());
    let data = match load_equipment(&config).await {
        Readiness::Ready(data) => data,
        Readiness::Failed(message) => return Ok(fatal_exit(&message)),
        Readiness::NotReady => return Ok(fatal_exit("equipment data not loaded")),
    };

    let adapter = WorkerAdapter::new(
        WorkerConfig::new(&config.endpoint).with_timeout(config.request_timeout()),
    )?;
    let mut session = ChatSession::new(data, Arc::new(adapter));

    println!("{}", render_message(&ChatSession::greeting()));
    run_chat_loop(&mut session, &mut input).await?;

    Ok(ExitCode::SUCCESS)
}

/// Prompts for the passphrase until it matches or stdin closes.
///
/// Returns `false` when stdin closed before the gate was unlocked.
async fn run_gate(config: &SynapseConfig, input: &mut Lines<BufReader<Stdin>>) -> Result<bool> {
    let gate = AccessGate::new(config.passphrase.clone());

    loop {
        print!("Password: ");
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            return Ok(false);
        };
        if gate.unlock(&line) {
            return Ok(true);
        }
        println!("{}", "Incorrect password.".red());
    }
}

/// Reports a failed startup load. The interactive surface never opens; the
/// only way forward is to fix the dataset sources and start over.
fn fatal_exit(detail: &str) -> ExitCode {
    eprintln!(
        "{}",
        render_fatal(&format!(
            "Critical: could not load required equipment data ({detail}). \
             Check the dataset sources and restart."
        ))
    );
    ExitCode::FAILURE
}

async fn load_equipment(config: &SynapseConfig) -> Readiness {
    let loader = DatasetLoader::new();
    match loader
        .load(&config.internal_source(), &config.external_source())
        .await
    {
        Ok(data) => Readiness::Ready(data),
        Err(err) => Readiness::Failed(err.to_string()),
    }
}

/// Reads experiment descriptions until stdin closes or the user quits.
/// One request is outstanding at a time; the prompt only reappears after
/// the previous turn finished.
async fn run_chat_loop(
    session: &mut ChatSession,
    input: &mut Lines<BufReader<Stdin>>,
) -> Result<()> {
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            return Ok(());
        };
        let description = line.trim();
        if description.is_empty() {
            continue;
        }
        if description == "/quit" || description == "/exit" {
            return Ok(());
        }

        println!("{}", "Generating protocol...".dimmed());
        for entry in session.submit(description).await {
            println!("{}", render_message(entry));
        }
    }
}
