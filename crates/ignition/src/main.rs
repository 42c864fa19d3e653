use std::path::PathBuf;

use async_trait::async_trait;
use clap::Parser;
use log::info;
use serde_json::{Value, json};

use ignition_core::application::error::Result;
use ignition_core::{AppOptions, Application, FileEnv, Kernel, ProcessEnv};
use telemetry::{TELEMETRY_NAMESPACE, Telemetry, TelemetryProvider};

/// Ignition: application bootstrap framework demo host
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Simple ping command for smoke testing
    #[arg(long)]
    ping: bool,

    /// Configuration fragments merged before the application runs
    #[arg(long = "config", value_name = "FILE")]
    config_files: Vec<PathBuf>,

    /// Optional KEY=value environment file
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

/// Kernel summarizing what the bootstrap sequence produced.
struct HostKernel;

#[async_trait]
impl Kernel for HostKernel {
    async fn run(&self, app: &Application) -> Result<Value> {
        let mode = app.env_handle().get_or("IGNITION_MODE", "dev");
        info!("kernel running in {mode} mode");

        let mut config_keys = app.configuration().keys();
        config_keys.sort();

        let telemetry = app
            .use_handle()
            .resolve_as::<Telemetry>(TELEMETRY_NAMESPACE)?;
        Ok(json!({
            "scope": app.scope_name(),
            "mode": mode,
            "config_keys": config_keys,
            "events_observed": telemetry.snapshot().len(),
        }))
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return;
    }

    let mut options = AppOptions::new()
        .with_provider("telemetry", TelemetryProvider)
        .with_environment("process", ProcessEnv::with_prefix("IGNITION_"))
        .with_kernel(HostKernel);
    if let Some(env_file) = &args.env_file {
        options = options.with_environment("file", FileEnv::new(env_file));
    }

    let app = Application::new(options);

    // Merge configuration fragments before the lifecycle runs
    for path in &args.config_files {
        if let Err(error) = app.configuration().merge_file(path) {
            eprintln!("Failed to load configuration: {error}");
            std::process::exit(1);
        }
    }

    match app.run(None).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(rendered) => println!("{rendered}"),
            Err(error) => {
                eprintln!("Failed to render kernel output: {error}");
                std::process::exit(1);
            }
        },
        Err(report) => {
            eprintln!("Application failed: {report}");
            std::process::exit(1);
        }
    }

    if let Err(error) = app.terminate().await {
        eprintln!("Termination failed: {error}");
        std::process::exit(1);
    }
}
