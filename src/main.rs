use clap::Parser;
use log::{error, info};
use memories::configuration::config::Config;
use memories::controller::command::Command;
use memories::controller::controller_handler::Controller;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "memories")]
#[command(version = "0.1.0")]
#[command(about = "A shared photo album of the moments we keep")]
struct Args {
    /// TOML configuration file; when given, the remaining flags are ignored
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    settings: Config,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() {
    // https://docs.rs/env_logger/latest/env_logger/
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Serve);

    if command == Command::Serve {
        println!(
            "
==============================================================
         Our Memories: a shared photo album v0.1.0
==============================================================
"
        );
    }

    let config = match args.config {
        Some(path) => {
            info!("Importing configuration from {}", path.display());
            Config::from_file(&path)
        }
        None => args.settings.validate().map(|_| args.settings),
    };
    let config = config.unwrap_or_else(|e| {
        error!("Unable to import configuration: {}", e);
        std::process::exit(1);
    });

    // storage backends may block, keep them off the async workers
    let controller = tokio::task::spawn_blocking(move || Controller::new(config))
        .await
        .unwrap_or_else(|e| {
            error!("Controller setup panicked: {}", e);
            std::process::exit(1);
        })
        .unwrap_or_else(|e| {
            error!("Unable to create a controller instance: {}, exiting...", e);
            std::process::exit(1);
        });

    let result = match command {
        Command::Serve => {
            let result = controller.serve().await;
            let _ = tokio::task::spawn_blocking(move || drop(controller)).await;
            result
        }
        command => tokio::task::spawn_blocking(move || {
            controller.execute(command).map(|out| println!("{}", out))
        })
        .await
        .unwrap_or_else(|e| {
            error!("Command panicked: {}", e);
            std::process::exit(1);
        }),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
