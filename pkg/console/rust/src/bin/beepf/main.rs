// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

mod commands;

use anyhow::{Context, Result};
use beepf_console::config::{self, Overrides};
use beepf_console::views;
use beepf_console::{BeepfClient, ComponentUpload, MetricSeries, Page, router};
use beepf_log::LogConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

use commands::{ClusterFields, Console};

/// Exit status after Ctrl-C, as a shell reports SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "beepf", version)]
#[command(about = "Console for the BeePF eBPF program management platform", long_about = None)]
struct Cli {
    /// Configuration file (default: /etc/beepf/console.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the BeePF backend
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Log level: trace, debug, info, warn, error or off
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clusters eBPF programs are deployed to
    #[command(subcommand)]
    Clusters(ClusterCommand),

    /// Uploaded eBPF programs
    #[command(subcommand)]
    Components(ComponentCommand),

    /// Running instances of components
    #[command(subcommand)]
    Tasks(TaskCommand),

    /// Node and program observability data
    #[command(subcommand)]
    Observe(ObserveCommand),

    /// Print the navigation menu with the path of every page
    Routes,

    /// Show the page at a console path, such as /task/42
    Open { path: String },
}

#[derive(Subcommand, Debug)]
enum ClusterCommand {
    List,
    Create(ClusterArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ClusterArgs,
    },
}

#[derive(Args, Debug)]
struct ClusterArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    master_ip: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl From<ClusterArgs> for ClusterFields {
    fn from(args: ClusterArgs) -> Self {
        ClusterFields {
            name: args.name,
            master_ip: args.master_ip,
            description: args.description,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ComponentCommand {
    List,
    Show {
        id: i64,
    },
    /// Upload a compiled eBPF object as a new component
    Upload {
        file: PathBuf,
        /// Component name (default: the file name without extension)
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    List,
    /// Task detail with program status and metrics
    Show {
        id: i64,
    },
    /// Stop a running task
    Stop {
        id: i64,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Every metric point of a task
    Metrics {
        id: i64,
        #[arg(long, value_enum)]
        series: Option<SeriesArg>,
        /// Print normalized points as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ObserveCommand {
    NodeResources,
    NodeMetrics,
    Topology,
    Program { id: i64 },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SeriesArg {
    AvgRunTime,
    CpuUsage,
    EventsPerSecond,
    Period,
    TotalAvgRunTime,
}

impl From<SeriesArg> for MetricSeries {
    fn from(arg: SeriesArg) -> Self {
        match arg {
            SeriesArg::AvgRunTime => MetricSeries::AvgRunTime,
            SeriesArg::CpuUsage => MetricSeries::CpuUsage,
            SeriesArg::EventsPerSecond => MetricSeries::EventsPerSecond,
            SeriesArg::Period => MetricSeries::Period,
            SeriesArg::TotalAvgRunTime => MetricSeries::TotalAvgRunTime,
        }
    }
}

async fn run(console: &Console, command: Command) -> Result<ExitCode> {
    match command {
        Command::Clusters(ClusterCommand::List) => console.show(Page::ClusterList).await,
        Command::Clusters(ClusterCommand::Create(args)) => {
            console.create_cluster(args.into()).await
        }
        Command::Clusters(ClusterCommand::Edit { id, fields }) => {
            console.edit_cluster(id, fields.into()).await
        }
        Command::Components(ComponentCommand::List) => console.show(Page::ComponentList).await,
        Command::Components(ComponentCommand::Show { id }) => {
            console
                .show(Page::ComponentDetail { component_id: id })
                .await
        }
        Command::Components(ComponentCommand::Upload {
            file,
            name,
            description,
        }) => {
            console
                .upload_component(ComponentUpload {
                    file,
                    name,
                    description,
                })
                .await
        }
        Command::Tasks(TaskCommand::List) => console.show(Page::TaskList).await,
        Command::Tasks(TaskCommand::Show { id }) => {
            console.show(Page::TaskDetail { task_id: id }).await
        }
        Command::Tasks(TaskCommand::Stop { id, yes }) => console.stop_task(id, yes).await,
        Command::Tasks(TaskCommand::Metrics { id, series, json }) => {
            console.task_metrics(id, series.map(Into::into), json).await
        }
        Command::Observe(ObserveCommand::NodeResources) => {
            console.show(Page::NodeResources).await
        }
        Command::Observe(ObserveCommand::NodeMetrics) => console.show(Page::NodeMetrics).await,
        Command::Observe(ObserveCommand::Topology) => console.show(Page::Topology).await,
        Command::Observe(ObserveCommand::Program { id }) => {
            console
                .show(Page::ProgramDetail { program_id: id })
                .await
        }
        Command::Routes => show_routes(),
        Command::Open { path } => {
            let page = router::resolve(&path)?;
            debug!("{path} resolves to {page:?}");
            console.show(page).await
        }
    }
}

#[allow(clippy::print_stdout)]
fn show_routes() -> Result<ExitCode> {
    let mut out = String::new();
    views::render_menu(&mut out, router::MENU)?;
    print!("{out}");
    Ok(ExitCode::SUCCESS)
}

#[allow(clippy::print_stderr)]
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // The menu is static; no backend or config needed.
    if matches!(cli.command, Command::Routes) {
        return show_routes();
    }

    let config = config::load(&Overrides {
        config_path: cli.config,
        api_url: cli.api_url,
        log_level: cli.log_level,
    })?;
    beepf_log::init(LogConfig {
        level: config.log_level(),
        file: config.log_file.clone(),
    })
    .context("initializing logger")?;
    info!("using backend at {}", config.api_url);

    let client = BeepfClient::from_config(&config)?;
    let page = CancellationToken::new();
    let interrupt = page.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupted, cancelling outstanding requests");
            interrupt.cancel();
        }
    });

    let console = Console::new(client, page.clone());
    let result = tokio::select! {
        result = run(&console, cli.command) => result,
        () = page.cancelled() => Err(beepf_console::Error::Cancelled.into()),
    };

    match result {
        Ok(code) => Ok(code),
        Err(_) if page.is_cancelled() => {
            eprintln!("{} cancelled", "[ERROR]".red());
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
        Err(e) => {
            eprintln!("{} {e:#}", "[ERROR]".red());
            Ok(ExitCode::FAILURE)
        }
    }
}
