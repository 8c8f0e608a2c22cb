use clap::{Parser, Subcommand};
use log::{debug, info};
use stacks_indexer::{
    cli::server::{ConfigArgs, ServerArgs},
    constants::VERSION,
    server::{Indexer, IndexerConfiguration},
    web::start_web_server,
};
use std::{sync::Arc, time::Duration};
use stderrlog::{ColorChoice, Timestamp};
use tokio_graceful_shutdown::{SubsystemBuilder, SubsystemHandle, Toplevel};

#[derive(Parser, Debug)]
#[command(name = "stacks-indexer", author, version = VERSION, about, long_about = Some("Stacks Indexer\n\n\
Cache Stacks account transactions and tally the SIP-015 vote"))]
struct Cli {
    #[command(subcommand)]
    command: IndexerCommand,
}

#[derive(Subcommand, Debug)]
enum IndexerCommand {
    /// Server commands
    Server {
        #[command(subcommand)]
        server_command: ServerCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ServerCommand {
    /// Start the indexer by passing arguments on the command line
    Start(ServerArgs),
    /// Start the indexer via a config file
    StartViaConfig(ConfigArgs),
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    Toplevel::new(|s| async move {
        s.start(SubsystemBuilder::new("Main", |s| async move {
            match args.command {
                IndexerCommand::Server { server_command } => server_command.run(s).await,
            }
        }));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(1000))
    .await
    .map_err(Into::into)
}

impl ServerCommand {
    async fn run(self, subsys: SubsystemHandle) -> anyhow::Result<()> {
        let args = match self {
            Self::Start(args) => args,
            Self::StartViaConfig(args) => args.read()?,
        };

        // initialize logging
        stderrlog::new()
            .module("stacks_indexer")
            .module(module_path!())
            .color(ColorChoice::Never)
            .timestamp(Timestamp::Microsecond)
            .verbosity(args.log_level.0)
            .init()?;

        debug!("Building an indexer configuration");
        let config = IndexerConfiguration::try_from(args)?;
        let indexer = Arc::new(Indexer::from_config(&config)?);

        let web_hostname = config.web_hostname.clone();
        let web_port = config.web_port;
        info!("Starting the web server listening on {web_hostname}:{web_port}");

        subsys.start(SubsystemBuilder::new("Web Server", move |s| {
            start_web_server(s, indexer, (web_hostname, web_port))
        }));
        Ok(())
    }
}
