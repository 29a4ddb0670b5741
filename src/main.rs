//! websage binary entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use websage::agent::{ChatAgent, SessionKey};
use websage::cli::{Cli, Commands};
use websage::config::AppConfig;
use websage::error::ChatError;

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "websage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), ChatError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Chat(args) => {
            args.apply(&mut config.settings);
            config.settings.validate()?;
            let agent = ChatAgent::from_config(&config)?;
            let key = match args.session {
                Some(ref raw) => raw.parse()?,
                None => SessionKey::generate(),
            };
            let sink = websage::cli::repl::stderr_progress();
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            websage::cli::repl::run(&agent, &key, stdin, &mut stdout, Some(&sink)).await
        }
        Commands::Serve(args) => {
            args.apply(&mut config.settings);
            config.settings.validate()?;
            let agent = ChatAgent::from_config(&config)?;
            websage::cli::server::serve(agent, &config.settings.bind).await
        }
    }
}
