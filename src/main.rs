use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use globobudget::core::budget::{Budget, Category};
use globobudget::core::log::{init_logging, level_for};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the HTTP API (default)
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show exchange rates for a base currency
    Rates {
        /// Base currency code
        #[arg(short, long, default_value = "USD")]
        base: String,
    },
    /// Convert a trip budget into another currency
    Convert(ConvertArgs),
    /// List supported countries and currencies
    Countries,
}

#[derive(Args)]
struct ConvertArgs {
    /// Currency to convert into
    #[arg(short, long)]
    to: String,
    /// Currency the budget is in
    #[arg(short, long, default_value = "USD")]
    from: String,
    #[arg(long)]
    food: Option<f64>,
    #[arg(long)]
    activities: Option<f64>,
    #[arg(long)]
    shopping: Option<f64>,
    #[arg(long)]
    hotel: Option<f64>,
    #[arg(long)]
    transportation: Option<f64>,
}

impl ConvertArgs {
    fn budget(&self) -> Budget {
        let mut budget = Budget::new(Some(self.from.as_str()));
        let amounts = [
            (Category::Food, self.food),
            (Category::Activities, self.activities),
            (Category::Shopping, self.shopping),
            (Category::Hotel, self.hotel),
            (Category::Transportation, self.transportation),
        ];
        for (category, amount) in amounts {
            if let Some(amount) = amount {
                budget.set(category, amount);
            }
        }
        budget
    }
}

impl From<Commands> for globobudget::AppCommand {
    fn from(cmd: Commands) -> globobudget::AppCommand {
        match cmd {
            Commands::Serve { host, port } => globobudget::AppCommand::Serve { host, port },
            Commands::Rates { base } => globobudget::AppCommand::Rates { base },
            Commands::Convert(args) => globobudget::AppCommand::Convert {
                budget: args.budget(),
                target: args.to,
            },
            Commands::Countries => globobudget::AppCommand::Countries,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });
    let default_level = match command {
        Commands::Serve { .. } => LevelFilter::INFO,
        _ => LevelFilter::OFF,
    };
    init_logging(level_for(cli.verbose, default_level));

    let result = match command {
        Commands::Setup => globobudget::cli::setup::setup(),
        cmd => globobudget::run_command(cmd.into(), cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
