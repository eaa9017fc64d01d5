//! Terminal front-end for the bond screener and weather reports

mod render;

use anyhow::Context;
use bond_screener::interface::formatter::render_detail;
use bond_screener::{BondSource, MoexClient, ScreenerConfig, ScreeningProfile, Screener};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use weather_bot::{Command as WeatherCommand, OpenMeteoClient, WeatherBot, WeatherConfig};

#[derive(Parser, Debug)]
#[command(name = "bond-cli")]
#[command(about = "Reliable MOEX bonds and weather reports in the terminal", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ranked list of bonds
    Bonds {
        /// Number of bonds to show
        #[arg(short, long)]
        top: Option<usize>,

        /// Screening profile: domestic or simple
        #[arg(short, long)]
        profile: Option<ScreeningProfile>,
    },
    /// Print the detail card of a bond from the ranked list
    Detail {
        /// Exchange ticker, e.g. SU26219RMFS6
        secid: String,
    },
    /// Print a weather report
    Weather {
        #[arg(value_enum, default_value_t = WeatherKind::Current)]
        kind: WeatherKind,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum WeatherKind {
    Current,
    Forecast,
    Detailed,
}

impl From<WeatherKind> for WeatherCommand {
    fn from(kind: WeatherKind) -> Self {
        match kind {
            WeatherKind::Current => WeatherCommand::Current,
            WeatherKind::Forecast => WeatherCommand::Forecast,
            WeatherKind::Detailed => WeatherCommand::Detailed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bot_utils::load_dotenv();
    bot_utils::init_tracing_with_default("warn");

    let args = Args::parse();

    match args.command {
        Commands::Bonds { top, profile } => {
            let mut builder = ScreenerConfig::builder().with_env()?;
            if let Some(top) = top {
                builder = builder.top_n(top);
            }
            if let Some(profile) = profile {
                builder = builder.profile(profile);
            }
            let config = builder.build()?;
            info!("Screening with {} profile, top {}", config.profile, config.top_n);

            let client = MoexClient::new(&config)?;
            let records = client.fetch_all_bonds().await?;
            let ranked = Screener::from_config(&config).filter_and_rank(&records, config.top_n);

            if ranked.is_empty() {
                println!("Не найдено облигаций, соответствующих критериям.");
            } else {
                println!("{}", render::bonds_table(&ranked));
            }
        }
        Commands::Detail { secid } => {
            let config = ScreenerConfig::from_env()?;
            let client = MoexClient::new(&config)?;
            let records = client.fetch_all_bonds().await?;
            let ranked = Screener::from_config(&config).filter_and_rank(&records, config.top_n);

            let bond = ranked
                .iter()
                .find(|b| b.id().eq_ignore_ascii_case(&secid))
                .with_context(|| format!("{secid} is not in the top {} list", config.top_n))?;
            let detail = client.fetch_bond_detail(bond.id()).await?;

            println!("{}", render::strip_html(&render_detail(bond, &detail).text));
        }
        Commands::Weather { kind } => {
            let config = WeatherConfig::from_env()?;
            let place = config.place.clone();
            let bot = WeatherBot::new(OpenMeteoClient::new(config)?, place);

            let reply = bot.handle(kind.into()).await;
            println!("{}", render::strip_html(&reply.text));
        }
    }

    Ok(())
}
