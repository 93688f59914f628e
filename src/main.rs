use clap::Parser;
use phone_specs::utils::{logger, validation::Validate};
use phone_specs::{CliArgs, ConfiguredLauncher, Scraper};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_logger(args.log_format, args.verbose)?;
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration could not be loaded: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let launcher = ConfiguredLauncher::from_config(&config);
    let scraper = Scraper::new(launcher, config);
    let outcome = scraper.scrape(&args.query_text()).await;

    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{}", json);

    if outcome.is_error() {
        std::process::exit(2);
    }
    Ok(())
}
