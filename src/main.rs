use clap::Parser;
use tracing_subscriber::EnvFilter;
use variant_grid::{cli, config, error, interactive, replay, table};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use replay::ReplayOptions;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = match &cli.command {
        // 書き出し前なので既存ファイルは不要
        Commands::Config { init: true, .. } => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };

    match cli.command {
        Commands::Show { json } => {
            let session = config.session()?;
            if json {
                println!("{}", serde_json::to_string_pretty(session.grid())?);
            } else {
                print!("{}", table::render_grid(session.grid(), session.catalog()));
            }
        }

        Commands::Catalog { query } => {
            let catalog = config.catalog();
            print!("{}", table::render_catalog(&catalog.filter(&query)));
        }

        Commands::Replay { script, no_delay, json } => {
            let actions = replay::load_script(&script)?;
            let mut session = config.session()?;
            let options = ReplayOptions {
                busy_window: if no_delay { None } else { Some(config.busy_window()) },
                show_progress: !json,
            };

            let report = replay::run_script(&mut session, actions, &options).await;

            if json {
                println!("{}", serde_json::to_string_pretty(session.grid())?);
            } else {
                for (step, reason) in &report.rejected {
                    println!("✖ #{}: {}", step, reason);
                }
                for banner in &report.banners {
                    println!("⚠ {}", banner);
                }
                println!("{}\n", report.summary());
                print!("{}", table::render_session(&session));
            }
        }

        Commands::Edit => {
            let mut session = config.session()?;
            let options = ReplayOptions {
                busy_window: Some(config.busy_window()),
                show_progress: true,
            };
            interactive::run_interactive(&mut session, &options).await?;
        }

        Commands::Config { show, init } => {
            let config_path = match &cli.config {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };

            if init {
                Config::default().save(&config_path)?;
                println!("✔ 設定ファイルを書き出しました: {}", config_path.display());
            }

            if show || !init {
                println!("設定:");
                println!("  パス: {}{}", config_path.display(), if config_path.exists() { "" } else { " (未作成)" });
                println!("  ステート: {}", config.seed.states.join(", "));
                println!("  バリアント: {}", config.seed.variants.join(", "));
                println!("  カタログ: {}件", config.catalog().len());
                println!("  ビジー時間: {}ms", config.busy_window_ms);
            }
        }
    }

    Ok(())
}
