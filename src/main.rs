use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newswire::app::AppContext;
use newswire::cli::{commands, Cli, Commands, PrefsAction};
use newswire::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = commands::Output {
        json: cli.json,
        limit: cli.limit,
    };

    if let Commands::Sources = cli.command {
        commands::sources(output)?;
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Top => {
            commands::top_stories(&ctx, output).await?;
        }
        Commands::Search(args) if args.is_unfiltered() => {
            if !output.json {
                println!("No search filters given; showing top stories\n");
            }
            commands::top_stories(&ctx, output).await?;
        }
        Commands::Search(args) => {
            commands::search(&ctx, &args.to_filters(), output).await?;
        }
        Commands::Sections => {
            commands::sections(&ctx, output).await?;
        }
        Commands::Sources => {
            commands::sources(output)?;
        }
        Commands::Feed => {
            commands::feed(&ctx, output).await?;
        }
        Commands::Prefs { action } => match action {
            PrefsAction::Show => commands::show_preferences(&ctx, output)?,
            PrefsAction::Set {
                categories,
                sources,
            } => commands::set_preferences(&ctx, categories, sources)?,
            PrefsAction::Clear => commands::clear_preferences(&ctx)?,
        },
    }

    Ok(())
}
