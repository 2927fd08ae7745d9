use clap::Parser;
use fxlayout_migrator::{handle_pipe_command, rewrite, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Commands::Rewrite(args) if args.verbose);
    init_logging(verbose);

    match cli.command {
        Commands::Rewrite(args) => {
            match rewrite(args).await {
                Ok(result) => {
                    println!("Migration successful!");
                    println!("  - Processed {} files", result.total_files_processed);
                    println!("  - Rewrote {} directives", result.total_directives_rewritten);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Pipe(args) => {
            handle_pipe_command(args).await?;
            Ok(())
        }
    }
}

/// Log to stderr so stdout stays clean for pipe mode; RUST_LOG overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
