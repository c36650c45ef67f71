use clap::Parser;
use prune::{run_prune, PruneOptions};

/// Delete registry tags that are not protected by the keep pattern.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Registry domain, scheme optional (https assumed when absent)
    #[arg(long)]
    domain: String,

    /// Username for HTTP Basic auth
    #[arg(long)]
    user: String,

    /// Password for HTTP Basic auth
    #[arg(long, env = "REGISTRY_PASSWORD", hide_env_values = true)]
    password: String,

    /// The image whose tags should be reconciled
    #[arg(long)]
    image: String,

    /// Tags matching this pattern, and tags sharing their content, are kept
    #[arg(long)]
    regex: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        tracing::error!(error = %error, "prune failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> prune::Result<()> {
    let options = PruneOptions::new(
        &cli.domain,
        &cli.user,
        &cli.password,
        &cli.image,
        &cli.regex,
    )?;
    run_prune(options).await?;
    Ok(())
}
