use anyhow::Context;
use employee_manager::{config::Config, Repository, Shell, StartupError};
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with the menu on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", StartupError::from(e));
            std::process::exit(1);
        }
    };

    let repo = match Repository::open(&config).await {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(repo).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

/// Run the interactive session, closing the connection however it ends.
async fn run(repo: Repository) -> anyhow::Result<()> {
    let mut shell = Shell::new(repo, BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    let session = shell.run().await;
    let (repo, _) = shell.into_parts();

    let closed = repo.close().await;
    session.context("terminal I/O failed")?;
    closed.context("failed to close database connection")?;
    Ok(())
}
