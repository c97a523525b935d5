//! # lextract
//!
//! The `lextract` binary is a thin entrypoint. Argument parsing lives in
//! `lextract_cli::Cli` and the pipeline in `lextract_cli::run`.

use anyhow::Result;
use clap::Parser;
use lextract_cli::{run, Cli};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries the result paths.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lextract=info".parse()?))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(run(cli)) {
        Ok(artifacts) => {
            println!("Extraction complete.");
            println!("JSONL: {}", artifacts.jsonl_path.display());
            println!("HTML: {}", artifacts.html_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("[lextract error] {e:?}");
            std::process::exit(1);
        }
    }
}
