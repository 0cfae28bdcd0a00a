use seedlock::{Result, TARGET};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = seedlock::cli::seedlock::run().await {
        if !e.is_interrupted() {
            tracing::error!(target: TARGET, "{}", e);
        }
        std::process::exit(1);
    }
    Ok(())
}
