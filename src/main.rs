#[tokio::main]
async fn main() -> anyhow::Result<()> {
    plainbrief::core::logging::init();
    tracing::info!("plainbrief v{} starting", plainbrief::VERSION);

    plainbrief::cli::run().await
}
