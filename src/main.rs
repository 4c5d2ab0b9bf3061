#[tokio::main]
async fn main() -> anyhow::Result<()> {
    settler::cli::run().await
}
