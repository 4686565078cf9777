#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flashcard_blocks_backend::run().await
}
