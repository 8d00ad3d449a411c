use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    shelf_server::run().await
}
