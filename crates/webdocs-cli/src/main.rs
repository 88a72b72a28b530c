//! Primary entrypoint for the `webdocs` CLI binary.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    webdocs_cli::run().await
}
