use clap::Parser;
use dotenv::dotenv;

use sow_insight::app::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    app::run(cli).await
}
