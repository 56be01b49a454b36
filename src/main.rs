use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = banking::args::parse();
    banking::cli::main(args).await
}
