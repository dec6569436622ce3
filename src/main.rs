use clap::Parser;
use github_core_app::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut stdout = tokio::io::stdout();
    github_core_app::run(args, &mut stdout).await
}
