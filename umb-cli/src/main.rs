//! Umbrella CLI - live glacial lake and flood risk for monitored districts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "umbrella",
    version,
    about = "Glacial lake outburst and live rainfall flood risk toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: umb_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    umb_cmd::run(cli.command).await
}
