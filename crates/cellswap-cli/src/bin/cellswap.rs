use clap::Parser;
use console::style;

use cellswap_cli::Cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if let Err(error) = cellswap_cli::run(Cli::parse()).await {
        println!("{} {}", style("error:").bold().red(), error);
        std::process::exit(1);
    }
}
