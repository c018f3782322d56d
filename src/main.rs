use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = intake::cli::Cli::parse();
    if let Err(e) = intake::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
