use clap::Parser;

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = purecli::cli::Cli::parse();
    let exit_code = purecli::run(cli).await;
    std::process::exit(exit_code);
}
