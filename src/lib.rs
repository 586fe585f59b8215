pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;

use api::client::DeltaApi;
use auth::session::Session;
use cli::output::print_error;
use config::{OutputMode, RuntimeConfig};
use error::AppError;

pub async fn run(cli_args: cli::Cli) -> i32 {
    let config = RuntimeConfig {
        output_mode: if cli_args.table {
            OutputMode::Table
        } else {
            OutputMode::Json
        },
        verbose: cli_args.verbose,
    };

    let result = dispatch(&cli_args, &config).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err);
            1
        }
    }
}

async fn dispatch(cli_args: &cli::Cli, config: &RuntimeConfig) -> Result<(), AppError> {
    let api = DeltaApi::new(config.verbose)?;
    let mut session = Session::new(
        cli_args.client_secret.clone(),
        cli_args.username.clone(),
        cli_args.password.clone(),
    );

    match &cli_args.command {
        cli::Commands::GetDevices => cli::devices::handle_list(&api, &mut session, config).await,
        cli::Commands::GetInfo { device } => {
            cli::devices::handle_info(&api, &mut session, device).await
        }
        cli::Commands::GetData { device } => {
            cli::devices::handle_data(&api, &mut session, device).await
        }
        cli::Commands::SetState {
            device,
            state,
            argument,
        } => cli::state::handle(&api, &mut session, device, state, argument).await,
        cli::Commands::Test => cli::test::handle(&api).await,
    }
}
