pub mod devices;
pub mod output;
pub mod state;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "purecli",
    version,
    about = "Control Electrolux Pure air purifiers through the Delta cloud API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Your client secret
    #[arg(short = 'c', long = "client_secret")]
    pub client_secret: String,

    /// Your username
    #[arg(short = 'u', long)]
    pub username: String,

    /// Your password
    #[arg(short = 'p', long)]
    pub password: String,

    /// Increase trace verbosity (repeatable; shows HTTP requests/responses)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output as human-readable table instead of JSON
    #[arg(short = 't', long = "table", global = true)]
    pub table: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all devices
    #[command(name = "get_devices")]
    GetDevices,

    /// List device information
    #[command(name = "get_info")]
    GetInfo {
        /// The device to target
        #[arg(short = 'd', long)]
        device: String,
    },

    /// List device sensor data
    #[command(name = "get_data")]
    GetData {
        /// The device to target
        #[arg(short = 'd', long)]
        device: String,
    },

    /// Set desired device state
    #[command(name = "set_state")]
    SetState {
        /// The device to target
        #[arg(short = 'd', long)]
        device: String,

        /// The state to change
        #[arg(short = 's', long)]
        state: String,

        /// The new state value
        #[arg(short = 'a', long)]
        argument: String,
    },

    /// Test the API connection
    Test,
}
