mod api;
mod console;
mod directory;
mod error;
mod forms;
mod models;
#[cfg(test)]
mod testing;
mod views;

use crate::api::{DEFAULT_BASE_URL, HttpBankApi};
use crate::console::{Console, ConsoleConfig};
use crate::models::Credentials;
use dioxus::prelude::*;
use std::sync::Arc;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address of the banking backend
    #[arg(long, env = "BANK_CONSOLE_BASE_URL", default_value_t = String::from(DEFAULT_BASE_URL))]
    base_url: String,
    /// Administrator email used to open the session
    #[arg(long, env = "BANK_CONSOLE_EMAIL", default_value_t = String::from("admin@localhost.com"))]
    email: String,
    /// Administrator password used to open the session
    #[arg(long, env = "BANK_CONSOLE_PASSWORD", default_value_t = String::from("adminpassword"), hide_default_value = true)]
    password: String,
}

impl From<Args> for ConsoleConfig {
    fn from(args: Args) -> Self {
        ConsoleConfig {
            base_url: args.base_url,
            credentials: Credentials {
                email: args.email,
                password: args.password,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    env_logger::init();

    let config: ConsoleConfig = Args::parse().into();
    let api = HttpBankApi::new(&config.base_url)?;
    log::info!("Bank console talking to {}", api.base_url());

    let console = Console::new(Arc::new(api), config.credentials);

    dioxus::LaunchBuilder::new()
        .with_context(console)
        .launch(App);
    Ok(())
}

#[component]
fn App() -> Element {
    let console = use_context::<Console>();

    rsx! {
        views::Users { console }
    }
}
