use std::env;

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;

mod signature;

use crate::signature::{print_signature, verify_signature};

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Tools for working with OtomaX gateway transaction signatures")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "sign", about = "Compute the signature for a transaction")]
    Sign(SignParams),
    #[clap(name = "verify", about = "Check a signature against the member's pin and password")]
    Verify(VerifyParams),
}

#[derive(Debug, Args)]
pub struct TransactionParams {
    /// The member id
    #[arg(short = 'm', long = "memberid")]
    memberid: String,
    /// The product code
    #[arg(short = 'p', long = "product")]
    product: String,
    /// The destination, e.g. a phone number
    #[arg(short = 'd', long = "dest")]
    dest: String,
    /// The transaction id
    #[arg(short = 't', long = "trxid")]
    trxid: String,
    /// The member's pin. Falls back to OTO_PIN if omitted
    #[arg(long = "pin")]
    pin: Option<String>,
    /// The member's password. Falls back to OTO_PASSWORD if omitted
    #[arg(long = "password")]
    password: Option<String>,
}

#[derive(Debug, Args)]
pub struct SignParams {
    #[command(flatten)]
    transaction: TransactionParams,
    /// Print the result as a JSON object instead of a summary
    #[arg(long = "json")]
    json: bool,
}

#[derive(Debug, Args)]
pub struct VerifyParams {
    #[command(flatten)]
    transaction: TransactionParams,
    /// The signature to check
    #[arg(short = 's', long = "sign")]
    signature: String,
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn main() {
    dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let result = match cli.command {
        Command::Sign(params) => print_signature(params, env_var),
        Command::Verify(params) => verify_signature(params, env_var),
    };
    match result {
        Ok(true) => {},
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        },
    }
}
