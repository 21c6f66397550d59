use std::env;

use crate::config::ServerConfig;

const HELP: &str = include_str!("./cli-help.txt");

/// The server takes no arguments. Any argument prints the help text and the configuration the server would run with,
/// then returns true so that `main` can exit.
pub fn handle_command_line_args() -> bool {
    if env::args().len() <= 1 {
        return false;
    }
    println!("\n{HELP}\n");
    print_config(&ServerConfig::from_env_or_default());
    true
}

fn print_config(config: &ServerConfig) {
    println!("Resolved configuration (secrets are masked):");
    for (name, value) in config.summary() {
        println!("  {name:<26} {value}");
    }
}
