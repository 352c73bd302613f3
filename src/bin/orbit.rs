use clap::Parser;
use orbit::logging::init_logging;
use orbit::tooling::cli::{Cli, CliContext};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.logging_options()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let context = match CliContext::new(cli.config.clone()) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match context.execute(&cli.command).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
