use clap::Parser;
use keyfold::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { all } => keyfold::cli::commands::list::execute(&cli, all),
        Commands::Get { ref path, copy } => keyfold::cli::commands::get::execute(&cli, path, copy),
        Commands::Add {
            ref path,
            ref value,
            tier,
            ref message,
        } => keyfold::cli::commands::add::execute(
            &cli,
            path,
            value.as_deref(),
            tier,
            message.as_deref(),
        ),
        Commands::Delete {
            ref path,
            force,
            ref message,
        } => keyfold::cli::commands::delete::execute(&cli, path, force, message.as_deref()),
        Commands::Generate { tier } => keyfold::cli::commands::generate::execute(tier),
        Commands::Keygen { ref path, size } => {
            keyfold::cli::commands::keygen::execute(&cli, path, size)
        }
        Commands::Completions { ref shell } => keyfold::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        keyfold::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
