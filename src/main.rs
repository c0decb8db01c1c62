use clap::Parser;
use foldervault::cli::commands;
use foldervault::cli::{Cli, Commands};
use foldervault::vault::AssetKind;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Login => commands::login::execute(&cli),
        Commands::Passwd => commands::passwd::execute(&cli),
        Commands::Folder { ref action } => commands::folder::execute(&cli, action),
        Commands::Note { ref action } => commands::note::execute(&cli, action),
        Commands::Image { ref action } => commands::asset::execute(&cli, AssetKind::Image, action),
        Commands::Audio { ref action } => commands::asset::execute(&cli, AssetKind::Audio, action),
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { shell, ref out_dir } => {
            commands::completions::execute(shell, out_dir.as_deref())
        }
        Commands::Version => commands::version::execute(),
    };

    if let Err(e) = result {
        foldervault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
