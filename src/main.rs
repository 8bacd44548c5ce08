use clap::Parser;
use passvault::cli::commands::edit::EditRequest;
use passvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref platform,
            ref login,
            ref password,
            generate,
        } => passvault::cli::commands::add::execute(
            &cli,
            platform,
            login,
            password.as_deref(),
            generate,
        ),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Show { index, copy } => passvault::cli::commands::show::execute(&cli, index, copy),
        Commands::Edit {
            index,
            ref platform,
            ref login,
            password,
            generate,
        } => passvault::cli::commands::edit::execute(
            &cli,
            index,
            &EditRequest {
                platform: platform.as_deref(),
                login: login.as_deref(),
                password,
                generate,
            },
        ),
        Commands::Delete { index, force } => {
            passvault::cli::commands::delete::execute(&cli, index, force)
        }
        Commands::Generate { length } => passvault::cli::commands::generate::execute(&cli, length),
        Commands::Export {
            ref format,
            ref output,
        } => passvault::cli::commands::export::execute(&cli, format, output.as_deref()),
        Commands::Audit { last, ref since } => {
            passvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
