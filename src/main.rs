use clap::Parser;

mod cli;
mod commands;
mod domain;
mod logging;
mod services;
mod site;

pub use cli::*;
pub use commands::*;
pub use domain::models::*;
pub use services::card_filter::*;
pub use services::debounce::*;
pub use services::output::*;
pub use services::page::*;
pub use services::render::*;
pub use services::roles::*;
pub use services::search::*;
pub use services::settings::*;
pub use site::SiteError;

fn main() {
    let cli = Cli::parse();
    logging::init_subscriber(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    if let Err(e) = run(&cli) {
        let code = e
            .downcast_ref::<SiteError>()
            .map(SiteError::code)
            .unwrap_or("ERROR");
        tracing::debug!(code, error = ?e, "command failed");
        print_error(cli.json, code, &format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings()?.with_base_url(cli.base_url.as_deref());
    tracing::debug!(base_url = %settings.index.base_url, "settings loaded");

    if handle_session_command(cli, &settings)? {
        return Ok(());
    }
    handle_runtime_commands(cli, &settings)
}
