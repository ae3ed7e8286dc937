use clap::Parser;
use console::style;
use content_studio::cli::{Cli, Cmd};
use content_studio::commands::{self, Session};
use content_studio::core::storage::AppCtx;
use content_studio::ui::print_notifications;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("{} {}", style("•").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let ctx = AppCtx::init()?;
    let session = Session::open(ctx)?;
    let mut notifications = session.studio.notifier().subscribe();

    let result = match cli.command {
        Cmd::Interactive => commands::interactive::run(&session, &mut notifications).await,
        command => commands::dispatch(command, &session).await,
    };
    print_notifications(&mut notifications);
    result
}
