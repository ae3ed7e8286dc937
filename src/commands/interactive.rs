use clap::Parser;
use console::style;
use dialoguer::Input;
use tokio::sync::broadcast::Receiver;

use super::{dispatch, Session};
use crate::api::NotificationEvent;
use crate::cli::Cli;
use crate::ui::print_notifications;

/// Run the CLI in interactive REPL mode.
///
/// The session, and with it the generator form, lives until the user
/// leaves, so `keywords` and `prompts` runs build up one form.
pub async fn run(
    session: &Session,
    notifications: &mut Receiver<NotificationEvent>,
) -> Result<(), String> {
    println!("Entering interactive mode. Type 'exit' or 'quit' to leave.");
    loop {
        let input: String = Input::new()
            .with_prompt(format!("{}", style("cs >").blue().bold()))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| format!("Input error: {}", e))?;

        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let args = match shell_words::split(input) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("• Error parsing command: {}", e);
                continue;
            }
        };

        let full_args = std::iter::once("content-studio".to_string()).chain(args);

        match Cli::try_parse_from(full_args) {
            Ok(cli) => {
                let result = dispatch(cli.command, session).await;
                print_notifications(notifications);
                if let Err(e) = result {
                    eprintln!("{} {}", style("•").red().bold(), e);
                }
            }
            Err(e) => {
                e.print().unwrap_or(());
            }
        }
    }
    Ok(())
}
