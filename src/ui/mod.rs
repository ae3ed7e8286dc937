//! Terminal presentation.

pub mod render;

use chrono::{DateTime, Local, Utc};
use console::style;
use tokio::sync::broadcast::{error::TryRecvError, Receiver};

use crate::api::{NotificationEvent, NotificationKind};

/// Prints every notification shown since the last call.
///
/// Errors are skipped: commands return them and `main` prints them once.
pub fn print_notifications(rx: &mut Receiver<NotificationEvent>) {
    loop {
        match rx.try_recv() {
            Ok(NotificationEvent::Shown(n)) => {
                let bullet = match n.kind {
                    NotificationKind::Success => style("•").green().bold(),
                    NotificationKind::Info => style("•").blue().bold(),
                    NotificationKind::Warning => style("•").yellow().bold(),
                    NotificationKind::Error => continue,
                };
                println!("{} {} {}", bullet, style(clock(n.created_at)).dim(), n.message);
            }
            Ok(NotificationEvent::Removed(_)) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "notification printer lagged");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

/// `HH:MM:SS` in local time.
fn clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
