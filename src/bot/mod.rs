//! Bot module - command handlers and the Discord adapter around them

pub mod announcements;
pub mod discord;
pub mod handlers;
pub mod notifier;
pub mod reply;

pub use handlers::{simple_moving_average, CommandHandler, TrendWindow};
pub use notifier::DiscordNotifier;
pub use reply::{EmbedColor, EmbedReply, Reply};
