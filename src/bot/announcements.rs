//! Announcements, trade calls and utility replies

use std::str::FromStr;

use super::reply::{EmbedColor, EmbedReply, Reply};
use crate::common::errors::BotError;

/// Reactions added under every trade call
pub const CALL_REACTIONS: [char; 2] = ['👍', '👎'];

/// Direction of a trade call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Long,
    Short,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Long => "LONG",
            Position::Short => "SHORT",
        }
    }

    fn chart_emoji(&self) -> &'static str {
        match self {
            Position::Long => "📈",
            Position::Short => "📉",
        }
    }

    fn color(&self) -> EmbedColor {
        match self {
            Position::Long => EmbedColor::Green,
            Position::Short => EmbedColor::Red,
        }
    }
}

impl FromStr for Position {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Position::Long),
            "short" => Ok(Position::Short),
            _ => Err(BotError::InvalidInput(
                "Invalid position. Please use 'long' or 'short'.".to_string(),
            )),
        }
    }
}

/// Whether any of the author's role names grants executive commands
pub fn has_role(role_names: &[String], required: &str) -> bool {
    role_names.iter().any(|name| name == required)
}

/// Reply for members lacking the executive role
pub fn access_denied(required: &str) -> Reply {
    Reply::text(format!(
        "Access denied. You need the '{}' role to use this command.",
        required
    ))
}

/// `announce <message>` embed
pub fn announcement(message: &str, author: &str) -> EmbedReply {
    EmbedReply::new("📢 Announcement", message, EmbedColor::Blue)
        .with_footer(format!("Announced by {}", author))
}

/// `call <SYMBOL> <NUMBER> <long|short> [P]` embed
///
/// Any priority argument marks the call urgent.
pub fn trade_call(
    symbol: &str,
    number: i64,
    position: Position,
    priority: Option<&str>,
    author: &str,
) -> EmbedReply {
    let description = format!(
        "**{}** {} **{}** {}",
        symbol,
        number,
        position.as_str(),
        position.chart_emoji()
    );

    match priority {
        Some(_) => EmbedReply::new("📊 Sora Signal", description, EmbedColor::Gold).with_footer("Urgent"),
        None => EmbedReply::new("📊 Sora Signal", description, position.color())
            .with_footer(format!("Requested by {}", author)),
    }
}

/// `ping` reply
pub fn pong(latency_ms: u128) -> Reply {
    Reply::text(format!("🏓 Pong! Latency: {}ms", latency_ms))
}

/// `hello` reply
pub fn hello() -> Reply {
    Reply::text("Hello! I am alive 🚀")
}

/// `helpme` embed listing `(name, description)` pairs
pub fn help(prefix: &str, commands: &[(String, Option<String>)]) -> EmbedReply {
    let listing = commands
        .iter()
        .map(|(name, description)| {
            format!(
                "`{}{}`: {}",
                prefix,
                name,
                description.as_deref().unwrap_or("No description")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    EmbedReply::new(
        "📚 Bot Commands",
        format!(
            "Here are the available commands. Use `{}command [arg]` to use them.",
            prefix
        ),
        EmbedColor::Blue,
    )
    .with_field("**Commands**", listing, false)
    .with_footer(format!("Arguments are separated by spaces, e.g. `{}prices ES`.", prefix))
}
