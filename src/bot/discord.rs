//! Discord command surface
//!
//! Each poise command forwards its raw arguments to a handler and renders
//! the resulting [`Reply`]. Nothing here decides what to answer.

use poise::serenity_prelude as serenity;
use tracing::{error, warn};

use super::announcements::{self, Position, CALL_REACTIONS};
use super::handlers::CommandHandler;
use super::reply::{EmbedReply, Reply};
use crate::common::types::RequesterId;

/// State available to every command
pub struct Data {
    pub handler: CommandHandler,
    /// Role required for `announce` and `call`
    pub executive_role: String,
}

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every command the bot registers
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        prices(),
        trend(),
        set_alert(),
        announce(),
        call(),
        ping(),
        helpme(),
        hello(),
    ]
}

/// Build the poise framework around `data`
pub fn build_framework(data: Data, prefix: String) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            tracing::info!("Logged in as {}", ready.user.name);
            Box::pin(async move { Ok(data) })
        })
        .build()
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, "Command failed: {:?}", error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

fn to_embed(embed: EmbedReply) -> serenity::CreateEmbed {
    let mut created = serenity::CreateEmbed::new()
        .title(embed.title)
        .description(embed.description)
        .color(embed.color.rgb());

    for field in embed.fields {
        created = created.field(field.name, field.value, field.inline);
    }
    if let Some(footer) = embed.footer {
        created = created.footer(serenity::CreateEmbedFooter::new(footer));
    }
    created
}

async fn send_reply<'a>(ctx: Context<'a>, reply: Reply) -> Result<poise::ReplyHandle<'a>, Error> {
    let handle = match reply {
        Reply::Text(text) => ctx.say(text).await?,
        Reply::Embed(embed) => {
            ctx.send(poise::CreateReply::default().embed(to_embed(embed)))
                .await?
        }
    };
    Ok(handle)
}

/// Names of the invoking member's roles; empty outside guilds
async fn author_role_names(ctx: Context<'_>) -> Vec<String> {
    let Some(member) = ctx.author_member().await else {
        return Vec::new();
    };
    let role_ids = member.roles.clone();

    match ctx.guild() {
        Some(guild) => role_ids
            .iter()
            .filter_map(|id| guild.roles.get(id).map(|role| role.name.clone()))
            .collect(),
        None => Vec::new(),
    }
}

/// Remove the message that invoked a prefix command
async fn delete_invocation(ctx: Context<'_>) {
    if let poise::Context::Prefix(prefix) = ctx {
        if let Err(e) = prefix.msg.delete(ctx.serenity_context()).await {
            warn!("Could not delete command message: {}", e);
        }
    }
}

/// Show the latest cached price for a futures symbol
#[poise::command(prefix_command, category = "Trading")]
pub async fn prices(ctx: Context<'_>, symbol: String) -> Result<(), Error> {
    let reply = ctx.data().handler.prices(&symbol).await;
    send_reply(ctx, reply).await?;
    Ok(())
}

/// Moving average over N periods, or recent closes for a range like 5d
#[poise::command(prefix_command, category = "Trading")]
pub async fn trend(ctx: Context<'_>, symbol: String, window: String) -> Result<(), Error> {
    ctx.defer_or_broadcast().await?;
    let reply = ctx.data().handler.trend(&symbol, &window).await;
    send_reply(ctx, reply).await?;
    Ok(())
}

/// DM me once a symbol trades at or above a price
#[poise::command(prefix_command, category = "Trading")]
pub async fn set_alert(ctx: Context<'_>, symbol: String, price: String) -> Result<(), Error> {
    let requester = RequesterId(ctx.author().id.get());
    let reply = ctx.data().handler.set_alert(&symbol, &price, requester).await;
    send_reply(ctx, reply).await?;
    Ok(())
}

/// Repost a message as an announcement (executives only)
#[poise::command(prefix_command, category = "Announcements")]
pub async fn announce(ctx: Context<'_>, #[rest] message: String) -> Result<(), Error> {
    let required = ctx.data().executive_role.clone();
    if !announcements::has_role(&author_role_names(ctx).await, &required) {
        send_reply(ctx, announcements::access_denied(&required)).await?;
        return Ok(());
    }

    delete_invocation(ctx).await;
    let embed = announcements::announcement(&message, ctx.author().display_name());
    send_reply(ctx, embed.into()).await?;
    Ok(())
}

/// Post a trade signal: SYMBOL NUMBER long|short [P for priority]
#[poise::command(prefix_command, category = "Announcements")]
pub async fn call(
    ctx: Context<'_>,
    symbol: String,
    number: i64,
    position: String,
    priority: Option<String>,
) -> Result<(), Error> {
    let required = ctx.data().executive_role.clone();
    if !announcements::has_role(&author_role_names(ctx).await, &required) {
        send_reply(ctx, announcements::access_denied(&required)).await?;
        return Ok(());
    }

    let position: Position = match position.parse() {
        Ok(position) => position,
        Err(e) => {
            send_reply(ctx, Reply::text(e.user_message())).await?;
            return Ok(());
        }
    };

    let embed = announcements::trade_call(
        &symbol,
        number,
        position,
        priority.as_deref(),
        ctx.author().display_name(),
    );
    let handle = send_reply(ctx, embed.into()).await?;
    let message = handle.message().await?;
    for reaction in CALL_REACTIONS {
        message.react(ctx.serenity_context(), reaction).await?;
    }

    delete_invocation(ctx).await;
    Ok(())
}

/// Show gateway latency
#[poise::command(prefix_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    send_reply(ctx, announcements::pong(latency.as_millis())).await?;
    Ok(())
}

/// List every command
#[poise::command(prefix_command, category = "Utility")]
pub async fn helpme(ctx: Context<'_>) -> Result<(), Error> {
    let listing: Vec<(String, Option<String>)> = ctx
        .framework()
        .options()
        .commands
        .iter()
        .filter(|command| !command.hide_in_help)
        .map(|command| (command.name.clone(), command.description.clone()))
        .collect();

    let embed = announcements::help(ctx.prefix(), &listing);
    send_reply(ctx, embed.into()).await?;
    Ok(())
}

/// Check that the bot is alive
#[poise::command(prefix_command, category = "Utility")]
pub async fn hello(ctx: Context<'_>) -> Result<(), Error> {
    send_reply(ctx, announcements::hello()).await?;
    Ok(())
}
