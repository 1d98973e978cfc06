use serenity::all::{Context, CreateMessage, GuildId, Message, UserId};
use serenity::Error;
use tracing::warn;

use crate::error::BotError;

/// Posts `content` in the channel the invocation came from.
pub async fn say(ctx: &Context, msg: &Message, content: impl Into<String>) -> Result<(), Error> {
    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().content(content))
        .await?;
    Ok(())
}

/// Name to show for `user_id`, preferring the mention already carried by the
/// message over an HTTP round trip.
pub async fn user_name(ctx: &Context, msg: &Message, user_id: UserId) -> Result<String, BotError> {
    if let Some(user) = msg.mentions.iter().find(|user| user.id == user_id) {
        return Ok(user.name.clone());
    }
    if msg.author.id == user_id {
        return Ok(msg.author.name.clone());
    }

    let fetched = user_id.to_user(ctx).await.map(|user| user.name);
    resolve_fetched(user_id, fetched)
}

// A bare id that Discord can't resolve is a bad argument, not our failure.
fn resolve_fetched(user_id: UserId, fetched: Result<String, Error>) -> Result<String, BotError> {
    fetched.map_err(|reason| {
        warn!(user_id = %user_id, reason = %reason, "could not resolve user");
        BotError::usage(format!("I can't find a user with id `{}`.", user_id))
    })
}

pub fn guild_only(msg: &Message) -> Result<GuildId, BotError> {
    msg.guild_id
        .ok_or_else(|| BotError::usage("This command only works in a server."))
}
