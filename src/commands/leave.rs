use serenity::all::Message;
use serenity::prelude::*;

use crate::error::BotError;
use crate::utils::helpers::say;
use crate::utils::platform::{GuildPlatform, VoiceSession};

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), BotError> {
    let platform = GuildPlatform::for_message(ctx, msg)?;
    leave_guild(&platform).await?;

    say(ctx, msg, "Cthulhu returns to the deep.").await?;
    Ok(())
}

/// Fails with `NotConnected` when the bot has no call in this guild.
pub async fn leave_guild(voice: &impl VoiceSession) -> Result<(), BotError> {
    voice.leave_channel().await
}
