use serenity::all::{ChannelId, Message};
use serenity::prelude::*;

use crate::error::BotError;
use crate::utils::helpers::say;
use crate::utils::platform::{GuildPlatform, VoiceSession};

pub async fn execute(ctx: &Context, msg: &Message) -> Result<(), BotError> {
    let platform = GuildPlatform::for_message(ctx, msg)?;
    let channel = platform.voice_channel_of(msg.author.id);

    let channel = join_caller(&platform, channel).await?;

    say(ctx, msg, format!("Cthulhu rises in <#{}>.", channel)).await?;
    Ok(())
}

pub async fn join_caller(
    voice: &impl VoiceSession,
    caller_channel: Option<ChannelId>,
) -> Result<ChannelId, BotError> {
    let channel = caller_channel.ok_or(BotError::NotInVoiceChannel)?;
    voice.join_channel(channel).await?;
    Ok(channel)
}
