use serenity::all::{ChannelId, Message};
use serenity::prelude::*;

use crate::error::BotError;
use crate::utils::args::optional;
use crate::utils::helpers::say;
use crate::utils::platform::{GuildPlatform, VoiceSession};

pub const USAGE: &str = "cooks [max]";

/// Discord caps voice channel user limits at 99; 0 means unlimited.
pub const MAX_USER_LIMIT: u32 = 99;

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), BotError> {
    let limit = optional::<u32>(args, 0, USAGE)?.unwrap_or(0);
    let platform = GuildPlatform::for_message(ctx, msg)?;
    let channel = platform.voice_channel_of(msg.author.id);

    let channel = limit_channel(&platform, channel, limit).await?;

    let reply = if limit == 0 {
        format!("Removed the user limit from <#{}>.", channel)
    } else {
        format!("<#{}> now fits {} cooks.", channel, limit)
    };
    say(ctx, msg, reply).await?;
    Ok(())
}

pub async fn limit_channel(
    voice: &impl VoiceSession,
    caller_channel: Option<ChannelId>,
    limit: u32,
) -> Result<ChannelId, BotError> {
    if limit > MAX_USER_LIMIT {
        return Err(BotError::usage(format!(
            "The limit must be between 0 and {}. Usage: `{}`",
            MAX_USER_LIMIT, USAGE
        )));
    }

    let channel = caller_channel.ok_or(BotError::NotInVoiceChannel)?;
    voice.set_user_limit(channel, limit).await?;

    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::platform::fakes::{FakeVoice, VoiceCall};

    #[tokio::test]
    async fn limits_the_callers_channel() {
        let voice = FakeVoice::default();
        let channel = ChannelId::new(9);

        assert_eq!(limit_channel(&voice, Some(channel), 4).await.unwrap(), channel);
        assert_eq!(limit_channel(&voice, Some(channel), 0).await.unwrap(), channel);
        assert_eq!(
            voice.calls(),
            vec![VoiceCall::Limit(channel, 4), VoiceCall::Limit(channel, 0)]
        );
    }

    #[tokio::test]
    async fn caller_outside_voice_is_rejected() {
        let voice = FakeVoice::default();

        let err = limit_channel(&voice, None, 4).await.unwrap_err();
        assert!(matches!(err, BotError::NotInVoiceChannel));
        assert!(voice.calls().is_empty());
    }

    #[tokio::test]
    async fn limits_above_discord_cap_are_rejected() {
        let voice = FakeVoice::default();

        let err = limit_channel(&voice, Some(ChannelId::new(9)), 100).await.unwrap_err();
        assert!(matches!(err, BotError::Usage(_)));
        assert!(voice.calls().is_empty());
    }
}
