use serenity::all::{ChannelId, EditChannel, GuildId, Message, UserId};
use serenity::async_trait;
use serenity::prelude::*;
use tracing::info;

use crate::error::BotError;
use crate::utils::helpers::guild_only;

#[async_trait]
pub trait RoleGate: Send + Sync {
    async fn has_role(&self, user: UserId, role_name: &str) -> Result<bool, BotError>;
}

#[async_trait]
pub trait VoiceSession: Send + Sync {
    async fn join_channel(&self, channel: ChannelId) -> Result<(), BotError>;
    async fn leave_channel(&self) -> Result<(), BotError>;
    async fn set_user_limit(&self, channel: ChannelId, limit: u32) -> Result<(), BotError>;
}

/// Role and voice capabilities of one guild, backed by serenity and songbird.
pub struct GuildPlatform<'a> {
    pub ctx: &'a Context,
    pub guild_id: GuildId,
}

impl<'a> GuildPlatform<'a> {
    pub fn for_message(ctx: &'a Context, msg: &Message) -> Result<Self, BotError> {
        Ok(Self {
            ctx,
            guild_id: guild_only(msg)?,
        })
    }

    /// The voice channel `user` is sitting in, according to the cache.
    pub fn voice_channel_of(&self, user: UserId) -> Option<ChannelId> {
        let guild = self.ctx.cache.guild(self.guild_id)?;
        guild
            .voice_states
            .get(&user)
            .and_then(|state| state.channel_id)
    }

    async fn songbird(&self) -> Result<std::sync::Arc<songbird::Songbird>, BotError> {
        songbird::get(self.ctx)
            .await
            .ok_or(BotError::VoiceUnavailable)
    }
}

#[async_trait]
impl RoleGate for GuildPlatform<'_> {
    async fn has_role(&self, user: UserId, role_name: &str) -> Result<bool, BotError> {
        let member = self.guild_id.member(self.ctx, user).await?;
        let roles = self.guild_id.roles(&self.ctx.http).await?;

        Ok(member.roles.iter().any(|role_id| {
            roles
                .get(role_id)
                .is_some_and(|role| role.name == role_name)
        }))
    }
}

#[async_trait]
impl VoiceSession for GuildPlatform<'_> {
    async fn join_channel(&self, channel: ChannelId) -> Result<(), BotError> {
        let manager = self.songbird().await?;
        manager.join(self.guild_id, channel).await?;

        info!(guild_id = %self.guild_id, channel_id = %channel, "joined voice channel");
        Ok(())
    }

    async fn leave_channel(&self) -> Result<(), BotError> {
        let manager = self.songbird().await?;
        if manager.get(self.guild_id).is_none() {
            return Err(BotError::NotConnected);
        }
        manager.remove(self.guild_id).await?;

        info!(guild_id = %self.guild_id, "left voice channel");
        Ok(())
    }

    async fn set_user_limit(&self, channel: ChannelId, limit: u32) -> Result<(), BotError> {
        channel
            .edit(&self.ctx.http, EditChannel::new().user_limit(limit))
            .await?;

        info!(channel_id = %channel, limit, "set voice channel user limit");
        Ok(())
    }
}

#[cfg(test)]
pub mod fakes {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct FakeRoles {
        pub holders: HashSet<UserId>,
        pub role: String,
    }

    #[async_trait]
    impl RoleGate for FakeRoles {
        async fn has_role(&self, user: UserId, role_name: &str) -> Result<bool, BotError> {
            Ok(role_name == self.role && self.holders.contains(&user))
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    pub enum VoiceCall {
        Join(ChannelId),
        Leave,
        Limit(ChannelId, u32),
    }

    #[derive(Default)]
    pub struct FakeVoice {
        pub connected: bool,
        pub calls: Mutex<Vec<VoiceCall>>,
    }

    impl FakeVoice {
        pub fn calls(&self) -> Vec<VoiceCall> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    #[async_trait]
    impl VoiceSession for FakeVoice {
        async fn join_channel(&self, channel: ChannelId) -> Result<(), BotError> {
            self.calls.lock().unwrap().push(VoiceCall::Join(channel));
            Ok(())
        }

        async fn leave_channel(&self) -> Result<(), BotError> {
            if !self.connected {
                return Err(BotError::NotConnected);
            }
            self.calls.lock().unwrap().push(VoiceCall::Leave);
            Ok(())
        }

        async fn set_user_limit(&self, channel: ChannelId, limit: u32) -> Result<(), BotError> {
            self.calls.lock().unwrap().push(VoiceCall::Limit(channel, limit));
            Ok(())
        }
    }
}
