use serenity::all::{CreateMessage, Message, UserId};
use serenity::prelude::*;
use tracing::warn;

use crate::commands::Data;
use crate::error::BotError;
use crate::utils::helpers::say;
use crate::utils::platform::{GuildPlatform, RoleGate};

pub async fn execute(ctx: &Context, msg: &Message, data: &Data) -> Result<(), BotError> {
    let platform = GuildPlatform::for_message(ctx, msg)?;
    authorize(&platform, msg.author.id, &data.config.ip_role).await?;

    let ip = fetch_public_ip(&data.web, &data.config.ip_lookup_url).await?;

    msg.author
        .direct_message(
            ctx,
            CreateMessage::new().content(format!("The server's IP is `{}`.", ip)),
        )
        .await?;
    say(ctx, msg, "Check your DMs.").await?;
    Ok(())
}

pub async fn authorize(gate: &impl RoleGate, user: UserId, role: &str) -> Result<(), BotError> {
    if gate.has_role(user, role).await? {
        return Ok(());
    }

    warn!(user_id = %user, role, "ip requested without the required role");
    Err(BotError::PermissionDenied { role: role.into() })
}

async fn fetch_public_ip(client: &reqwest::Client, url: &str) -> Result<String, BotError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(body.trim().to_string())
}
