use std::sync::Arc;

use serenity::all::Message;
use serenity::prelude::*;

use crate::database::Database;
use crate::error::BotError;
use crate::utils::args::parse_user;
use crate::utils::helpers::{guild_only, say, user_name};

pub const USAGE: &str = "insanity [@target]";

pub async fn execute(
    ctx: &Context,
    msg: &Message,
    args: &[&str],
    database: Arc<Database>,
) -> Result<(), BotError> {
    guild_only(msg)?;

    let target = match args.first() {
        Some(arg) => {
            parse_user(arg).ok_or_else(|| BotError::usage(format!("Usage: `{}`", USAGE)))?
        }
        None => msg.author.id,
    };

    let name = user_name(ctx, msg, target).await?;
    let reply = describe(&name, database.lookup(target.get()).await?);

    say(ctx, msg, reply).await?;
    Ok(())
}

fn describe(name: &str, score: Option<i64>) -> String {
    match score {
        Some(score) => format!("{} has an insanity of {}.", name, score),
        None => format!("{} has not been confounded yet.", name),
    }
}
