use std::sync::Arc;

use serenity::all::{Message, UserId};
use serenity::prelude::*;
use tracing::info;

use crate::database::{validate_adjustment, Database};
use crate::error::BotError;
use crate::utils::args::{parse_user, required};
use crate::utils::helpers::{guild_only, say, user_name};

pub const USAGE: &str = "confound <@target> <insanity>";

pub async fn execute(
    ctx: &Context,
    msg: &Message,
    args: &[&str],
    database: Arc<Database>,
) -> Result<(), BotError> {
    guild_only(msg)?;
    let (target, delta) = parse_args(args)?;
    let actor = msg.author.id;

    // reject before spending a request on the target's name
    validate_adjustment(actor.get(), target.get(), delta)?;

    let name = user_name(ctx, msg, target).await?;
    let score = database.adjust(actor.get(), target.get(), &name, delta).await?;

    info!(actor_id = %actor, target_id = %target, delta, score, "confounded user");
    say(
        ctx,
        msg,
        format!("{} has been confounded. Their insanity is now {}.", name, score),
    )
    .await?;
    Ok(())
}

fn parse_args(args: &[&str]) -> Result<(UserId, i64), BotError> {
    let target = args
        .first()
        .and_then(|arg| parse_user(arg))
        .ok_or_else(|| BotError::usage(format!("Usage: `{}`", USAGE)))?;
    let delta = required(args, 1, USAGE)?;

    Ok((target, delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mention_and_amount() {
        let (target, delta) = parse_args(&["<@!42>", "17"]).unwrap();
        assert_eq!(target, UserId::new(42));
        assert_eq!(delta, 17);
    }

    #[test]
    fn out_of_range_amounts_still_parse() {
        // range checks belong to the ledger so the reply can name the bounds
        let (_, delta) = parse_args(&["<@42>", "-5"]).unwrap();
        assert_eq!(delta, -5);
    }

    #[test]
    fn missing_or_garbled_arguments_show_usage() {
        let cases: [&[&str]; 4] = [&[], &["<@42>"], &["bob", "5"], &["<@42>", "lots"]];
        for args in cases {
            let err = parse_args(args).unwrap_err();
            assert_eq!(err.to_string(), format!("Usage: `{}`", USAGE));
        }
    }
}
