use rand::Rng;
use serenity::all::Message;
use serenity::prelude::*;

use crate::error::BotError;
use crate::utils::args::required;
use crate::utils::helpers::say;

pub const USAGE: &str = "roll <start> <end>";

pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), BotError> {
    let start: i64 = required(args, 0, USAGE)?;
    let end: i64 = required(args, 1, USAGE)?;

    let value = roll_between(&mut rand::thread_rng(), start, end)?;

    say(ctx, msg, value.to_string()).await?;
    Ok(())
}

pub fn roll_between(rng: &mut impl Rng, start: i64, end: i64) -> Result<i64, BotError> {
    if start > end {
        return Err(BotError::usage(format!(
            "{} is greater than {}. Usage: `{}`",
            start, end, USAGE
        )));
    }

    Ok(rng.gen_range(start..=end))
}
