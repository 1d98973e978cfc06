use std::str::FromStr;

use serenity::all::UserId;
use serenity::utils::parse_user_mention;

use crate::error::BotError;

/// A prefixed message split into command name and arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

pub fn parse_invocation<'a>(content: &'a str, prefix: &str) -> Option<Invocation<'a>> {
    let rest = content.trim_start().strip_prefix(prefix)?;

    // "<prefix> roll" is a sentence, not a command
    if rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut words = rest.split_whitespace();
    let name = words.next()?;

    Some(Invocation {
        name,
        args: words.collect(),
    })
}

/// Parses a required positional argument, answering with `usage` when it is
/// missing or malformed.
pub fn required<T: FromStr>(args: &[&str], index: usize, usage: &str) -> Result<T, BotError> {
    args.get(index)
        .and_then(|arg| arg.parse().ok())
        .ok_or_else(|| BotError::usage(format!("Usage: `{}`", usage)))
}

pub fn optional<T: FromStr>(args: &[&str], index: usize, usage: &str) -> Result<Option<T>, BotError> {
    match args.get(index) {
        None => Ok(None),
        Some(arg) => arg
            .parse()
            .map(Some)
            .map_err(|_| BotError::usage(format!("Usage: `{}`", usage))),
    }
}

/// Accepts `<@id>`, `<@!id>` or a bare id.
pub fn parse_user(arg: &str) -> Option<UserId> {
    parse_user_mention(arg).or_else(|| arg.parse::<u64>().ok().filter(|id| *id != 0).map(UserId::new))
}
