pub mod confound;
pub mod cooks;
pub mod help;
pub mod insanity;
pub mod ip;
pub mod join;
pub mod judge;
pub mod leave;
pub mod roll;

use futures::future::BoxFuture;
use serenity::all::Message;
use serenity::prelude::*;
use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::error::BotError;

/// State shared by every command invocation.
pub struct Data {
    pub database: Arc<Database>,
    pub config: Arc<Config>,
    pub web: reqwest::Client,
}

type CommandFn = for<'a> fn(
    &'a Context,   // Command context, `ctx`
    &'a Message,   // Invoking message, `msg`
    &'a [&'a str], // Arguments after the command name
    &'a Data,      // Shared state
) -> BoxFuture<'a, Result<(), BotError>>;

#[derive(Debug)]
pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub exec: CommandFn,
}

pub fn commands_vecs() -> Vec<Command> {
    vec![
        Command {
            name: "roll",
            usage: roll::USAGE,
            description: "Returns a random integer between start and end.",
            exec: |ctx, msg, args, _data| Box::pin(roll::execute(ctx, msg, args)),
        },
        Command {
            name: "judge",
            usage: "judge",
            description: "Be judged by Cthulhu.",
            exec: |ctx, msg, _args, _data| Box::pin(judge::execute(ctx, msg)),
        },
        Command {
            name: "confound",
            usage: confound::USAGE,
            description: "Drive someone a little closer to madness.",
            exec: |ctx, msg, args, data| {
                Box::pin(confound::execute(ctx, msg, args, data.database.clone()))
            },
        },
        Command {
            name: "insanity",
            usage: insanity::USAGE,
            description: "Show how insane someone (or you) has become.",
            exec: |ctx, msg, args, data| {
                Box::pin(insanity::execute(ctx, msg, args, data.database.clone()))
            },
        },
        Command {
            name: "cooks",
            usage: cooks::USAGE,
            description: "Limit how many users fit in your voice channel. 0 removes the limit.",
            exec: |ctx, msg, args, _data| Box::pin(cooks::execute(ctx, msg, args)),
        },
        Command {
            name: "ip",
            usage: "ip",
            description: "Sends you the server's IP. Requires the right role.",
            exec: |ctx, msg, _args, data| Box::pin(ip::execute(ctx, msg, data)),
        },
        Command {
            name: "join",
            usage: "join",
            description: "Summon Cthulhu into your voice channel.",
            exec: |ctx, msg, _args, _data| Box::pin(join::execute(ctx, msg)),
        },
        Command {
            name: "leave",
            usage: "leave",
            description: "Banish Cthulhu from the voice channel.",
            exec: |ctx, msg, _args, _data| Box::pin(leave::execute(ctx, msg)),
        },
        Command {
            name: "help",
            usage: "help",
            description: "Sends you this message.",
            exec: |ctx, msg, _args, data| Box::pin(help::execute(ctx, msg, data)),
        },
    ]
}

pub fn find<'a>(commands: &'a [Command], name: &str) -> Option<&'a Command> {
    commands.iter().find(|command| command.name == name)
}
