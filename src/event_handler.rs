use serenity::async_trait;
use serenity::model::{channel::Message, gateway::Ready};
use serenity::prelude::*;
use tracing::{debug, error, info, warn};

use crate::commands::{self, Command, Data};
use crate::error::BotError;
use crate::utils::args::parse_invocation;
use crate::utils::helpers::say;

const GENERIC_FAILURE: &str = "Something went wrong. Cthulhu is displeased.";

pub struct Handler {
    pub commands: Vec<Command>,
    pub data: Data,
}

impl Handler {
    async fn report(&self, ctx: &Context, msg: &Message, command: &str, reason: BotError) {
        let reply = match reason.user_message() {
            Some(text) => {
                debug!(command, reason = %reason, "rejected command");
                text
            }
            None => {
                error!(command, reason = ?reason, "there was an error while handling command");
                GENERIC_FAILURE.to_string()
            }
        };

        if let Err(e) = say(ctx, msg, reply).await {
            warn!(command, error = %e, "failed to send error reply");
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, bot: Ready) {
        info!(
            user = %bot.user.name,
            guilds = bot.guilds.len(),
            prefix = %self.data.config.prefix,
            "Cthulhu Himself has arrived."
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // return immediately if author is a bot
        if msg.author.bot {
            return;
        }

        let invocation = match parse_invocation(&msg.content, &self.data.config.prefix) {
            Some(invocation) => invocation,
            None => return,
        };

        let command = match commands::find(&self.commands, invocation.name) {
            Some(command) => command,
            None => {
                debug!(name = invocation.name, "unknown command");
                return;
            }
        };

        info!(
            command = command.name,
            user_id = %msg.author.id,
            channel_id = %msg.channel_id,
            "handling command"
        );

        if let Err(reason) = (command.exec)(&ctx, &msg, &invocation.args, &self.data).await {
            self.report(&ctx, &msg, command.name, reason).await;
        }
    }
}
