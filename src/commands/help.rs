use serenity::all::{Colour, CreateEmbed, CreateEmbedAuthor, CreateMessage, Message};
use serenity::prelude::*;

use crate::commands::{commands_vecs, Command, Data};
use crate::error::BotError;

pub async fn execute(ctx: &Context, msg: &Message, data: &Data) -> Result<(), BotError> {
    let embed = help_embed(&data.config.prefix, &commands_vecs());

    msg.author
        .direct_message(ctx, CreateMessage::new().embed(embed))
        .await?;
    Ok(())
}

fn help_embed(prefix: &str, commands: &[Command]) -> CreateEmbed {
    commands.iter().fold(
        CreateEmbed::new()
            .author(CreateEmbedAuthor::new("Help"))
            .colour(Colour::ORANGE),
        |embed, command| {
            embed.field(
                format!("{}{}", prefix, command.usage),
                command.description,
                false,
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_command_with_prefix() {
        let commands = commands_vecs();
        let embed = serde_json::to_value(help_embed(".", &commands)).unwrap();

        assert_eq!(embed["author"]["name"], "Help");
        assert_eq!(embed["color"], Colour::ORANGE.0);

        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), commands.len());
        assert_eq!(fields[0]["name"], ".roll <start> <end>");
        assert!(fields
            .iter()
            .all(|field| field["name"].as_str().unwrap().starts_with('.')));
    }
}
