use crate::{COMMANDS, CommandMeta};
use sloth_core::{Context, Error};
use sloth_utils::embed::standard_embed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = standard_embed("Available Commands", grouped_help_description());
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn grouped_help_description() -> String {
    let mut commands: Vec<&'static CommandMeta> = COMMANDS.iter().collect();
    commands.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    let mut description = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if current_category.is_some() {
                description.push('\n');
            }
            description.push_str(&format!("**{}**\n", capitalize(command.category)));
            current_category = Some(command.category);
        }

        description.push_str(&format!("`{}`: {}\n", command.usage, command.desc));
    }

    description
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::grouped_help_description;

    #[test]
    fn every_command_appears_once() {
        let description = grouped_help_description();
        for meta in crate::COMMANDS {
            assert_eq!(
                description.matches(&format!("`{}`", meta.usage)).count(),
                1,
                "{} missing from help",
                meta.name
            );
        }
    }

    #[test]
    fn categories_are_grouped_headers() {
        let description = grouped_help_description();
        assert!(description.contains("**Analytics**"));
        assert!(description.contains("**Reputation**"));
        assert!(description.contains("**Moderation**"));
        assert!(description.contains("**Utility**"));
    }
}
