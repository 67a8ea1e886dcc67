use std::collections::HashMap;

use itertools::Itertools;

use crate::{
    catalog::{CategoryView, CommandRegistry, RegisteredCommand},
    error::HelpError,
};

impl<U, E> RegisteredCommand for poise::Command<U, E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn help_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn signature(&self) -> Option<String> {
        signature(self.parameters.iter().map(|p| (p.name.as_str(), p.required)))
    }
}

/// `<required> [optional]`, or `None` for commands without parameters.
pub(crate) fn signature<'a>(parameters: impl IntoIterator<Item = (&'a str, bool)>) -> Option<String> {
    let signature = parameters
        .into_iter()
        .map(|(name, required)| {
            if required {
                format!("<{name}>")
            } else {
                format!("[{name}]")
            }
        })
        .join(" ");
    (!signature.is_empty()).then_some(signature)
}

/// Registry over a poise framework's top-level commands. Commands marked
/// `hide_in_help` are left out; categories are discovered in command order.
pub struct PoiseRegistry<'a, U, E> {
    commands: &'a [poise::Command<U, E>],
    bot_name: Option<&'a str>,
    descriptions: Option<&'a HashMap<String, String>>,
}

impl<'a, U, E> PoiseRegistry<'a, U, E> {
    pub fn new(commands: &'a [poise::Command<U, E>]) -> Self {
        Self {
            commands,
            bot_name: None,
            descriptions: None,
        }
    }

    pub fn with_bot_name(mut self, name: &'a str) -> Self {
        self.bot_name = Some(name);
        self
    }

    pub fn with_category_descriptions(mut self, descriptions: &'a HashMap<String, String>) -> Self {
        self.descriptions = Some(descriptions);
        self
    }

    fn visible(&self) -> impl Iterator<Item = &'a poise::Command<U, E>> + use<'a, U, E> {
        self.commands.iter().filter(|c| !c.hide_in_help)
    }
}

impl<U, E> CommandRegistry for PoiseRegistry<'_, U, E> {
    type Command = poise::Command<U, E>;

    fn commands(&self) -> Result<Vec<&Self::Command>, HelpError> {
        Ok(self.visible().collect())
    }

    fn categories(&self) -> Result<Vec<CategoryView<'_, Self::Command>>, HelpError> {
        let mut views: Vec<CategoryView<'_, Self::Command>> = Vec::new();
        for command in self.visible() {
            let Some(name) = command.category.as_deref() else {
                continue;
            };
            match views.iter_mut().find(|v| v.name == name) {
                Some(view) => view.commands.push(command),
                None => views.push(CategoryView {
                    name,
                    description: self
                        .descriptions
                        .and_then(|d| d.get(name))
                        .map(String::as_str),
                    commands: vec![command],
                }),
            }
        }
        Ok(views)
    }

    fn bot_name(&self) -> Option<&str> {
        self.bot_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RenderOptions, render_registry};

    type Command = poise::Command<(), HelpError>;

    fn command(name: &str, category: Option<&str>, description: Option<&str>) -> Command {
        Command {
            name: name.to_owned(),
            category: category.map(str::to_owned),
            description: description.map(str::to_owned),
            ..Default::default()
        }
    }

    fn commands() -> Vec<Command> {
        vec![
            command("play", Some("Music"), Some("Plays a song")),
            Command {
                aliases: vec!["p".to_owned(), "pong".to_owned()],
                ..command("ping", None, None)
            },
            command("ban", Some("Admin"), Some("Bans a member")),
            command("skip", Some("Music"), None),
            Command {
                hide_in_help: true,
                ..command("register", Some("Admin"), None)
            },
        ]
    }

    #[test]
    fn test_signature() {
        assert_eq!(signature(std::iter::empty()), None);
        assert_eq!(
            signature([("user", true), ("reason", false)]).as_deref(),
            Some("<user> [reason]")
        );
    }

    #[test]
    fn test_categories_follow_discovery_order() {
        let commands = commands();
        let descriptions = HashMap::from([("Music".to_owned(), "Play songs".to_owned())]);
        let registry = PoiseRegistry::new(&commands).with_category_descriptions(&descriptions);
        let views = registry.categories().unwrap();
        assert_eq!(
            views.iter().map(|v| v.name).collect::<Vec<_>>(),
            ["Music", "Admin"]
        );
        assert_eq!(views[0].description, Some("Play songs"));
        assert_eq!(views[0].commands.len(), 2);
        assert_eq!(views[1].commands.len(), 1);
    }

    #[test]
    fn test_render_poise_commands() {
        let commands = commands();
        let registry = PoiseRegistry::new(&commands).with_bot_name("Dog");
        let catalog = render_registry(&registry, &RenderOptions::default()).unwrap();
        assert_eq!(catalog.title, "📚 Dog - Commands");
        assert_eq!(catalog.total, 4);
        assert_eq!(catalog.sections.len(), 3);
        assert_eq!(catalog.sections[2].heading, "📝 Commands");
        assert_eq!(
            catalog.sections[2].body,
            "`!ping [p, pong]` - no description available"
        );
        assert!(!catalog.sections[1].body.contains("register"));
    }
}
