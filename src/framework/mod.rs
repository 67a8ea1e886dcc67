mod help;
mod registry;

use tracing::{error, info};

pub use help::{HelpReply, help, resolve_query, send_help};
pub use registry::PoiseRegistry;

use crate::{
    catalog::{RenderedCatalog, render_registry},
    config::HelpCfg,
    console::log_catalog,
    error::HelpError,
};

pub type Context<'a> = poise::Context<'a, Data, HelpError>;

#[derive(Debug, Default)]
pub struct Data {
    pub cfg: HelpCfg,
}

async fn on_error(error: poise::FrameworkError<'_, Data, HelpError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to set up help framework: {}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {}", ctx.command().name, error);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e)
            }
        }
    }
}

/// Framework options with the `help` command added to the host's commands.
pub fn options(
    mut commands: Vec<poise::Command<Data, HelpError>>,
) -> poise::FrameworkOptions<Data, HelpError> {
    commands.push(help());
    poise::FrameworkOptions {
        commands,
        on_error: |error| {
            Box::pin(async {
                on_error(error).await;
            })
        },
        pre_command: |ctx| Box::pin(async move { info!("Invoke Command: {}", ctx.command().name) }),
        ..Default::default()
    }
}

/// Renders the framework's catalog once and logs it, the way the bot logs its
/// loaded cogs when it comes up.
fn log_startup_catalog<U, E>(
    commands: &[poise::Command<U, E>],
    bot_name: &str,
    cfg: &HelpCfg,
) -> Result<RenderedCatalog, HelpError> {
    let registry = PoiseRegistry::new(commands)
        .with_bot_name(bot_name)
        .with_category_descriptions(&cfg.category_descriptions);
    let catalog = render_registry(&registry, &cfg.render)?;
    log_catalog(&catalog);
    Ok(catalog)
}

pub fn framework(
    cfg: HelpCfg,
    commands: Vec<poise::Command<Data, HelpError>>,
) -> poise::Framework<Data, HelpError> {
    poise::Framework::builder()
        .setup(move |_, ready, framework| {
            Box::pin(async move {
                log_startup_catalog(&framework.options().commands, &ready.user.name, &cfg)?;
                info!("Framework has been set up!");
                Ok(Data { cfg })
            })
        })
        .options(options(commands))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_append_help() {
        let ping = poise::Command {
            name: "ping".to_owned(),
            ..Default::default()
        };
        let options = options(vec![ping]);
        let names = options
            .commands
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["ping", "help"]);
        assert_eq!(options.commands[1].category.as_deref(), Some("Help"));
    }

    #[test]
    fn test_startup_catalog() {
        let options = options(Vec::new());
        let cfg = HelpCfg {
            category_descriptions: [("Help".to_owned(), "Getting around".to_owned())].into(),
            ..Default::default()
        };
        let catalog = log_startup_catalog(&options.commands, "Dog", &cfg).unwrap();
        assert_eq!(catalog.title, "📚 Dog - Commands");
        assert_eq!(catalog.total, 1);
        assert_eq!(catalog.sections[0].heading, "📁 Help");
        assert!(catalog.sections[0].body.starts_with("`!help`"));
    }
}
