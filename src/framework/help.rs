use poise::{CreateReply, command};

use super::{Context, PoiseRegistry};
use crate::{
    catalog::{
        CommandRegistry, RenderOptions, RenderedCatalog, find_command, render_categories,
        render_category, render_command_detail, render_registry,
    },
    config::HelpCfg,
    error::HelpError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpReply {
    Page(RenderedCatalog),
    NotFound(String),
}

/// Resolves a help query: nothing renders the whole catalog, otherwise a
/// command name or alias (with or without the prefix), then a category name,
/// then the `categories` overview.
pub fn resolve_query<R: CommandRegistry>(
    registry: &R,
    query: Option<&str>,
    options: &RenderOptions,
) -> Result<HelpReply, HelpError> {
    let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(HelpReply::Page(render_registry(registry, options)?));
    };
    let name = query.strip_prefix(options.prefix.as_str()).unwrap_or(query);
    if let Some(command) = find_command(registry, name)? {
        return Ok(HelpReply::Page(render_command_detail(&command, options)));
    }
    if let Some(page) = render_category(registry, query, options)? {
        return Ok(HelpReply::Page(page));
    }
    if query.eq_ignore_ascii_case("categories") {
        return Ok(HelpReply::Page(render_categories(registry, options)?));
    }
    Ok(HelpReply::NotFound(format!(
        "❌ No command or category named `{query}`."
    )))
}

/// Answers a help query from the framework's own command list.
pub async fn send_help<U: Send + Sync + 'static, E>(
    ctx: poise::Context<'_, U, E>,
    query: Option<&str>,
    cfg: &HelpCfg,
) -> Result<(), HelpError> {
    let bot_name = ctx.serenity_context().cache.current_user().name.clone();
    let reply = {
        let registry = PoiseRegistry::new(&ctx.framework().options().commands)
            .with_bot_name(&bot_name)
            .with_category_descriptions(&cfg.category_descriptions);
        match resolve_query(&registry, query, &cfg.render)? {
            HelpReply::Page(page) => CreateReply::default().embed(page.to_embed()),
            HelpReply::NotFound(message) => CreateReply::default().content(message).ephemeral(true),
        }
    };
    ctx.send(reply).await?;
    Ok(())
}

#[command(prefix_command, slash_command, track_edits, category = "Help")]
/// Shows all commands, one category, or the details of one command
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command or category to look up"]
    #[rest]
    query: Option<String>,
) -> Result<(), HelpError> {
    send_help(ctx, query.as_deref(), &ctx.data().cfg).await
}

#[cfg(test)]
mod tests {
    use super::*;

    type Command = poise::Command<(), HelpError>;

    fn commands() -> Vec<Command> {
        vec![
            Command {
                name: "play".to_owned(),
                category: Some("Music".to_owned()),
                ..Default::default()
            },
            Command {
                name: "ping".to_owned(),
                aliases: vec!["p".to_owned()],
                description: Some("Shows latency".to_owned()),
                ..Default::default()
            },
        ]
    }

    fn page(reply: HelpReply) -> RenderedCatalog {
        match reply {
            HelpReply::Page(page) => page,
            HelpReply::NotFound(message) => panic!("unexpected miss: {message}"),
        }
    }

    #[test]
    fn test_empty_query_renders_catalog() {
        let commands = commands();
        let registry = PoiseRegistry::new(&commands);
        let options = RenderOptions::default();
        let full = page(resolve_query(&registry, None, &options).unwrap());
        assert_eq!(full.total, 2);
        assert_eq!(page(resolve_query(&registry, Some("  "), &options).unwrap()), full);
    }

    #[test]
    fn test_query_resolves_command_category_and_overview() {
        let commands = commands();
        let registry = PoiseRegistry::new(&commands);
        let options = RenderOptions::default();
        let detail = page(resolve_query(&registry, Some("!p"), &options).unwrap());
        assert_eq!(detail.title, "ℹ️ Command: !ping");
        assert_eq!(detail.description, "Shows latency");
        let music = page(resolve_query(&registry, Some("Music"), &options).unwrap());
        assert_eq!(music.title, "📁 Music");
        let overview = page(resolve_query(&registry, Some("categories"), &options).unwrap());
        assert_eq!(overview.title, "📁 Command categories");
    }

    #[test]
    fn test_unknown_query() {
        let commands = commands();
        let registry = PoiseRegistry::new(&commands);
        assert_eq!(
            resolve_query(&registry, Some("dance"), &RenderOptions::default()).unwrap(),
            HelpReply::NotFound("❌ No command or category named `dance`.".to_owned())
        );
    }
}
