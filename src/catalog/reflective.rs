use std::collections::HashSet;

use itertools::Itertools;
use tracing::warn;

use super::{
    BOOKS, Category, CommandDescriptor, FOLDER, MEMO, RenderOptions, RenderedCatalog, Section,
    assemble, footer,
};
use crate::error::{HelpError, MissingCapabilitySnafu};

/// Read-only view of one command registered with the host framework.
pub trait RegisteredCommand {
    fn name(&self) -> &str;
    fn aliases(&self) -> &[String];
    fn help_text(&self) -> Option<&str>;
    /// Owning category, if any.
    fn category(&self) -> Option<&str>;

    fn signature(&self) -> Option<String> {
        None
    }

    fn snapshot(&self) -> CommandDescriptor {
        CommandDescriptor {
            name: self.name().to_owned(),
            aliases: self.aliases().to_vec(),
            help_text: self.help_text().map(str::to_owned),
            category: self.category().map(str::to_owned),
            signature: self.signature(),
        }
    }
}

pub struct CategoryView<'a, C> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub commands: Vec<&'a C>,
}

/// Read-only view of a bot's command set. Nothing here mutates the host.
pub trait CommandRegistry {
    type Command: RegisteredCommand;

    /// Every registered command, categorized or not.
    fn commands(&self) -> Result<Vec<&Self::Command>, HelpError>;

    /// Categories in discovery order. Registries that cannot group their
    /// commands fail the render instead of producing an empty catalog.
    fn categories(&self) -> Result<Vec<CategoryView<'_, Self::Command>>, HelpError> {
        MissingCapabilitySnafu {
            capability: "category enumeration",
        }
        .fail()
    }

    /// Display name used in the default catalog title.
    fn bot_name(&self) -> Option<&str> {
        None
    }
}

/// Snapshots the registry into categories. Every command from the flat list
/// is routed by its own owning category; the category views only supply order
/// and descriptions. Uncategorized commands go to a trailing synthetic category.
pub fn collect_categories<R: CommandRegistry>(registry: &R) -> Result<Vec<Category>, HelpError> {
    let mut categories = registry
        .categories()?
        .into_iter()
        .map(|view| Category {
            name: Some(view.name.to_owned()),
            description: view.description.map(str::to_owned),
            commands: Vec::new(),
        })
        .collect::<Vec<_>>();
    let listed = categories
        .iter()
        .filter_map(|c| c.name.clone())
        .collect::<HashSet<_>>();
    let mut uncategorized = Category::uncategorized();
    for command in registry.commands()? {
        let Some(name) = command.category() else {
            uncategorized.commands.push(command.snapshot());
            continue;
        };
        if !listed.contains(name) {
            warn!(
                command = command.name(),
                category = name,
                "command belongs to a category the registry does not list"
            );
        }
        match categories
            .iter_mut()
            .find(|c| c.name.as_deref() == Some(name))
        {
            Some(category) => category.commands.push(command.snapshot()),
            None => categories.push(Category::new(name).with_commands([command.snapshot()])),
        }
    }
    categories.push(uncategorized);
    Ok(categories)
}

fn catalog_title<R: CommandRegistry>(registry: &R) -> String {
    match registry.bot_name() {
        Some(name) => format!("{BOOKS} {name} - Commands"),
        None => format!("{BOOKS} Commands"),
    }
}

/// The full catalog of a live registry.
pub fn render_registry<R: CommandRegistry>(
    registry: &R,
    options: &RenderOptions,
) -> Result<RenderedCatalog, HelpError> {
    let categories = collect_categories(registry)?;
    let header = options.header(
        catalog_title(registry),
        format!(
            "Here are all available commands (Prefix: `{}`)",
            options.prefix
        ),
    );
    Ok(assemble(header, &categories, options))
}

/// One category of the registry, or `None` when no category has that name.
pub fn render_category<R: CommandRegistry>(
    registry: &R,
    name: &str,
    options: &RenderOptions,
) -> Result<Option<RenderedCatalog>, HelpError> {
    let Some(category) = collect_categories(registry)?
        .into_iter()
        .find(|c| c.name.as_deref() == Some(name))
    else {
        return Ok(None);
    };
    let header = options.header(
        format!("{FOLDER} {name}"),
        category
            .description
            .clone()
            .unwrap_or_else(|| format!("Prefix: `{}`", options.prefix)),
    );
    Ok(Some(assemble(header, &[category], options)))
}

/// Overview with one inline section per category holding its command count.
pub fn render_categories<R: CommandRegistry>(
    registry: &R,
    options: &RenderOptions,
) -> Result<RenderedCatalog, HelpError> {
    let categories = collect_categories(registry)?;
    let header = options.header(
        format!("{FOLDER} Command categories"),
        format!("Use `{}help <category>` for details", options.prefix),
    );
    let sections = categories
        .iter()
        .filter(|c| !c.commands.is_empty())
        .map(|c| match &c.name {
            Some(name) => Section::inline(
                format!("{FOLDER} {name}"),
                format!(
                    "{} commands\n{}",
                    c.commands.len(),
                    options.help_or(c.description.as_deref())
                ),
            )
            .with_count(c.commands.len()),
            None => Section::inline(
                format!("{MEMO} General"),
                format!("{} commands", c.commands.len()),
            )
            .with_count(c.commands.len()),
        })
        .collect();
    let total = categories.iter().map(|c| c.commands.len()).sum();
    Ok(RenderedCatalog {
        title: header.title,
        description: header.description,
        accent: options.accent,
        sections,
        footer: Some(footer(total)),
        total,
    })
}

/// Finds a command by name or alias.
pub fn find_command<R: CommandRegistry>(
    registry: &R,
    query: &str,
) -> Result<Option<CommandDescriptor>, HelpError> {
    Ok(registry
        .commands()?
        .into_iter()
        .find(|c| c.name() == query || c.aliases().iter().any(|a| a == query))
        .map(RegisteredCommand::snapshot))
}

/// Detail page for a single command: usage, aliases and owning category.
pub fn render_command_detail(command: &CommandDescriptor, options: &RenderOptions) -> RenderedCatalog {
    let prefix = &options.prefix;
    let mut sections = vec![Section::block(
        format!("{MEMO} Usage"),
        format!("`{}`", command.usage(prefix)),
    )];
    if !command.aliases.is_empty() {
        sections.push(Section::block(
            "🔗 Aliases",
            command
                .aliases
                .iter()
                .map(|alias| format!("`{prefix}{alias}`"))
                .join(", "),
        ));
    }
    if let Some(category) = &command.category {
        sections.push(Section::inline(format!("{FOLDER} Category"), category.as_str()));
    }
    RenderedCatalog {
        title: format!("ℹ️ Command: {prefix}{}", command.name),
        description: options.help_or(command.help_text.as_deref()).to_owned(),
        accent: options.accent,
        sections,
        footer: None,
        total: 1,
    }
}
