//! Command catalog rendering.
//!
//! Both entry modes reduce their input to an ordered list of [`Category`] and
//! hand it to the section assembler, which produces the [`RenderedCatalog`] that the
//! embed bridge and the console renderer consume.

mod declarative;
mod embed;
mod reflective;

use const_format::formatcp;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use tracing::debug;

pub use declarative::{DeclaredCatalog, render_declared};
pub use reflective::{
    CategoryView, CommandRegistry, RegisteredCommand, collect_categories, find_command,
    render_categories, render_category, render_command_detail, render_registry,
};

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_FALLBACK: &str = "no description available";
/// Discord blurple.
pub const DEFAULT_ACCENT: u32 = 0x5865F2;

pub(crate) const FOLDER: &str = "📁";
pub(crate) const MEMO: &str = "📝";
pub(crate) const BOOKS: &str = "📚";
pub const UNCATEGORIZED_HEADING: &str = formatcp!("{} Commands", MEMO);

/// Per-call render settings, resolved once before any section is built.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub prefix: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_accent")]
    pub accent: u32,
    /// Substituted for absent or blank help text.
    pub fallback: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            title: None,
            description: None,
            accent: DEFAULT_ACCENT,
            fallback: DEFAULT_FALLBACK.to_owned(),
        }
    }
}

impl RenderOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_accent(mut self, accent: u32) -> Self {
        self.accent = accent;
        self
    }

    pub(crate) fn header(&self, title: String, description: String) -> Header {
        Header {
            title: self.title.clone().unwrap_or(title),
            description: self.description.clone().unwrap_or(description),
        }
    }

    pub(crate) fn help_or<'a>(&'a self, help: Option<&'a str>) -> &'a str {
        help.filter(|h| !h.trim().is_empty())
            .unwrap_or(&self.fallback)
    }
}

/// Accepts either a plain number or a `#RRGGBB` / `0xRRGGBB` string.
fn deserialize_accent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Accent {
        Value(u32),
        Hex(String),
    }
    match Accent::deserialize(deserializer)? {
        Accent::Value(value) => Ok(value),
        Accent::Hex(hex) => {
            let digits = hex
                .trim()
                .trim_start_matches('#')
                .trim_start_matches("0x");
            u32::from_str_radix(digits, 16)
                .map_err(|e| D::Error::custom(format!("invalid accent colour `{hex}`: {e}")))
        }
    }
}

/// Render-time snapshot of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: String,
    pub aliases: Vec<String>,
    pub help_text: Option<String>,
    pub category: Option<String>,
    pub signature: Option<String>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// `prefix + name [+ signature]`
    pub fn usage(&self, prefix: &str) -> String {
        match self.signature.as_deref().filter(|s| !s.is_empty()) {
            Some(signature) => format!("{prefix}{} {signature}", self.name),
            None => format!("{prefix}{}", self.name),
        }
    }
}

/// A named group of commands. `name == None` is the synthetic bucket for
/// commands that belong to no category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    pub name: Option<String>,
    pub description: Option<String>,
    pub commands: Vec<CommandDescriptor>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn uncategorized() -> Self {
        Self::default()
    }

    pub fn with_commands(mut self, commands: impl IntoIterator<Item = CommandDescriptor>) -> Self {
        self.commands.extend(commands);
        self
    }

    pub fn heading(&self) -> String {
        match &self.name {
            Some(name) => format!("{FOLDER} {name}"),
            None => UNCATEGORIZED_HEADING.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    pub body: String,
    pub inline: bool,
    /// Commands listed or counted in this section; zero for detail sections.
    pub count: usize,
}

impl Section {
    pub fn block(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
            inline: false,
            count: 0,
        }
    }

    pub fn inline(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::block(heading, body)
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// The finished help page. Catalog renders always carry a footer with the
/// command total; single-command detail pages do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCatalog {
    pub title: String,
    pub description: String,
    pub accent: u32,
    pub sections: Vec<Section>,
    pub footer: Option<String>,
    pub total: usize,
}

pub(crate) struct Header {
    pub title: String,
    pub description: String,
}

pub fn footer(total: usize) -> String {
    format!("Total: {total} commands")
}

/// Formats one command as `` `<prefix><name>[ [a, b]]` - <help> ``.
///
/// Nothing is escaped: names containing backticks or markdown produce broken
/// markup.
pub fn format_line(command: &CommandDescriptor, prefix: &str, fallback: &str) -> String {
    let aliases = if command.aliases.is_empty() {
        String::new()
    } else {
        format!(" [{}]", command.aliases.iter().join(", "))
    };
    let help = command
        .help_text
        .as_deref()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or(fallback);
    format!("`{prefix}{}{aliases}` - {help}", command.name)
}

/// Groups formatted lines under category headings, in the order given.
/// Empty categories emit no section.
pub(crate) fn assemble(
    header: Header,
    categories: &[Category],
    options: &RenderOptions,
) -> RenderedCatalog {
    let sections = categories
        .iter()
        .filter(|category| !category.commands.is_empty())
        .map(|category| {
            let body = category
                .commands
                .iter()
                .map(|command| format_line(command, &options.prefix, &options.fallback))
                .join("\n");
            Section::block(category.heading(), body).with_count(category.commands.len())
        })
        .collect::<Vec<_>>();
    let total = categories.iter().map(|c| c.commands.len()).sum::<usize>();
    debug!(sections = sections.len(), total, "assembled help catalog");
    RenderedCatalog {
        title: header.title,
        description: header.description,
        accent: options.accent,
        sections,
        footer: Some(footer(total)),
        total,
    }
}
