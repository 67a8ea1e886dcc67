use indexmap::IndexMap;
use serde_json::Value;

use super::{BOOKS, Category, CommandDescriptor, RenderOptions, RenderedCatalog, assemble};
use crate::error::{HelpError, MalformedInputSnafu};

/// Category name to ordered `(command, description)` pairs, kept in the order
/// the categories were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredCatalog(IndexMap<String, Vec<(String, String)>>);

impl DeclaredCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category. Re-declaring a name replaces its commands but keeps
    /// its original position.
    pub fn category<N, I, C, D>(mut self, name: N, commands: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (C, D)>,
        C: Into<String>,
        D: Into<String>,
    {
        self.0.insert(
            name.into(),
            commands
                .into_iter()
                .map(|(c, d)| (c.into(), d.into()))
                .collect(),
        );
        self
    }

    pub fn from_json(json: &str) -> Result<Self, HelpError> {
        let value = serde_json::from_str::<Value>(json)?;
        Self::from_value(&value)
    }

    /// Accepts `{"Category": [["name", "description"], {"name": .., "description": ..}]}`.
    /// Any malformed entry rejects the whole catalog.
    pub fn from_value(value: &Value) -> Result<Self, HelpError> {
        let Value::Object(categories) = value else {
            return MalformedInputSnafu {
                entry: "<root>",
                reason: "expected an object mapping category names to command lists",
            }
            .fail();
        };
        let mut catalog = IndexMap::with_capacity(categories.len());
        for (name, commands) in categories {
            let Value::Array(commands) = commands else {
                return MalformedInputSnafu {
                    entry: name.as_str(),
                    reason: "expected a list of commands",
                }
                .fail();
            };
            let commands = commands
                .iter()
                .enumerate()
                .map(|(index, command)| {
                    parse_pair(command).map_err(|reason| {
                        MalformedInputSnafu {
                            entry: format!("{name}[{index}]"),
                            reason,
                        }
                        .build()
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            catalog.insert(name.clone(), commands);
        }
        Ok(Self(catalog))
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn categories(&self) -> Vec<Category> {
        self.0
            .iter()
            .map(|(name, commands)| {
                Category::new(name.as_str()).with_commands(commands.iter().map(
                    |(command, description)| {
                        CommandDescriptor::new(command.as_str())
                            .with_help(description.as_str())
                            .with_category(name.as_str())
                    },
                ))
            })
            .collect()
    }
}

fn parse_pair(command: &Value) -> Result<(String, String), String> {
    let (name, description) = match command {
        Value::Array(pair) => match pair.as_slice() {
            [name, description] => (name.as_str(), description.as_str()),
            _ => return Err(format!("expected a [name, description] pair, got {} items", pair.len())),
        },
        Value::Object(fields) => (
            fields.get("name").and_then(Value::as_str),
            fields.get("description").and_then(Value::as_str),
        ),
        other => return Err(format!("expected a [name, description] pair, got `{other}`")),
    };
    let name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or("command name must be a non-empty string")?;
    let description = description.ok_or("description must be a string")?;
    Ok((name.to_owned(), description.to_owned()))
}

/// Renders a catalog that needs no live bot. There is no uncategorized bucket:
/// every command is declared under some category.
pub fn render_declared(catalog: &DeclaredCatalog, options: &RenderOptions) -> RenderedCatalog {
    let header = options.header(
        format!("{BOOKS} Commands"),
        format!("Prefix: `{}`", options.prefix),
    );
    assemble(header, &catalog.categories(), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> DeclaredCatalog {
        DeclaredCatalog::new()
            .category("Info", [("ping", "Shows latency"), ("info", "Bot info")])
            .category("Fun", [("test", "Test command")])
    }

    #[test]
    fn test_render_declared_example() {
        let catalog = render_declared(&example(), &RenderOptions::default());
        assert_eq!(catalog.title, "📚 Commands");
        assert_eq!(catalog.description, "Prefix: `!`");
        assert_eq!(catalog.sections.len(), 2);
        assert_eq!(catalog.sections[0].heading, "📁 Info");
        assert_eq!(
            catalog.sections[0].body,
            "`!ping` - Shows latency\n`!info` - Bot info"
        );
        assert_eq!(catalog.sections[1].heading, "📁 Fun");
        assert_eq!(catalog.total, 3);
        assert_eq!(catalog.footer.as_deref(), Some("Total: 3 commands"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let options = RenderOptions::default().with_prefix("?");
        assert_eq!(
            render_declared(&example(), &options),
            render_declared(&example(), &options)
        );
    }

    #[test]
    fn test_from_json_preserves_order() {
        let catalog = DeclaredCatalog::from_json(
            r#"{
                "B": [["b", "second letter"]],
                "A": [{"name": "a", "description": "first letter"}],
                "C": [["c", ""]]
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 3);
        let rendered = render_declared(&catalog, &RenderOptions::default());
        let headings = rendered
            .sections
            .iter()
            .map(|s| s.heading.as_str())
            .collect::<Vec<_>>();
        assert_eq!(headings, ["📁 B", "📁 A", "📁 C"]);
        assert_eq!(rendered.sections[2].body, "`!c` - no description available");
    }

    #[test]
    fn test_malformed_entry_names_location() {
        let err = DeclaredCatalog::from_json(r#"{"Info": [["ping", "ok"]], "Fun": [["test"]]}"#)
            .unwrap_err();
        match err {
            HelpError::MalformedInput { entry, .. } => assert_eq!(entry, "Fun[0]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_shapes_are_rejected() {
        for json in [
            r#"[["ping", "x"]]"#,
            r#"{"Info": "ping"}"#,
            r#"{"Info": [[1, "x"]]}"#,
            r#"{"Info": [["", "x"]]}"#,
            r#"{"Info": [{"name": "ping"}]}"#,
            r#"{"Info": ["ping"]}"#,
        ] {
            assert!(
                matches!(
                    DeclaredCatalog::from_json(json),
                    Err(HelpError::MalformedInput { .. })
                ),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = DeclaredCatalog::from_json("{}").unwrap();
        assert!(catalog.is_empty());
        let rendered = render_declared(&catalog, &RenderOptions::default());
        assert!(rendered.sections.is_empty());
        assert_eq!(rendered.footer.as_deref(), Some("Total: 0 commands"));
    }
}
