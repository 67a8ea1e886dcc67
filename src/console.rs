//! ANSI console rendering of help catalogs.

use itertools::Itertools;
use owo_colors::OwoColorize as _;
use tracing::info;
use unicode_width::UnicodeWidthStr as _;

use crate::catalog::RenderedCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Fail,
}

/// `[  OK  ] label` style line for startup logs.
pub fn status_line(label: &str, status: Status, colored: bool) -> String {
    let tag = match status {
        Status::Ok => "  OK  ",
        Status::Warn => " WARN ",
        Status::Fail => " FAIL ",
    };
    if !colored {
        return format!("[{tag}] {label}");
    }
    let tag = match status {
        Status::Ok => tag.green().bold().to_string(),
        Status::Warn => tag.yellow().bold().to_string(),
        Status::Fail => tag.red().bold().to_string(),
    };
    format!("[{tag}] {label}")
}

#[derive(Clone, Copy)]
enum Row {
    Title,
    Text,
    Heading,
    Footer,
}

/// Terminal columns taken by `text`, with East Asian wide characters and
/// emoji counted as two.
fn display_width(text: &str) -> usize {
    text.width()
}

fn paint(text: &str, row: Row, colored: bool) -> String {
    if !colored {
        return text.to_owned();
    }
    match row {
        Row::Title => text.bold().to_string(),
        Row::Text => text.to_owned(),
        Row::Heading => text.cyan().bold().to_string(),
        Row::Footer => text.dimmed().to_string(),
    }
}

/// Draws the catalog inside a rounded box. Padding is computed on the plain
/// text so colouring never shifts the right border.
pub fn render_box(catalog: &RenderedCatalog, colored: bool) -> String {
    let mut body = vec![(catalog.title.clone(), Row::Title)];
    body.extend(
        catalog
            .description
            .lines()
            .map(|line| (line.to_owned(), Row::Text)),
    );
    let mut sections = Vec::new();
    for section in &catalog.sections {
        sections.push((section.heading.clone(), Row::Heading));
        sections.extend(section.body.lines().map(|line| (format!("  {line}"), Row::Text)));
    }
    let footer = catalog
        .footer
        .iter()
        .map(|f| (f.clone(), Row::Footer))
        .collect::<Vec<_>>();

    let width = body
        .iter()
        .chain(&sections)
        .chain(&footer)
        .map(|(text, _)| display_width(text))
        .max()
        .unwrap_or(0);
    let rule = "─".repeat(width + 2);
    let row = |(text, kind): &(String, Row)| {
        let pad = " ".repeat(width - display_width(text));
        format!("│ {}{pad} │", paint(text, *kind, colored))
    };

    let mut lines = vec![format!("╭{rule}╮")];
    lines.extend(body.iter().map(row));
    for block in [&sections, &footer] {
        if !block.is_empty() {
            lines.push(format!("├{rule}┤"));
            lines.extend(block.iter().map(row));
        }
    }
    lines.push(format!("╰{rule}╯"));
    lines.join("\n")
}

/// Logs one line per section with its command count, the way a bot prints
/// its loaded cogs at startup.
pub fn log_catalog(catalog: &RenderedCatalog) {
    info!(
        "Help catalog ready: {} commands in {} sections",
        catalog.total.to_string().green(),
        catalog.sections.len()
    );
    for section in &catalog.sections {
        info!("{} ({} commands)", section.heading.green(), section.count);
    }
    info!(
        "Sections: {}",
        catalog.sections.iter().map(|s| &s.heading).join(", ")
    );
}
