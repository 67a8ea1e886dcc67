use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter};

use super::RenderedCatalog;

impl RenderedCatalog {
    pub fn to_embed(&self) -> CreateEmbed {
        let embed = CreateEmbed::new()
            .title(&self.title)
            .description(&self.description)
            .colour(Colour::new(self.accent))
            .fields(
                self.sections
                    .iter()
                    .map(|s| (s.heading.as_str(), s.body.as_str(), s.inline)),
            );
        match &self.footer {
            Some(footer) => embed.footer(CreateEmbedFooter::new(footer)),
            None => embed,
        }
    }
}

impl From<&RenderedCatalog> for CreateEmbed {
    fn from(catalog: &RenderedCatalog) -> Self {
        catalog.to_embed()
    }
}
