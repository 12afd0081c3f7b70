//! Portfolio content: the document the terminal page renders
//!
//! Content is plain TOML. A sample document ships with the crate and is used
//! when no content file is configured.

mod models;

use std::collections::HashSet;
use std::path::Path;

pub use models::{Block, BlockId, Hero, Portfolio, Section};

use crate::{Error, Result};

const SAMPLE: &str = include_str!("../../assets/portfolio.toml");

impl Portfolio {
    /// The bundled sample portfolio
    pub fn sample() -> Self {
        // The sample is validated by tests; fall back to a bare hero if a
        // broken edit ever slips through.
        Self::from_toml(SAMPLE).unwrap_or_else(|e| {
            tracing::error!("Bundled portfolio is invalid: {}", e);
            Portfolio {
                hero: Hero {
                    name: "folio".to_string(),
                    greeting: None,
                    phrases: Vec::new(),
                    tagline: None,
                },
                sections: Vec::new(),
            }
        })
    }

    pub fn sample_toml() -> &'static str {
        SAMPLE
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(content)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| Error::Content(format!("{}: {}", path.display(), e)))
    }

    /// Load `path` if given, otherwise the bundled sample
    pub fn load_or_sample(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::sample()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.hero.name.trim().is_empty() {
            return Err(Error::Content("hero name is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(Error::Content(format!(
                    "section '{}' has an empty id",
                    section.title
                )));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(Error::Content(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
        }
        Ok(())
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.sections.get(id.section)?.blocks.get(id.block)
    }

    /// Every block id in document order
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.sections.iter().enumerate().flat_map(|(s, section)| {
            (0..section.blocks.len()).map(move |b| BlockId::new(s, b))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let portfolio = Portfolio::from_toml(Portfolio::sample_toml()).unwrap();
        assert!(!portfolio.sections.is_empty());
        assert!(!portfolio.hero.phrases.is_empty());
        assert!(portfolio
            .block_ids()
            .any(|id| portfolio.block(id).and_then(Block::counter_target).is_some()));
        assert!(portfolio
            .block_ids()
            .any(|id| portfolio.block(id).and_then(Block::copy_text).is_some()));
    }

    #[test]
    fn test_parse_blocks() {
        let portfolio = Portfolio::from_toml(
            r#"
            [hero]
            name = "Ada"
            phrases = ["Engines"]

            [[section]]
            id = "about"
            title = "About Me"
            nav_label = "About"

            [[section.block]]
            kind = "stat"
            label = "Projects"
            target = 42

            [[section.block]]
            kind = "contact"
            label = "Email"
            value = "ada@example.com"
            link = "mailto:ada@example.com"
            "#,
        )
        .unwrap();

        let section = &portfolio.sections[0];
        assert_eq!(section.nav_label(), "About");
        assert_eq!(section.blocks[0].counter_target(), Some(42));
        assert_eq!(section.blocks[1].copy_text(), Some("ada@example.com"));
        assert_eq!(section.blocks[1].link(), Some("mailto:ada@example.com"));
        assert_eq!(portfolio.section_index("about"), Some(0));
        assert_eq!(
            portfolio.block_ids().collect::<Vec<_>>(),
            vec![BlockId::new(0, 0), BlockId::new(0, 1)]
        );
    }

    #[test]
    fn test_duplicate_section_ids_are_rejected() {
        let err = Portfolio::from_toml(
            r#"
            [hero]
            name = "Ada"
            [[section]]
            id = "x"
            title = "One"
            [[section]]
            id = "x"
            title = "Two"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Content(_)));
    }

    #[test]
    fn test_unknown_block_kind_is_an_error() {
        let err = Portfolio::from_toml(
            r#"
            [hero]
            name = "Ada"
            [[section]]
            id = "x"
            title = "One"
            [[section.block]]
            kind = "carousel"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_nav_label_defaults_to_title() {
        let section = Section {
            id: "work".to_string(),
            title: "Work".to_string(),
            nav_label: None,
            blocks: Vec::new(),
        };
        assert_eq!(section.nav_label(), "Work");
    }
}
