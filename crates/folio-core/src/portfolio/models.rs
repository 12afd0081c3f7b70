use serde::{Deserialize, Serialize};

/// Whole portfolio document: hero banner followed by sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub hero: Hero,
    #[serde(default, rename = "section")]
    pub sections: Vec<Section>,
}

/// Landing banner shown above the first section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    #[serde(default)]
    pub greeting: Option<String>,
    /// Phrases cycled by the typing effect
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Anchor used by nav links, unique within the document
    pub id: String,
    pub title: String,
    /// Nav link text, defaults to the title
    #[serde(default)]
    pub nav_label: Option<String>,
    #[serde(default, rename = "block")]
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn nav_label(&self) -> &str {
        self.nav_label.as_deref().unwrap_or(&self.title)
    }
}

/// A visual block inside a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Text {
        body: String,
    },
    /// Number that counts up when first shown
    Stat {
        label: String,
        /// Static value shown when there is no numeric target
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        target: Option<i64>,
    },
    Card {
        title: String,
        #[serde(default)]
        subtitle: Option<String>,
        #[serde(default)]
        body: Option<String>,
        #[serde(default)]
        tags: Vec<String>,
        #[serde(default)]
        link: Option<String>,
    },
    Timeline {
        period: String,
        title: String,
        #[serde(default)]
        org: Option<String>,
        #[serde(default)]
        body: Option<String>,
    },
    Contact {
        label: String,
        value: String,
        /// Text put on the clipboard, defaults to the value
        #[serde(default)]
        copy: Option<String>,
        #[serde(default)]
        link: Option<String>,
    },
}

impl Block {
    /// Numeric target of a stat block
    pub fn counter_target(&self) -> Option<i64> {
        match self {
            Block::Stat { target, .. } => *target,
            _ => None,
        }
    }

    /// Text copied when the block is activated
    pub fn copy_text(&self) -> Option<&str> {
        match self {
            Block::Contact { copy, value, .. } => Some(copy.as_deref().unwrap_or(value)),
            _ => None,
        }
    }

    /// External link opened when the block is activated
    pub fn link(&self) -> Option<&str> {
        match self {
            Block::Card { link, .. } | Block::Contact { link, .. } => link.as_deref(),
            _ => None,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.copy_text().is_some() || self.link().is_some()
    }
}

/// Position of a block in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId {
    pub section: usize,
    pub block: usize,
}

impl BlockId {
    pub fn new(section: usize, block: usize) -> Self {
        Self { section, block }
    }
}
