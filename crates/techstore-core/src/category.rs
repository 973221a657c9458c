//! Product categories known to the catalog API and their display labels.

use serde::{Deserialize, Serialize};

/// A catalog category slug, as accepted by the API's `category` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    Motherboard,
    Ram,
    Psu,
    Storage,
    Monitor,
    Others,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Psu,
        Category::Storage,
        Category::Monitor,
        Category::Others,
    ];

    /// The slug sent to the API, e.g. `"psu"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Ram => "ram",
            Category::Psu => "psu",
            Category::Storage => "storage",
            Category::Monitor => "monitor",
            Category::Others => "others",
        }
    }

    /// Human-readable label shown on product pages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Cpu => "Processor",
            Category::Motherboard => "Motherboard",
            Category::Ram => "Ram",
            Category::Psu => "Power Supply",
            Category::Storage => "Storage",
            Category::Monitor => "Monitor",
            Category::Others => "Others",
        }
    }

    /// Exact, case-sensitive slug match.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == slug)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
            format!("unknown category \"{s}\"; expected one of {}", known.join(", "))
        })
    }
}

/// Maps a raw category string from the API to its display label.
///
/// Anything outside the known slugs (including the empty string) is `"Unknown"`.
#[must_use]
pub fn category_label(raw: &str) -> &'static str {
    Category::from_slug(raw).map_or("Unknown", Category::label)
}
