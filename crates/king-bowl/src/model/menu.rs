//! Menu dishes and the filters the public menu page applies to them.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for menu dishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dish_{}", self.0)
    }
}

/// Menu sections, in the order the menu page shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Starters,
    Soups,
    Noodles,
    Rice,
    MainCourse,
    DimSum,
    Desserts,
    Beverages,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Starters,
        Category::Soups,
        Category::Noodles,
        Category::Rice,
        Category::MainCourse,
        Category::DimSum,
        Category::Desserts,
        Category::Beverages,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Starters => "Starters",
            Category::Soups => "Soups",
            Category::Noodles => "Noodles",
            Category::Rice => "Rice",
            Category::MainCourse => "Main Course",
            Category::DimSum => "Dim Sum",
            Category::Desserts => "Desserts",
            Category::Beverages => "Beverages",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Heat on the 0-3 scale printed next to each dish.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SpiceLevel {
    #[default]
    Mild,
    Medium,
    Hot,
    ExtraHot,
}

impl SpiceLevel {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(SpiceLevel::Mild),
            1 => Some(SpiceLevel::Medium),
            2 => Some(SpiceLevel::Hot),
            3 => Some(SpiceLevel::ExtraHot),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "Mild",
            SpiceLevel::Medium => "Medium",
            SpiceLevel::Hot => "Hot",
            SpiceLevel::ExtraHot => "Extra Hot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuTag {
    Popular,
    ChefSpecial,
    New,
}

/// A dish on the menu. Static: the catalog is built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    /// Rupees.
    pub price: f64,
    pub category: Category,
    pub is_veg: bool,
    pub spice_level: SpiceLevel,
    pub image: String,
    pub tags: Vec<MenuTag>,
}

impl MenuItem {
    pub fn has_tag(&self, tag: MenuTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Shown in the "featured" strip on the home page.
    pub fn is_featured(&self) -> bool {
        self.has_tag(MenuTag::Popular) || self.has_tag(MenuTag::ChefSpecial)
    }
}

/// Menu page filter. Every set criterion must match.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub category: Option<Category>,
    pub veg_only: bool,
    pub tag: Option<MenuTag>,
    /// Case-insensitive substring of the name or description.
    pub query: Option<String>,
}

impl MenuFilter {
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn veg_only(mut self) -> Self {
        self.veg_only = true;
        self
    }

    pub fn tag(mut self, tag: MenuTag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        if self.category.is_some_and(|category| item.category != category) {
            return false;
        }
        if self.veg_only && !item.is_veg {
            return false;
        }
        if self.tag.is_some_and(|tag| !item.has_tag(tag)) {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                item.name.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query)
            }
            _ => true,
        }
    }
}
