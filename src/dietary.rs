//! Heuristic dietary labels derived from recipe text.
//!
//! Matching is plain substring search over the lowercased name,
//! description and ingredients. That over-matches ("eggplant" contains
//! "egg", "graham" contains "ham") and is kept as is: the labels are a
//! browsing aid, not an allergen guarantee.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DadlyError;
use crate::model::Recipe;
use crate::normalize::lowercase_blob;

pub const MEAT_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "bacon", "ham", "turkey", "fish", "shrimp", "anchovy",
    "salmon", "tuna",
];

pub const DAIRY_KEYWORDS: &[&str] = &[
    "cheese",
    "milk",
    "butter",
    "cream",
    "yogurt",
    "ghee",
    "mozzarella",
    "parmesan",
];

pub const EGG_HONEY_KEYWORDS: &[&str] = &["egg", "yolk", "honey", "mayonnaise"];

pub const GLUTEN_KEYWORDS: &[&str] = &["wheat", "flour", "bread", "pasta", "soy sauce", "barley"];

/// A dietary label shown as a filter chip.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    All,
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
}

impl DietaryTag {
    /// Every tag, in filter-bar order.
    pub const ALL_TAGS: [DietaryTag; 5] = [
        DietaryTag::All,
        DietaryTag::Vegetarian,
        DietaryTag::Vegan,
        DietaryTag::GlutenFree,
        DietaryTag::DairyFree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryTag::All => "all",
            DietaryTag::Vegetarian => "vegetarian",
            DietaryTag::Vegan => "vegan",
            DietaryTag::GlutenFree => "gluten-free",
            DietaryTag::DairyFree => "dairy-free",
        }
    }

    /// Human-readable label, e.g. `Gluten-Free`.
    pub fn label(&self) -> &'static str {
        match self {
            DietaryTag::All => "All",
            DietaryTag::Vegetarian => "Vegetarian",
            DietaryTag::Vegan => "Vegan",
            DietaryTag::GlutenFree => "Gluten-Free",
            DietaryTag::DairyFree => "Dairy-Free",
        }
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryTag {
    type Err = DadlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        DietaryTag::ALL_TAGS
            .into_iter()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| DadlyError::InvalidArgument(format!("unknown dietary tag '{s}'")))
    }
}

/// The set of labels that apply to one recipe. Always contains `all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DietaryTags(BTreeSet<DietaryTag>);

impl DietaryTags {
    pub fn contains(&self, tag: DietaryTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = DietaryTag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(|tag| tag.as_str()).collect()
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Lowercase text the classifier searches: name, description and every
/// normalized ingredient, space-joined.
pub fn recipe_text(recipe: &Recipe) -> String {
    let parts = [recipe.name.as_str(), recipe.description.as_deref().unwrap_or("")]
        .into_iter()
        .chain(recipe.ingredients.iter().map(String::as_str));
    lowercase_blob(parts)
}

/// Derive the dietary labels of a recipe.
pub fn classify(recipe: &Recipe) -> DietaryTags {
    let text = recipe_text(recipe);
    let mut tags = BTreeSet::from([DietaryTag::All]);

    let has_dairy = contains_any(&text, DAIRY_KEYWORDS);
    let vegetarian = !text.is_empty() && !contains_any(&text, MEAT_KEYWORDS);

    if vegetarian {
        tags.insert(DietaryTag::Vegetarian);
        if !has_dairy && !contains_any(&text, EGG_HONEY_KEYWORDS) {
            tags.insert(DietaryTag::Vegan);
        }
    }
    if !contains_any(&text, GLUTEN_KEYWORDS) {
        tags.insert(DietaryTag::GlutenFree);
    }
    if !has_dairy {
        tags.insert(DietaryTag::DairyFree);
    }

    DietaryTags(tags)
}

/// A recipe together with the labels derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub dietary_tags: DietaryTags,
}

impl TaggedRecipe {
    pub fn new(recipe: Recipe) -> Self {
        let dietary_tags = classify(&recipe);
        Self {
            recipe,
            dietary_tags,
        }
    }
}

impl std::borrow::Borrow<Recipe> for TaggedRecipe {
    fn borrow(&self) -> &Recipe {
        &self.recipe
    }
}

/// Attach labels to every recipe of a freshly fetched batch.
pub fn tag_recipes(recipes: Vec<Recipe>) -> Vec<TaggedRecipe> {
    recipes.into_iter().map(TaggedRecipe::new).collect()
}

/// Tagged recipes carrying `tag`; `all` keeps everything.
pub fn with_tag(recipes: &[TaggedRecipe], tag: DietaryTag) -> Vec<&TaggedRecipe> {
    recipes
        .iter()
        .filter(|tagged| tag == DietaryTag::All || tagged.dietary_tags.contains(tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_recipe_is_not_vegetarian() {
        let tags = classify(&Recipe::default());
        assert_eq!(
            tags.labels(),
            vec!["all", "gluten-free", "dairy-free"]
        );
    }

    #[test]
    fn test_dairy_blocks_vegan_but_not_vegetarian() {
        let tags = classify(&recipe("Mac", &["macaroni", "cheese"]));
        assert!(tags.contains(DietaryTag::Vegetarian));
        assert!(!tags.contains(DietaryTag::Vegan));
        assert!(!tags.contains(DietaryTag::DairyFree));
    }

    #[test]
    fn test_honey_blocks_vegan_only() {
        let tags = classify(&recipe("Granola", &["oats", "honey"]));
        assert!(tags.contains(DietaryTag::Vegetarian));
        assert!(!tags.contains(DietaryTag::Vegan));
        assert!(tags.contains(DietaryTag::DairyFree));
    }

    #[test]
    fn test_description_counts() {
        let mut soup = recipe("Soup", &["water", "carrot"]);
        soup.description = Some("Finished with BACON bits".to_string());
        assert!(!classify(&soup).contains(DietaryTag::Vegetarian));
    }

    #[test]
    fn test_substring_matching_is_preserved() {
        let tags = classify(&recipe("Roasted eggplant", &["eggplant", "olive oil"]));
        assert!(tags.contains(DietaryTag::Vegetarian));
        assert!(!tags.contains(DietaryTag::Vegan));
    }

    #[test]
    fn test_soy_sauce_is_gluten() {
        let tags = classify(&recipe("Stir fry", &["tofu", "soy sauce"]));
        assert!(!tags.contains(DietaryTag::GlutenFree));
        assert!(tags.contains(DietaryTag::Vegan));
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!("Gluten_Free".parse::<DietaryTag>().unwrap(), DietaryTag::GlutenFree);
        assert_eq!("dairy free".parse::<DietaryTag>().unwrap(), DietaryTag::DairyFree);
        assert!("keto".parse::<DietaryTag>().is_err());
    }

    #[test]
    fn test_with_tag_filters_tagged_batch() {
        let batch = tag_recipes(vec![
            recipe("Salad", &["lettuce"]),
            recipe("Steak", &["beef"]),
        ]);
        assert_eq!(with_tag(&batch, DietaryTag::All).len(), 2);
        let vegan = with_tag(&batch, DietaryTag::Vegan);
        assert_eq!(vegan.len(), 1);
        assert_eq!(vegan[0].recipe.name, "Salad");
    }
}
