use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::DadlyError;
use crate::model::Recipe;

/// Field a recipe list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Alphabetical,
    PrepTime,
    CookTime,
    TotalTime,
    Difficulty,
    Popularity,
    RecentlySaved,
    YourRating,
}

impl SortKey {
    pub const ALL_KEYS: [SortKey; 8] = [
        SortKey::Alphabetical,
        SortKey::PrepTime,
        SortKey::CookTime,
        SortKey::TotalTime,
        SortKey::Difficulty,
        SortKey::Popularity,
        SortKey::RecentlySaved,
        SortKey::YourRating,
    ];

    /// Menu label, e.g. `Recently saved`.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Alphabetical => "Alphabetical",
            SortKey::PrepTime => "Prep time",
            SortKey::CookTime => "Cook time",
            SortKey::TotalTime => "Total time",
            SortKey::Difficulty => "Difficulty",
            SortKey::Popularity => "Popularity",
            SortKey::RecentlySaved => "Recently saved",
            SortKey::YourRating => "Your rating",
        }
    }

    /// Command-line spelling, e.g. `recently-saved`.
    pub fn slug(&self) -> &'static str {
        match self {
            SortKey::Alphabetical => "alphabetical",
            SortKey::PrepTime => "prep-time",
            SortKey::CookTime => "cook-time",
            SortKey::TotalTime => "total-time",
            SortKey::Difficulty => "difficulty",
            SortKey::Popularity => "popularity",
            SortKey::RecentlySaved => "recently-saved",
            SortKey::YourRating => "your-rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses either the menu label (`Total time`) or the slug (`total-time`).
impl FromStr for SortKey {
    type Err = DadlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        SortKey::ALL_KEYS
            .into_iter()
            .find(|key| key.slug() == wanted)
            .ok_or_else(|| DadlyError::InvalidArgument(format!("unknown sort key '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = DadlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortOrder::Ascending),
            "descending" | "desc" => Ok(SortOrder::Descending),
            other => Err(DadlyError::InvalidArgument(format!(
                "unknown sort order '{other}'"
            ))),
        }
    }
}

/// Sort key plus direction. Defaults to most recently saved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortOrder::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortOrder::Descending)
    }

    /// Compare two recipes under this spec.
    pub fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        let natural = compare_by_key(self.key, a, b);
        match self.order {
            SortOrder::Ascending => natural,
            SortOrder::Descending => natural.reverse(),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::descending(SortKey::RecentlySaved)
    }
}

/// Ordinal weight of a difficulty: easy < medium < hard, anything else 0.
pub fn difficulty_weight(difficulty: Option<&str>) -> u8 {
    match difficulty.map(|d| d.trim().to_lowercase()).as_deref() {
        Some("easy") => 1,
        Some("medium") => 2,
        Some("hard") => 3,
        _ => 0,
    }
}

/// Collator-style comparison of display names.
///
/// Letters compare without accents or case first (`Éclair` sits with the
/// e's). Names that only differ by accents put the unaccented one first,
/// and names that only differ by case put lowercase first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| folded(a).cmp(&folded(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn folded(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}

fn compare_by_key(key: SortKey, a: &Recipe, b: &Recipe) -> Ordering {
    match key {
        SortKey::Alphabetical => locale_cmp(&a.name, &b.name),
        SortKey::PrepTime => a.prep_minutes().cmp(&b.prep_minutes()),
        SortKey::CookTime => a.cook_minutes().cmp(&b.cook_minutes()),
        SortKey::TotalTime => a.total_minutes().cmp(&b.total_minutes()),
        SortKey::Difficulty => difficulty_weight(a.difficulty.as_deref())
            .cmp(&difficulty_weight(b.difficulty.as_deref())),
        SortKey::Popularity => a.likes().cmp(&b.likes()),
        SortKey::RecentlySaved => a.saved_millis().cmp(&b.saved_millis()),
        SortKey::YourRating => a
            .rating
            .unwrap_or(0.0)
            .total_cmp(&b.rating.unwrap_or(0.0)),
    }
}

/// Stable in-place sort; equal recipes keep their input order.
pub fn sort_recipes<R: Borrow<Recipe>>(recipes: &mut [R], spec: SortSpec) {
    recipes.sort_by(|a, b| spec.compare(a.borrow(), b.borrow()));
}
