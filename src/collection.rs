//! Recipe list views: filtering plus sorting, and the helpers the user's
//! favourites and ratings pages are built from.

use std::collections::BTreeSet;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::filter::FilterCriteria;
use crate::model::{RatedEntry, Recipe};
use crate::sort::{sort_recipes, SortKey, SortSpec};

/// Apply `criteria` and order the survivors by `sort`.
///
/// Never fails and never drops a recipe for having malformed fields; those
/// simply compare as their neutral default.
pub fn filter_and_sort<'a>(
    recipes: &'a [Recipe],
    criteria: &FilterCriteria,
    sort: SortSpec,
) -> Vec<&'a Recipe> {
    let mut selected: Vec<&Recipe> = recipes
        .iter()
        .filter(|recipe| criteria.matches(recipe))
        .collect();
    sort_recipes(&mut selected, sort);
    debug!(
        "filter_and_sort kept {} of {} recipes, sorted by {} {:?}",
        selected.len(),
        recipes.len(),
        sort.key,
        sort.order
    );
    selected
}

/// Which of the user's saved collections is being shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Favourites,
    Ratings,
}

impl ListType {
    /// Resolve a route segment to a list type; unknown names fall back to
    /// favourites.
    pub fn normalize(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "ratehistory" | "ratings" | "yourratings" => ListType::Ratings,
            _ => ListType::Favourites,
        }
    }

    pub fn default_sort(&self) -> SortKey {
        match self {
            ListType::Favourites => SortKey::RecentlySaved,
            ListType::Ratings => SortKey::YourRating,
        }
    }

    /// Sort keys offered in this list's menu, default first.
    pub fn sort_options(&self) -> &'static [SortKey] {
        match self {
            ListType::Favourites => &[
                SortKey::RecentlySaved,
                SortKey::Alphabetical,
                SortKey::PrepTime,
                SortKey::CookTime,
                SortKey::TotalTime,
                SortKey::Difficulty,
                SortKey::Popularity,
            ],
            ListType::Ratings => &[
                SortKey::YourRating,
                SortKey::Alphabetical,
                SortKey::PrepTime,
                SortKey::CookTime,
                SortKey::TotalTime,
            ],
        }
    }
}

impl FromStr for ListType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ListType::normalize(s))
    }
}

/// Turn rating-history rows into recipes the list view can sort.
///
/// Missing times count as zero, a missing difficulty is `medium` and the
/// rating date stands in for the save date.
pub fn hydrate_ratings(history: &[RatedEntry]) -> Vec<Recipe> {
    history
        .iter()
        .map(|entry| Recipe {
            id: entry.recipe_id(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            image_url: entry.image_url.clone(),
            prep_time: Some(entry.prep_time.unwrap_or(0)),
            cook_time: Some(entry.cook_time.unwrap_or(0)),
            difficulty: Some(
                entry
                    .difficulty
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "medium".to_string()),
            ),
            like_count: entry.like_count,
            rating: entry.rating,
            saved_at: entry.rated_at.clone().or_else(|| entry.saved_at.clone()),
            ..Default::default()
        })
        .collect()
}

/// Every distinct ingredient across `recipes`, lowercased and sorted.
pub fn available_ingredients(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .flat_map(|recipe| recipe.ingredients.iter())
        .map(|item| item.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Display form of a difficulty: `N/A` when absent, underscores become
/// spaces and the first letter is upper-cased.
pub fn format_difficulty(difficulty: Option<&str>) -> String {
    let Some(difficulty) = difficulty.filter(|d| !d.is_empty()) else {
        return "N/A".to_string();
    };
    let spaced = difficulty.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Minutes for display, `—` when unknown.
pub fn format_minutes(minutes: Option<u32>) -> String {
    minutes.map_or_else(|| "—".to_string(), |m| m.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SavedAt;
    use serde_json::json;

    #[test]
    fn test_list_type_aliases() {
        assert_eq!(ListType::normalize("Watchlist"), ListType::Favourites);
        assert_eq!(ListType::normalize("faves"), ListType::Favourites);
        assert_eq!(ListType::normalize("RateHistory"), ListType::Ratings);
        assert_eq!(ListType::normalize("yourratings"), ListType::Ratings);
        assert_eq!(ListType::normalize("anything"), ListType::Favourites);
    }

    #[test]
    fn test_sort_options_start_with_default() {
        for list in [ListType::Favourites, ListType::Ratings] {
            assert_eq!(list.sort_options()[0], list.default_sort());
        }
        assert!(!ListType::Ratings
            .sort_options()
            .contains(&SortKey::Popularity));
    }

    #[test]
    fn test_hydrate_ratings_defaults() {
        let history: Vec<RatedEntry> = serde_json::from_value(json!([
            {"recipe_id": 1, "name": "Stew", "rating": 5, "rated_at": "2024-03-01"},
            {"id": 2, "name": "Toast", "difficulty": "easy", "saved_at": "2024-01-01"}
        ]))
        .unwrap();

        let recipes = hydrate_ratings(&history);
        assert_eq!(recipes[0].id, json!(1));
        assert_eq!(recipes[0].difficulty.as_deref(), Some("medium"));
        assert_eq!(recipes[0].prep_time, Some(0));
        assert_eq!(
            recipes[0].saved_at,
            Some(SavedAt::Text("2024-03-01".to_string()))
        );
        assert_eq!(recipes[1].difficulty.as_deref(), Some("easy"));
        assert_eq!(
            recipes[1].saved_at,
            Some(SavedAt::Text("2024-01-01".to_string()))
        );
    }

    #[test]
    fn test_available_ingredients_dedupes_case() {
        let recipes = vec![
            Recipe {
                ingredients: vec!["Garlic".into(), "onion".into()],
                ..Default::default()
            },
            Recipe {
                ingredients: vec!["garlic".into(), "Basil".into()],
                ..Default::default()
            },
        ];
        assert_eq!(
            available_ingredients(&recipes),
            vec!["basil", "garlic", "onion"]
        );
    }

    #[test]
    fn test_format_difficulty() {
        assert_eq!(format_difficulty(None), "N/A");
        assert_eq!(format_difficulty(Some("")), "N/A");
        assert_eq!(format_difficulty(Some("very_hard")), "Very hard");
        assert_eq!(format_difficulty(Some("easy")), "Easy");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(None), "—");
        assert_eq!(format_minutes(Some(0)), "0");
    }
}
