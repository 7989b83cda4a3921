use std::collections::HashSet;

use serde::Serialize;

use crate::model::Recipe;

/// Canonical pantry spelling of an ingredient: trimmed and lowercased.
/// Blank names have no canonical form.
pub fn normalize_ingredient_name(name: &str) -> Option<String> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Normalize a batch of names, dropping blanks and repeats while keeping
/// the order of first appearance.
pub fn dedupe_bulk<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter_map(|name| normalize_ingredient_name(name.as_ref()))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Split a pasted block into one ingredient per non-blank line.
pub fn parse_bulk_input(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Which of a recipe's ingredients the pantry already covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PantryCoverage {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl PantryCoverage {
    /// Share of ingredients covered, from 0.0 to 1.0. A recipe without
    /// ingredients counts as fully covered.
    pub fn ratio(&self) -> f64 {
        let total = self.matched.len() + self.missing.len();
        if total == 0 {
            1.0
        } else {
            self.matched.len() as f64 / total as f64
        }
    }
}

/// Match each recipe ingredient against the pantry. An ingredient is
/// covered when it contains a pantry name ("2 cups flour" is covered by
/// "flour").
pub fn pantry_coverage<S: AsRef<str>>(recipe: &Recipe, pantry: &[S]) -> PantryCoverage {
    let names: Vec<String> = pantry
        .iter()
        .filter_map(|name| normalize_ingredient_name(name.as_ref()))
        .collect();

    let (matched, missing): (Vec<String>, Vec<String>) =
        recipe.ingredients.iter().cloned().partition(|ingredient| {
            let ingredient = ingredient.to_lowercase();
            names.iter().any(|name| ingredient.contains(name.as_str()))
        });

    PantryCoverage { matched, missing }
}
