use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dietary::{classify, DietaryTag};
use crate::error::DadlyError;
use crate::model::Recipe;

/// Upper bound, inclusive, of a quick recipe's prep time in minutes.
pub const QUICK_PREP_MAX: u32 = 30;
/// Upper bound, inclusive, of a medium recipe's prep time in minutes.
pub const MEDIUM_PREP_MAX: u32 = 60;

/// Coarse prep-time classes offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrepTimeBucket {
    /// 30 minutes or less
    Quick,
    /// 31 to 60 minutes
    Medium,
    /// More than an hour
    Long,
}

impl PrepTimeBucket {
    pub fn contains(&self, prep_minutes: u32) -> bool {
        match self {
            PrepTimeBucket::Quick => prep_minutes <= QUICK_PREP_MAX,
            PrepTimeBucket::Medium => {
                prep_minutes > QUICK_PREP_MAX && prep_minutes <= MEDIUM_PREP_MAX
            }
            PrepTimeBucket::Long => prep_minutes > MEDIUM_PREP_MAX,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrepTimeBucket::Quick => "quick",
            PrepTimeBucket::Medium => "medium",
            PrepTimeBucket::Long => "long",
        }
    }
}

impl fmt::Display for PrepTimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrepTimeBucket {
    type Err = DadlyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(PrepTimeBucket::Quick),
            "medium" => Ok(PrepTimeBucket::Medium),
            "long" => Ok(PrepTimeBucket::Long),
            other => Err(DadlyError::InvalidArgument(format!(
                "unknown prep time '{other}', expected quick, medium or long"
            ))),
        }
    }
}

/// User-selected constraints on a recipe list.
///
/// A `None` field, or an empty string, places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the recipe name
    #[serde(default)]
    pub search: Option<String>,
    /// Case-insensitive substring of any ingredient
    #[serde(default)]
    pub ingredient: Option<String>,
    /// Difficulty, compared case-insensitively
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub prep_time: Option<PrepTimeBucket>,
    #[serde(default)]
    pub dietary_tag: Option<DietaryTag>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl FilterCriteria {
    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        active(&self.search).is_none()
            && active(&self.ingredient).is_none()
            && active(&self.difficulty).is_none()
            && self.prep_time.is_none()
            && self.dietary_tag.is_none()
    }

    /// Number of panel filters in use (ingredient, difficulty, prep time
    /// and search). The dietary chip is counted separately by the feed.
    pub fn active_count(&self) -> usize {
        [
            active(&self.ingredient).is_some(),
            active(&self.difficulty).is_some(),
            self.prep_time.is_some(),
            active(&self.search).is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Whether `recipe` satisfies every active criterion.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(query) = active(&self.search) {
            if !recipe
                .name
                .to_lowercase()
                .contains(&query.to_lowercase())
            {
                return false;
            }
        }

        if let Some(wanted) = active(&self.ingredient) {
            let wanted = wanted.to_lowercase();
            if !recipe
                .ingredients
                .iter()
                .any(|item| item.to_lowercase().contains(&wanted))
            {
                return false;
            }
        }

        if let Some(tag) = self.dietary_tag {
            if tag != DietaryTag::All && !classify(recipe).contains(tag) {
                return false;
            }
        }

        if let Some(wanted) = active(&self.difficulty) {
            match recipe.difficulty.as_deref() {
                Some(difficulty) if difficulty.to_lowercase() == wanted.to_lowercase() => {}
                _ => return false,
            }
        }

        if let Some(bucket) = self.prep_time {
            if !bucket.contains(recipe.prep_minutes()) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert!(PrepTimeBucket::Quick.contains(0));
        assert!(PrepTimeBucket::Quick.contains(30));
        assert!(!PrepTimeBucket::Quick.contains(31));
        assert!(PrepTimeBucket::Medium.contains(31));
        assert!(PrepTimeBucket::Medium.contains(60));
        assert!(!PrepTimeBucket::Medium.contains(61));
        assert!(PrepTimeBucket::Long.contains(61));
        assert!(!PrepTimeBucket::Long.contains(60));
    }

    #[test]
    fn test_missing_prep_time_is_quick() {
        let criteria = FilterCriteria {
            prep_time: Some(PrepTimeBucket::Quick),
            ..Default::default()
        };
        assert!(criteria.matches(&Recipe::default()));
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let criteria = FilterCriteria {
            search: Some(String::new()),
            difficulty: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert_eq!(criteria.active_count(), 0);
        assert!(criteria.matches(&Recipe::default()));
    }

    #[test]
    fn test_difficulty_requires_a_value() {
        let criteria = FilterCriteria {
            difficulty: Some("easy".to_string()),
            ..Default::default()
        };
        assert!(!criteria.matches(&Recipe::default()));
    }

    #[test]
    fn test_active_count_ignores_dietary_chip() {
        let criteria = FilterCriteria {
            search: Some("soup".to_string()),
            prep_time: Some(PrepTimeBucket::Long),
            dietary_tag: Some(DietaryTag::Vegan),
            ..Default::default()
        };
        assert_eq!(criteria.active_count(), 2);
        assert!(!criteria.is_empty());
    }

    #[test]
    fn test_bucket_parsing() {
        assert_eq!("Quick".parse::<PrepTimeBucket>().unwrap(), PrepTimeBucket::Quick);
        assert!("forever".parse::<PrepTimeBucket>().is_err());
    }
}
