use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::normalize;

/// Ingredient field as it arrives from the API.
///
/// The feed sometimes sends a list, sometimes a single delimited string and
/// sometimes a JSON array serialized into a string. Other shapes are not
/// representable and are dropped at the boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawIngredients {
    Text(String),
    List(Vec<Value>),
}

impl RawIngredients {
    /// Normalize into an ordered list of trimmed, non-empty entries.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            RawIngredients::Text(text) => normalize::ingredients_from_text(text),
            RawIngredients::List(items) => normalize::ingredients_from_list(items),
        }
    }
}

/// Timestamp of a like or save, as an ISO string or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedAt {
    Millis(i64),
    Text(String),
}

impl SavedAt {
    /// Milliseconds since the epoch; unparseable text is the epoch itself.
    pub fn epoch_millis(&self) -> i64 {
        match self {
            SavedAt::Millis(ms) => *ms,
            SavedAt::Text(text) => normalize::timestamp_millis(text),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            SavedAt::Millis(ms) => *ms == 0,
            SavedAt::Text(text) => text.trim().is_empty(),
        }
    }
}

/// A recipe record as served by the recipe API.
///
/// Every field is optional on the wire; missing or malformed values take a
/// neutral default instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_ingredients")]
    pub ingredients: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub prep_time: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub cook_time: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub like_count: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_saved_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub liked_at: Option<SavedAt>,
    #[serde(
        default,
        deserialize_with = "lenient_saved_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub saved_at: Option<SavedAt>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<String>,
}

impl Recipe {
    pub fn prep_minutes(&self) -> u32 {
        self.prep_time.unwrap_or(0)
    }

    pub fn cook_minutes(&self) -> u32 {
        self.cook_time.unwrap_or(0)
    }

    /// Like count, absent counting as zero.
    pub fn likes(&self) -> u32 {
        self.like_count.unwrap_or(0)
    }

    /// Prep plus cook time, absent values counting as zero.
    pub fn total_minutes(&self) -> u32 {
        self.prep_minutes().saturating_add(self.cook_minutes())
    }

    /// When the recipe was liked, falling back to when it was saved.
    pub fn saved_millis(&self) -> i64 {
        [&self.liked_at, &self.saved_at]
            .into_iter()
            .flatten()
            .find(|ts| !ts.is_blank())
            .map(SavedAt::epoch_millis)
            .unwrap_or(0)
    }

    /// Path segment for `/recipes/{id}`, if the record carries an id.
    pub fn id_segment(&self) -> Option<String> {
        match &self.id {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Overlay a detail record on top of a feed entry.
    ///
    /// Fields present in `detail` win; fields it lacks keep the feed value.
    pub fn merge_detail(self, detail: Recipe) -> Recipe {
        Recipe {
            id: if detail.id.is_null() { self.id } else { detail.id },
            name: if detail.name.is_empty() {
                self.name
            } else {
                detail.name
            },
            description: detail.description.or(self.description),
            ingredients: if detail.ingredients.is_empty() {
                self.ingredients
            } else {
                detail.ingredients
            },
            difficulty: detail.difficulty.or(self.difficulty),
            prep_time: detail.prep_time.or(self.prep_time),
            cook_time: detail.cook_time.or(self.cook_time),
            like_count: detail.like_count.or(self.like_count),
            rating: detail.rating.or(self.rating),
            liked_at: detail.liked_at.or(self.liked_at),
            saved_at: detail.saved_at.or(self.saved_at),
            image_url: detail.image_url.or(self.image_url),
            instructions: detail.instructions.or(self.instructions),
        }
    }
}

/// One row of a user's rating history.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RatedEntry {
    #[serde(default, rename = "recipeId")]
    pub recipe_id_camel: Value,
    #[serde(default)]
    pub recipe_id: Value,
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub prep_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub cook_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_saved_at")]
    pub rated_at: Option<SavedAt>,
    #[serde(default, deserialize_with = "lenient_saved_at")]
    pub saved_at: Option<SavedAt>,
}

impl RatedEntry {
    /// The rated recipe's id, whichever spelling the history row uses.
    pub fn recipe_id(&self) -> Value {
        [&self.recipe_id_camel, &self.recipe_id, &self.id]
            .into_iter()
            .find(|id| !id.is_null())
            .cloned()
            .unwrap_or_default()
    }
}

/// An ingredient stored in the user's pantry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ingredient_name: String,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_saved_at")]
    pub added_at: Option<SavedAt>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(normalize::text_from_value)
        .unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(normalize::text_from_value))
}

fn lenient_ingredients<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value::<RawIngredients>(v).ok())
        .map(|raw| raw.normalize())
        .unwrap_or_default())
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(normalize::minutes_from_value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(normalize::minutes_from_value))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(normalize::number_from_value))
}

fn lenient_saved_at<'de, D>(deserializer: D) -> Result<Option<SavedAt>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value::<SavedAt>(v).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_with_every_field_missing() {
        let recipe: Recipe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(recipe, Recipe::default());
        assert_eq!(recipe.total_minutes(), 0);
        assert_eq!(recipe.saved_millis(), 0);
    }

    #[test]
    fn test_ingredient_shapes() {
        let list: Recipe =
            serde_json::from_value(json!({"ingredients": [" flour ", "water", {}]})).unwrap();
        assert_eq!(list.ingredients, vec!["flour", "water"]);

        let delimited: Recipe =
            serde_json::from_value(json!({"ingredients": "chicken, rice\nsalt"})).unwrap();
        assert_eq!(delimited.ingredients, vec!["chicken", "rice", "salt"]);

        let encoded: Recipe =
            serde_json::from_value(json!({"ingredients": "[\"tofu\", \"kale\"]"})).unwrap();
        assert_eq!(encoded.ingredients, vec!["tofu", "kale"]);

        let bogus: Recipe =
            serde_json::from_value(json!({"ingredients": {"tofu": 1}})).unwrap();
        assert!(bogus.ingredients.is_empty());
    }

    #[test]
    fn test_malformed_scalars_degrade() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 7,
            "name": null,
            "prep_time": "20",
            "cook_time": "a while",
            "like_count": -4,
            "rating": "4.5",
            "liked_at": {"nested": true}
        }))
        .unwrap();

        assert_eq!(recipe.name, "");
        assert_eq!(recipe.prep_time, Some(20));
        assert_eq!(recipe.cook_time, None);
        assert_eq!(recipe.like_count, None);
        assert_eq!(recipe.likes(), 0);
        assert_eq!(recipe.rating, Some(4.5));
        assert_eq!(recipe.liked_at, None);
        assert_eq!(recipe.id_segment().as_deref(), Some("7"));
    }

    #[test]
    fn test_saved_millis_prefers_liked_at() {
        let recipe: Recipe = serde_json::from_value(json!({
            "liked_at": "",
            "saved_at": "1970-01-01T00:00:02Z"
        }))
        .unwrap();
        assert_eq!(recipe.saved_millis(), 2000);

        let recipe: Recipe = serde_json::from_value(json!({
            "liked_at": 5000,
            "saved_at": "1970-01-01T00:00:02Z"
        }))
        .unwrap();
        assert_eq!(recipe.saved_millis(), 5000);
    }

    #[test]
    fn test_merge_detail_prefers_detail_fields() {
        let feed = Recipe {
            id: json!(3),
            name: "Soup".to_string(),
            prep_time: Some(10),
            like_count: Some(4),
            ..Default::default()
        };
        let detail = Recipe {
            id: json!(3),
            name: "Tomato Soup".to_string(),
            ingredients: vec!["tomato".to_string()],
            cook_time: Some(20),
            ..Default::default()
        };

        let merged = feed.merge_detail(detail);
        assert_eq!(merged.name, "Tomato Soup");
        assert_eq!(merged.prep_time, Some(10));
        assert_eq!(merged.cook_time, Some(20));
        assert_eq!(merged.like_count, Some(4));
        assert_eq!(merged.ingredients, vec!["tomato"]);
    }

    #[test]
    fn test_merge_detail_zero_likes_win() {
        let feed: Recipe = serde_json::from_value(json!({"id": 3, "like_count": 4})).unwrap();
        let detail: Recipe = serde_json::from_value(json!({"id": 3, "like_count": 0})).unwrap();
        assert_eq!(feed.merge_detail(detail).like_count, Some(0));
    }

    #[test]
    fn test_rated_entry_id_aliases() {
        let entry: RatedEntry =
            serde_json::from_value(json!({"recipeId": 12, "name": "Stew", "rating": 4})).unwrap();
        assert_eq!(entry.recipe_id(), json!(12));

        let entry: RatedEntry =
            serde_json::from_value(json!({"recipe_id": 4, "id": 99})).unwrap();
        assert_eq!(entry.recipe_id(), json!(4));
        assert_eq!(entry.rating, Some(4.0));
    }
}
