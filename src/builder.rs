use crate::collection::filter_and_sort;
use crate::dietary::DietaryTag;
use crate::filter::{FilterCriteria, PrepTimeBucket};
use crate::model::Recipe;
use crate::sort::{SortKey, SortOrder, SortSpec};

/// A reusable filter plus sort over recipe lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeQuery {
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
}

impl RecipeQuery {
    /// Creates a new builder for recipe queries
    ///
    /// # Example
    /// ```
    /// use dadly::RecipeQuery;
    ///
    /// let builder = RecipeQuery::builder();
    /// ```
    pub fn builder() -> RecipeQueryBuilder {
        RecipeQueryBuilder::default()
    }

    /// Run the query over `recipes`
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        filter_and_sort(recipes, &self.criteria, self.sort)
    }
}

/// Builder for configuring recipe queries
#[derive(Debug, Default)]
pub struct RecipeQueryBuilder {
    criteria: FilterCriteria,
    key: Option<SortKey>,
    order: Option<SortOrder>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl RecipeQueryBuilder {
    /// Keep recipes whose name contains `query`
    ///
    /// # Example
    /// ```
    /// use dadly::RecipeQuery;
    ///
    /// let query = RecipeQuery::builder().search("soup").build();
    /// ```
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.criteria.search = non_empty(query.into());
        self
    }

    /// Keep recipes with an ingredient containing `ingredient`
    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.criteria.ingredient = non_empty(ingredient.into());
        self
    }

    /// Keep recipes of the given difficulty (case-insensitive)
    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.criteria.difficulty = non_empty(difficulty.into());
        self
    }

    /// Keep recipes whose prep time falls in `bucket`
    pub fn prep_time(mut self, bucket: PrepTimeBucket) -> Self {
        self.criteria.prep_time = Some(bucket);
        self
    }

    /// Keep recipes classified with `tag`
    ///
    /// # Example
    /// ```
    /// use dadly::{DietaryTag, RecipeQuery};
    ///
    /// let query = RecipeQuery::builder()
    ///     .dietary_tag(DietaryTag::Vegan)
    ///     .build();
    /// ```
    pub fn dietary_tag(mut self, tag: DietaryTag) -> Self {
        self.criteria.dietary_tag = Some(tag);
        self
    }

    /// Order results by `key`
    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn ascending(self) -> Self {
        self.order(SortOrder::Ascending)
    }

    pub fn descending(self) -> Self {
        self.order(SortOrder::Descending)
    }

    /// Finish the query
    ///
    /// Without an explicit key the list is ordered most recently saved
    /// first; without an explicit order it is descending.
    ///
    /// # Example
    /// ```
    /// use dadly::{PrepTimeBucket, RecipeQuery, SortKey};
    ///
    /// let query = RecipeQuery::builder()
    ///     .prep_time(PrepTimeBucket::Quick)
    ///     .sort_by(SortKey::TotalTime)
    ///     .ascending()
    ///     .build();
    /// assert_eq!(query.sort.key, SortKey::TotalTime);
    /// ```
    pub fn build(self) -> RecipeQuery {
        let default = SortSpec::default();
        RecipeQuery {
            criteria: self.criteria,
            sort: SortSpec::new(
                self.key.unwrap_or(default.key),
                self.order.unwrap_or(default.order),
            ),
        }
    }
}
