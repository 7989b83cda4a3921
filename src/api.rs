//! Thin client for the recipe and pantry endpoints.

use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::DadlyError;
use crate::model::{PantryItem, Recipe};
use crate::pantry::{dedupe_bulk, normalize_ingredient_name};
use crate::session::{Session, SessionUser};

/// One page of the user's liked recipes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LikedPage {
    pub recipes: Vec<Recipe>,
    /// Cursor for the next page, when there is one
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LikedResponse {
    Bare(Vec<Recipe>),
    Paged {
        #[serde(default)]
        recipes: Vec<Recipe>,
        #[serde(default)]
        next_cursor: Option<String>,
        #[serde(default)]
        has_more: bool,
    },
}

impl From<LikedResponse> for LikedPage {
    fn from(response: LikedResponse) -> Self {
        match response {
            LikedResponse::Bare(recipes) => LikedPage {
                recipes,
                ..Default::default()
            },
            LikedResponse::Paged {
                recipes,
                next_cursor,
                has_more,
            } => LikedPage {
                recipes,
                next_cursor,
                has_more,
            },
        }
    }
}

#[derive(Serialize)]
struct NewPantryItem<'a> {
    ingredient_name: &'a str,
    quantity: &'a str,
}

#[derive(Serialize)]
struct BulkPantryRequest<'a> {
    ingredients: Vec<NewPantryItem<'a>>,
}

pub struct RecipeApi {
    client: Client,
    base_url: String,
}

impl RecipeApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DadlyError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dadly/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, DadlyError> {
        Self::new(
            config.base_url.clone(),
            Some(Duration::from_secs(config.timeout)),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, DadlyError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} answered {}", response.url(), status);
            return Err(DadlyError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, DadlyError> {
        let body = self.send(builder).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /auth/me`. An anonymous session has no user and sends nothing.
    pub async fn fetch_current_user(
        &self,
        session: &Session,
    ) -> Result<Option<SessionUser>, DadlyError> {
        if !session.is_authenticated() {
            return Ok(None);
        }
        let builder = self.request(Method::GET, "/auth/me", session);
        Ok(Some(self.send_json(builder).await?))
    }

    /// Attach the signed-in user to `session`.
    pub async fn identify(&self, session: Session) -> Result<Session, DadlyError> {
        match self.fetch_current_user(&session).await? {
            Some(user) => Ok(session.with_user(user)),
            None => Ok(session),
        }
    }

    /// `GET /recipes/feed`, skipping the ids in `exclude`.
    pub async fn fetch_feed(
        &self,
        session: &Session,
        limit: u32,
        exclude: &[String],
    ) -> Result<Vec<Recipe>, DadlyError> {
        let mut query = vec![("limit", limit.to_string())];
        if !exclude.is_empty() {
            query.push(("exclude", exclude.join(",")));
        }
        let builder = self
            .request(Method::GET, "/recipes/feed", session)
            .query(&query);
        self.send_json(builder).await
    }

    /// `GET /recipes/{id}`
    pub async fn fetch_recipe(&self, session: &Session, id: &str) -> Result<Recipe, DadlyError> {
        let builder = self.request(Method::GET, &format!("/recipes/{id}"), session);
        self.send_json(builder).await
    }

    /// `GET /recipes/liked`, newest first, continuing from `cursor`.
    pub async fn fetch_liked(
        &self,
        session: &Session,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<LikedPage, DadlyError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }
        let builder = self
            .request(Method::GET, "/recipes/liked", session)
            .query(&query);
        let response: LikedResponse = self.send_json(builder).await?;
        Ok(response.into())
    }

    /// Replace minimal feed entries with their full records.
    ///
    /// A detail that cannot be fetched leaves the feed entry as it was.
    pub async fn hydrate_feed(&self, session: &Session, feed: Vec<Recipe>) -> Vec<Recipe> {
        let mut hydrated = Vec::with_capacity(feed.len());
        for recipe in feed {
            let Some(id) = recipe.id_segment() else {
                hydrated.push(recipe);
                continue;
            };
            match self.fetch_recipe(session, &id).await {
                Ok(detail) => hydrated.push(recipe.merge_detail(detail)),
                Err(e) => {
                    warn!("Keeping feed entry for recipe {}: {}", id, e);
                    hydrated.push(recipe);
                }
            }
        }
        hydrated
    }

    /// `POST /recipes/{id}/like`
    pub async fn like_recipe(&self, session: &Session, id: &str) -> Result<(), DadlyError> {
        let builder = self
            .request(Method::POST, &format!("/recipes/{id}/like"), session)
            .json(&serde_json::json!({}));
        self.send(builder).await?;
        Ok(())
    }

    /// `DELETE /recipes/{id}/like`
    pub async fn unlike_recipe(&self, session: &Session, id: &str) -> Result<(), DadlyError> {
        let builder = self.request(Method::DELETE, &format!("/recipes/{id}/like"), session);
        self.send(builder).await?;
        Ok(())
    }

    /// `GET /pantry/`
    pub async fn fetch_pantry(&self, session: &Session) -> Result<Vec<PantryItem>, DadlyError> {
        let builder = self.request(Method::GET, "/pantry/", session);
        self.send_json(builder).await
    }

    /// `POST /pantry/` with a normalized name.
    ///
    /// Returns `false` when nothing was added: the name was blank or the
    /// pantry already had it (the API answers 400).
    pub async fn add_pantry_item(
        &self,
        session: &Session,
        name: &str,
        quantity: Option<&str>,
    ) -> Result<bool, DadlyError> {
        let Some(ingredient_name) = normalize_ingredient_name(name) else {
            return Ok(false);
        };
        let body = NewPantryItem {
            ingredient_name: &ingredient_name,
            quantity: quantity.filter(|q| !q.is_empty()).unwrap_or("1"),
        };
        let builder = self.request(Method::POST, "/pantry/", session).json(&body);
        match self.send(builder).await {
            Ok(_) => Ok(true),
            Err(DadlyError::Status { status, .. })
                if status == StatusCode::BAD_REQUEST.as_u16() =>
            {
                debug!("{} already in pantry", ingredient_name);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// `POST /pantry/bulk` with names normalized and de-duplicated.
    ///
    /// Returns how many names were sent.
    pub async fn add_pantry_bulk<S: AsRef<str>>(
        &self,
        session: &Session,
        names: &[S],
    ) -> Result<usize, DadlyError> {
        let names = dedupe_bulk(names);
        if names.is_empty() {
            return Ok(0);
        }
        let body = BulkPantryRequest {
            ingredients: names
                .iter()
                .map(|name| NewPantryItem {
                    ingredient_name: name,
                    quantity: "1",
                })
                .collect(),
        };
        let builder = self
            .request(Method::POST, "/pantry/bulk", session)
            .json(&body);
        self.send(builder).await?;
        Ok(names.len())
    }

    /// `DELETE /pantry/{id}`
    pub async fn delete_pantry_item(&self, session: &Session, id: &str) -> Result<(), DadlyError> {
        let builder = self.request(Method::DELETE, &format!("/pantry/{id}"), session);
        self.send(builder).await?;
        Ok(())
    }

    /// `DELETE /pantry/`
    pub async fn clear_pantry(&self, session: &Session) -> Result<(), DadlyError> {
        let builder = self.request(Method::DELETE, "/pantry/", session);
        self.send(builder).await?;
        Ok(())
    }
}
