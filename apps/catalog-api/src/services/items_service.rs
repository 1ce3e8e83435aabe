//! Item endpoints.
//!
//! Reads are anonymous. Create, update and delete require the
//! [`ADMIN_ROLE`](crate::auth::ADMIN_ROLE), and delete additionally needs the
//! `enable_delete` feature flag.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use catalog_core::validation::{parse_price_bound, validate_item_draft};
use catalog_core::{Item, ItemDraft, ItemId, ItemQuery, PagedResult, SortOrder};
use catalog_store::ItemStore;

use crate::auth::Claims;
use crate::config::FeatureFlags;
use crate::error::ApiError;

/// Query-string parameters for listing items.
///
/// Prices arrive as decimal text and are parsed here so a malformed bound
/// becomes a `BadRequest` instead of being silently dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListItemsParams {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub from_created: Option<DateTime<Utc>>,
    pub to_created: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListItemsParams {
    /// Builds the store query, coercing page values into range.
    pub fn to_query(&self) -> Result<ItemQuery, ApiError> {
        let min_price = parse_price_bound(self.min_price.as_deref(), "minPrice")?;
        let max_price = parse_price_bound(self.max_price.as_deref(), "maxPrice")?;

        let mut query = ItemQuery::new()
            .min_price(min_price)
            .max_price(max_price)
            .created_between(self.from_created, self.to_created)
            .sort(SortOrder::resolve(
                self.sort_by.as_deref(),
                self.sort_dir.as_deref(),
            ));

        if let Some(term) = &self.search {
            query = query.search(term);
        }
        if let Some(page) = self.page {
            query = query.page(page);
        }
        if let Some(page_size) = self.page_size {
            query = query.page_size(page_size);
        }

        Ok(query)
    }
}

/// One page of items plus the metadata a transport sends as headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListResponse {
    pub items: Vec<Item>,
    pub total_count: usize,
    pub page: u32,
    pub page_size: u32,
}

impl ItemListResponse {
    /// `X-Total-Count`, `Page` and `PageSize` header pairs.
    pub fn metadata_headers(&self) -> [(&'static str, String); 3] {
        [
            ("X-Total-Count", self.total_count.to_string()),
            ("Page", self.page.to_string()),
            ("PageSize", self.page_size.to_string()),
        ]
    }
}

impl From<PagedResult<Item>> for ItemListResponse {
    fn from(result: PagedResult<Item>) -> Self {
        ItemListResponse {
            items: result.items,
            total_count: result.total_count,
            page: result.page,
            page_size: result.page_size,
        }
    }
}

/// Item endpoint logic over a shared store.
#[derive(Debug, Clone)]
pub struct ItemsService {
    store: Arc<ItemStore>,
    features: FeatureFlags,
}

impl ItemsService {
    pub fn new(store: Arc<ItemStore>, features: FeatureFlags) -> Self {
        ItemsService { store, features }
    }

    /// Lists items matching `params`.
    pub async fn list(&self, params: ListItemsParams) -> Result<ItemListResponse, ApiError> {
        let query = params.to_query()?;
        Ok(self.store.query(&query).await.into())
    }

    /// Fetches a single item.
    pub async fn get(&self, id: ItemId) -> Result<Item, ApiError> {
        self.store
            .get_by_id(id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Item {} not found", id)))
    }

    /// Creates an item. Requires the admin role.
    pub async fn create(&self, caller: &Claims, draft: ItemDraft) -> Result<Item, ApiError> {
        require_admin(caller)?;
        validate_item_draft(&draft)?;

        let item = self.store.create(draft).await;
        info!(id = item.id, by = %caller.sub, "Item created");
        Ok(item)
    }

    /// Replaces an item's editable fields. Requires the admin role.
    pub async fn update(
        &self,
        caller: &Claims,
        id: ItemId,
        draft: ItemDraft,
    ) -> Result<(), ApiError> {
        require_admin(caller)?;
        validate_item_draft(&draft)?;

        if !self.store.update(id, draft).await {
            return Err(ApiError::NotFound(format!("Item {} not found", id)));
        }

        info!(id, by = %caller.sub, "Item updated");
        Ok(())
    }

    /// Deletes an item. Requires the admin role and the delete feature flag.
    pub async fn delete(&self, caller: &Claims, id: ItemId) -> Result<(), ApiError> {
        require_admin(caller)?;

        if !self.features.enable_delete {
            return Err(ApiError::Unavailable(
                "Delete is disabled by feature flag".to_string(),
            ));
        }

        if !self.store.delete(id).await {
            return Err(ApiError::NotFound(format!("Item {} not found", id)));
        }

        info!(id, by = %caller.sub, "Item deleted");
        Ok(())
    }
}

fn require_admin(caller: &Claims) -> Result<(), ApiError> {
    if caller.is_admin() {
        Ok(())
    } else {
        warn!(sub = %caller.sub, role = %caller.role, "Denied item mutation");
        Err(ApiError::Forbidden("Admin role required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Price;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: "tester".to_string(),
            name: "tester".to_string(),
            role: role.to_string(),
            iss: "catalog-api".to_string(),
            aud: "catalog-clients".to_string(),
            iat: 0,
            exp: 0,
            jti: "test".to_string(),
        }
    }

    fn service(enable_delete: bool) -> ItemsService {
        ItemsService::new(
            Arc::new(ItemStore::with_seed_data()),
            FeatureFlags { enable_delete },
        )
    }

    fn params(query: &str) -> ListItemsParams {
        serde_json::from_str(query).unwrap()
    }

    fn names(response: &ItemListResponse) -> Vec<&str> {
        response.items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_price_desc() {
        let response = service(false)
            .list(params(r#"{"sortBy":"price","sortDir":"desc","page":1,"pageSize":2}"#))
            .await
            .unwrap();

        assert_eq!(names(&response), vec!["Laptop", "Keyboard"]);
        assert_eq!(
            response.metadata_headers(),
            [
                ("X-Total-Count", "3".to_string()),
                ("Page", "1".to_string()),
                ("PageSize", "2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_list_search() {
        let response = service(false)
            .list(params(r#"{"search":"mouse","page":1,"pageSize":10}"#))
            .await
            .unwrap();

        assert_eq!(names(&response), vec!["Mouse"]);
        assert_eq!(response.total_count, 1);
    }

    #[tokio::test]
    async fn test_list_coerces_paging() {
        let response = service(false)
            .list(params(r#"{"page":0,"pageSize":1000}"#))
            .await
            .unwrap();
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 100);

        let response = service(false)
            .list(params(r#"{"pageSize":-5}"#))
            .await
            .unwrap();
        assert_eq!(response.page_size, 1);
        assert_eq!(response.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_defaults() {
        let response = service(false).list(ListItemsParams::default()).await.unwrap();
        assert_eq!(response.page, 1);
        assert_eq!(response.page_size, 20);
        // Newest first when no sort is requested
        assert_eq!(response.items.first().map(|i| i.name.as_str()), Some("Keyboard"));
    }

    #[tokio::test]
    async fn test_list_price_bounds() {
        let response = service(false)
            .list(params(r#"{"minPrice":"90","maxPrice":"1200.00","sortBy":"price"}"#))
            .await
            .unwrap();
        assert_eq!(names(&response), vec!["Keyboard", "Laptop"]);

        let err = service(false)
            .list(params(r#"{"minPrice":"cheap"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_list_wire_shape() {
        let response = service(false)
            .list(params(r#"{"search":"mouse"}"#))
            .await
            .unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["items"][0]["id"], 2);
        assert_eq!(json["items"][0]["price"], "25.00");
        assert!(json["items"][0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_get() {
        let service = service(false);
        assert_eq!(service.get(1).await.unwrap().name, "Laptop");
        assert_eq!(service.get(42).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let service = service(false);
        let draft = ItemDraft::new("Desk Lamp", "LED light", Price::from_major(35));

        let err = service.create(&claims("Reader"), draft.clone()).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let created = service.create(&claims("Admin"), draft).await.unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(service.get(4).await.unwrap().name, "Desk Lamp");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let draft: ItemDraft =
            serde_json::from_str(r#"{"id":99,"name":"  ","price":"1.00"}"#).unwrap();
        let err = service(false)
            .create(&claims("Admin"), draft)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_create_accepts_numeric_price_body() {
        let draft: ItemDraft = serde_json::from_str(
            r#"{"name":"Integration Test Item","description":"x","price":42.5}"#,
        )
        .unwrap();

        let created = service(false).create(&claims("Admin"), draft).await.unwrap();
        assert_eq!(created.price.to_string(), "42.50");
    }

    #[tokio::test]
    async fn test_update() {
        let service = service(false);
        let draft = ItemDraft::new("Trackball", "Ergonomic", Price::from_major(60));

        assert_eq!(
            service
                .update(&claims("Reader"), 2, draft.clone())
                .await
                .unwrap_err()
                .status_code(),
            403
        );
        assert_eq!(
            service
                .update(&claims("Admin"), 99, draft.clone())
                .await
                .unwrap_err()
                .status_code(),
            404
        );

        service.update(&claims("Admin"), 2, draft).await.unwrap();
        assert_eq!(service.get(2).await.unwrap().name, "Trackball");
    }

    #[tokio::test]
    async fn test_delete_disabled_is_unavailable() {
        let service = service(false);

        let err = service.delete(&claims("Admin"), 1).await.unwrap_err();
        assert!(matches!(err, ApiError::Unavailable(_)));
        assert_eq!(err.status_code(), 503);

        // Still there
        assert!(service.get(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_enabled() {
        let service = service(true);

        assert_eq!(
            service.delete(&claims("Reader"), 1).await.unwrap_err().status_code(),
            403
        );

        service.delete(&claims("Admin"), 1).await.unwrap();
        assert_eq!(service.get(1).await.unwrap_err().status_code(), 404);
        assert_eq!(
            service.delete(&claims("Admin"), 1).await.unwrap_err().status_code(),
            404
        );
    }
}
