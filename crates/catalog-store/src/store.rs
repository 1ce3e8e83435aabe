//! # Item Store
//!
//! The single owner of the item collection and the identifier counter.
//!
//! ## Locking Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Holds the Lock, and For How Long                 │
//! │                                                                         │
//! │  create / update / delete ──► write guard ──► mutate ──► drop           │
//! │                                                                         │
//! │  get_by_id ─────────────────► read guard ──► clone one ──► drop         │
//! │                                                                         │
//! │  query ─────────────────────► read guard ──► clone all ──► drop         │
//! │                                     │                                   │
//! │                                     └──► filter ► sort ► page           │
//! │                                          (private snapshot, NO LOCK)    │
//! │                                                                         │
//! │  Readers share the lock; writers are exclusive with everyone.           │
//! │  Long queries never hold writers up past the copy step.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifier Invariants
//! - Ids come from a counter that only ever increments
//! - Deleting an item retires its id; nothing hands it out again
//! - So id order is insertion order, and the `BTreeMap` below iterates in
//!   insertion order while giving O(log n) lookup, update and delete

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use catalog_core::{Item, ItemDraft, ItemId, ItemQuery, PagedResult};

use crate::seed::seed_drafts;

/// Source of creation timestamps.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Collection state guarded by the store's lock.
#[derive(Debug)]
struct Catalog {
    items: BTreeMap<ItemId, Item>,
    next_id: ItemId,
}

impl Catalog {
    fn new() -> Self {
        Catalog {
            items: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, draft: ItemDraft, created_at: DateTime<Utc>) -> Item {
        let id = self.next_id;
        self.next_id += 1;

        let item = Item::from_draft(id, draft, created_at);
        self.items.insert(id, item.clone());
        item
    }
}

/// Concurrency-safe in-memory item store.
///
/// ## Usage
/// ```rust
/// use catalog_core::{ItemDraft, ItemQuery, Price};
/// use catalog_store::ItemStore;
///
/// # async fn demo() {
/// let store = ItemStore::with_seed_data();
///
/// let lamp = store
///     .create(ItemDraft::new("Desk Lamp", "LED light", Price::from_major(35)))
///     .await;
/// assert_eq!(lamp.id, 4);
///
/// let page = store.query(&ItemQuery::new().search("lamp")).await;
/// assert_eq!(page.total_count, 1);
/// # }
/// ```
///
/// Share it across tasks as `Arc<ItemStore>`.
pub struct ItemStore {
    catalog: RwLock<Catalog>,
    clock: Clock,
}

impl fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStore").finish_non_exhaustive()
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    /// Creates an empty store stamping items with the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Creates an empty store with a custom timestamp source.
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        ItemStore {
            catalog: RwLock::new(Catalog::new()),
            clock: Box::new(clock),
        }
    }

    /// Creates a store pre-loaded with the seed catalog.
    pub fn with_seed_data() -> Self {
        Self::new().seeded()
    }

    /// Loads the seed catalog into this (not yet shared) store.
    ///
    /// The counter ends above the seed ids, so later creates never collide.
    pub fn seeded(mut self) -> Self {
        let catalog = self.catalog.get_mut();
        for draft in seed_drafts() {
            let item = catalog.insert(draft, (self.clock)());
            debug!(id = item.id, name = %item.name, "Seeded item");
        }
        self
    }

    /// Adds a new item and returns a copy of what was stored.
    ///
    /// The store assigns the id and the creation timestamp. Never fails.
    ///
    /// Both are taken under the same write guard, so `created_at` never
    /// decreases in id order.
    pub async fn create(&self, draft: ItemDraft) -> Item {
        let mut catalog = self.catalog.write().await;
        let item = catalog.insert(draft, (self.clock)());
        drop(catalog);

        debug!(id = item.id, name = %item.name, "Created item");
        item
    }

    /// Returns a copy of the item with `id`, if it exists.
    pub async fn get_by_id(&self, id: ItemId) -> Option<Item> {
        self.catalog.read().await.items.get(&id).cloned()
    }

    /// Replaces name, description and price of item `id`.
    ///
    /// ## Returns
    /// * `true` - item existed and was updated
    /// * `false` - no such item; nothing was changed
    pub async fn update(&self, id: ItemId, draft: ItemDraft) -> bool {
        let mut catalog = self.catalog.write().await;

        match catalog.items.get_mut(&id) {
            Some(item) => {
                item.apply(draft);
                debug!(id, "Updated item");
                true
            }
            None => {
                debug!(id, "Update skipped, item not found");
                false
            }
        }
    }

    /// Removes item `id`. Its identifier is retired for good.
    ///
    /// ## Returns
    /// * `true` - an item was removed
    /// * `false` - no such item
    pub async fn delete(&self, id: ItemId) -> bool {
        let removed = self.catalog.write().await.items.remove(&id).is_some();
        debug!(id, removed, "Delete item");
        removed
    }

    /// Evaluates `query` against a point-in-time snapshot.
    ///
    /// ## How It Works
    /// 1. Clone every item under the read lock, then release it
    /// 2. Keep items passing the term, price and creation-time filters
    /// 3. Stable-sort by the requested order (ties keep insertion order)
    /// 4. Count matches before paging
    /// 5. Cut `[(page-1)*size, page*size)`; past the end is simply empty
    pub async fn query(&self, query: &ItemQuery) -> PagedResult<Item> {
        let snapshot = self.snapshot().await;
        let order = query.sort_order();

        let mut matched: Vec<Item> = snapshot
            .into_iter()
            .filter(|item| query.matches(item))
            .collect();
        matched.sort_by(|a, b| order.compare(a, b));

        let total_count = matched.len();
        let (start, end) = query.page_bounds();
        let items: Vec<Item> = if start >= total_count {
            Vec::new()
        } else {
            matched.drain(start..end.min(total_count)).collect()
        };

        debug!(
            term = ?query.term(),
            sort_key = %order.key,
            sort_dir = %order.direction,
            page = query.current_page(),
            page_size = query.current_page_size(),
            total_count,
            returned = items.len(),
            "Queried items"
        );

        PagedResult {
            items,
            total_count,
            page: query.current_page(),
            page_size: query.current_page_size(),
        }
    }

    /// Number of live items (for diagnostics).
    pub async fn len(&self) -> usize {
        self.catalog.read().await.items.len()
    }

    /// True when the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Independent deep copy of every item, in insertion order.
    async fn snapshot(&self) -> Vec<Item> {
        self.catalog.read().await.items.values().cloned().collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Price, SortDirection, SortKey, SortOrder};
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    /// Clock that advances one second per call, starting at `epoch()`.
    fn stepping_clock() -> impl Fn() -> DateTime<Utc> + Send + Sync + 'static {
        let tick = AtomicI64::new(0);
        move || epoch() + Duration::seconds(tick.fetch_add(1, Ordering::SeqCst))
    }

    fn seeded_store() -> ItemStore {
        ItemStore::with_clock(stepping_clock()).seeded()
    }

    fn draft(name: &str, price: u64) -> ItemDraft {
        ItemDraft::new(name, format!("{name} description"), Price::from_major(price))
    }

    fn names(page: &PagedResult<Item>) -> Vec<&str> {
        page.items.iter().map(|i| i.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_seed_data_ids_and_counter() {
        let store = seeded_store();
        assert_eq!(store.len().await, 3);

        let laptop = store.get_by_id(1).await.unwrap();
        assert_eq!(laptop.name, "Laptop");
        assert_eq!(laptop.price, Price::from_major(1200));

        let created = store.create(draft("Desk Lamp", 35)).await;
        assert_eq!(created.id, 4);
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids_and_timestamp() {
        let store = ItemStore::with_clock(stepping_clock());
        assert!(store.is_empty().await);

        let a = store.create(draft("A", 1)).await;
        let b = store.create(draft("B", 2)).await;

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(b.created_at > a.created_at);
        assert_eq!(store.get_by_id(a.id).await, Some(a));
    }

    #[tokio::test]
    async fn test_ids_are_never_reused_after_delete() {
        let store = seeded_store();
        let mut seen: HashSet<ItemId> = (1..=3).collect();

        for round in 0..5 {
            let created = store.create(draft(&format!("Item {round}"), round)).await;
            assert!(seen.insert(created.id), "id {} was reused", created.id);
            assert!(store.delete(created.id).await);
        }

        // Deleting the newest id must not rewind the counter
        let next = store.create(draft("After", 1)).await;
        assert!(seen.insert(next.id));
        assert_eq!(next.id, 9);
    }

    #[tokio::test]
    async fn test_update_missing_changes_nothing() {
        let store = seeded_store();
        let before = store.query(&ItemQuery::new().page_size(100)).await;

        assert!(!store.update(999, draft("Missing", 0)).await);

        let after = store.query(&ItemQuery::new().page_size(100)).await;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let store = seeded_store();
        let original = store.get_by_id(2).await.unwrap();

        assert!(
            store
                .update(2, ItemDraft::new("Trackball", "", Price::from_minor_units(4999)))
                .await
        );

        let updated = store.get_by_id(2).await.unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.name, "Trackball");
        assert_eq!(updated.description, "");
        assert_eq!(updated.price.to_string(), "49.99");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded_store();

        assert!(!store.delete(999).await);
        assert_eq!(store.len().await, 3);

        assert!(store.delete(2).await);
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get_by_id(2).await, None);
        assert!(!store.delete(2).await);
    }

    #[tokio::test]
    async fn test_query_price_desc_first_page() {
        let store = seeded_store();
        let query = ItemQuery::new()
            .sort(SortOrder::new(SortKey::Price, SortDirection::Descending))
            .page(1)
            .page_size(2);

        let page = store.query(&query).await;

        assert_eq!(names(&page), vec!["Laptop", "Keyboard"]);
        assert_eq!(page.items[0].price, Price::from_major(1200));
        assert_eq!(page.items[1].price, Price::from_major(95));
        assert_eq!(page.total_count, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 2);
    }

    #[tokio::test]
    async fn test_query_search_is_case_insensitive() {
        let store = seeded_store();

        let page = store
            .query(&ItemQuery::new().search("mouse").page(1).page_size(10))
            .await;
        assert_eq!(names(&page), vec!["Mouse"]);
        assert_eq!(page.total_count, 1);

        // Matches on description too
        let page = store.query(&ItemQuery::new().search("ULTRABOOK")).await;
        assert_eq!(names(&page), vec!["Laptop"]);
    }

    #[tokio::test]
    async fn test_query_price_bounds_inclusive() {
        let store = seeded_store();
        let query = ItemQuery::new()
            .min_price(Some(Price::from_major(25)))
            .max_price(Some(Price::from_major(95)))
            .sort(SortOrder::resolve(Some("price"), None));

        let page = store.query(&query).await;
        assert_eq!(names(&page), vec!["Mouse", "Keyboard"]);
        assert_eq!(page.total_count, 2);
    }

    #[tokio::test]
    async fn test_query_created_range_inclusive() {
        // Seeds are stamped epoch+0s, +1s, +2s
        let store = seeded_store();
        let query = ItemQuery::new()
            .created_between(
                Some(epoch() + Duration::seconds(1)),
                Some(epoch() + Duration::seconds(2)),
            )
            .sort(SortOrder::resolve(Some("createdAt"), None));

        let page = store.query(&query).await;
        assert_eq!(names(&page), vec!["Mouse", "Keyboard"]);
    }

    #[tokio::test]
    async fn test_default_order_is_newest_first() {
        let store = seeded_store();
        let page = store.query(&ItemQuery::new()).await;
        assert_eq!(names(&page), vec!["Keyboard", "Mouse", "Laptop"]);

        // Naming the key without a direction flips to ascending
        let page = store
            .query(&ItemQuery::new().sort(SortOrder::resolve(Some("createdAt"), None)))
            .await;
        assert_eq!(names(&page), vec!["Laptop", "Mouse", "Keyboard"]);
    }

    #[tokio::test]
    async fn test_name_sort() {
        let store = seeded_store();
        store.create(draft("desk lamp", 35)).await;

        let page = store
            .query(&ItemQuery::new().sort(SortOrder::resolve(Some("name"), Some("asc"))))
            .await;
        assert_eq!(names(&page), vec!["desk lamp", "Keyboard", "Laptop", "Mouse"]);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_empty() {
        let store = seeded_store();
        let page = store.query(&ItemQuery::new().page(5).page_size(2)).await;

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 3);
        assert_eq!(page.page, 5);
    }

    #[tokio::test]
    async fn test_pages_reconstruct_filtered_set() {
        let store = ItemStore::with_clock(stepping_clock());
        for n in 0..23u64 {
            let name = if n % 3 == 0 { format!("Widget {n}") } else { format!("Gadget {n}") };
            store.create(draft(&name, n % 4)).await;
        }

        let base = ItemQuery::new()
            .search("gadget")
            .sort(SortOrder::resolve(Some("price"), Some("desc")));
        let everything = store.query(&base.clone().page_size(100)).await;
        let total = everything.total_count;
        assert_eq!(total, 15);

        let page_size = 4;
        let pages = total.div_ceil(page_size);
        let mut collected = Vec::new();
        for page in 1..=pages {
            let result = store
                .query(&base.clone().page(page as i64).page_size(page_size as i64))
                .await;
            assert_eq!(result.total_count, total, "page {page}");
            collected.extend(result.items);
        }

        assert_eq!(collected, everything.items);
        let unique: HashSet<ItemId> = collected.iter().map(|i| i.id).collect();
        assert_eq!(unique.len(), total);
    }

    #[tokio::test]
    async fn test_sort_is_stable_for_ties() {
        // All stamped with the same instant and the same price
        let store = ItemStore::with_clock(epoch);
        for n in 0..10 {
            store.create(draft(&format!("Tie {n}"), 10)).await;
        }

        for direction in ["asc", "desc"] {
            for key in ["price", "createdAt"] {
                let query = ItemQuery::new().sort(SortOrder::resolve(Some(key), Some(direction)));
                let first = store.query(&query).await;
                let second = store.query(&query).await;

                assert_eq!(first, second);
                let ids: Vec<ItemId> = first.items.iter().map(|i| i.id).collect();
                assert_eq!(ids, (1..=10).collect::<Vec<_>>(), "{key} {direction}");
            }
        }
    }

    #[tokio::test]
    async fn test_query_result_is_a_snapshot() {
        let store = seeded_store();
        let page = store.query(&ItemQuery::new().search("mouse")).await;

        assert!(store.update(2, draft("Renamed", 1)).await);
        assert!(store.delete(1).await);

        assert_eq!(names(&page), vec!["Mouse"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(ItemStore::new());
        let mut handles = Vec::new();

        for worker in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::new();
                for n in 0..50 {
                    let item = store.create(draft(&format!("w{worker}-{n}"), n)).await;
                    ids.push(item.id);
                    // Interleave readers with writers
                    let _ = store.query(&ItemQuery::new().page_size(5)).await;
                }
                ids
            }));
        }

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.await.unwrap() {
                assert!(all.insert(id), "duplicate id {id}");
            }
        }

        assert_eq!(all.len(), 400);
        assert_eq!(store.len().await, 400);
        assert_eq!(all.iter().max(), Some(&400));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_keep_timestamps_in_id_order() {
        // Yields between reading the tick and returning it, widening any
        // window between stamping and id assignment.
        let tick = Arc::new(AtomicI64::new(0));
        let clock_tick = Arc::clone(&tick);
        let store = Arc::new(ItemStore::with_clock(move || {
            let n = clock_tick.fetch_add(1, Ordering::SeqCst);
            std::thread::yield_now();
            epoch() + Duration::seconds(n)
        }));

        let mut handles = Vec::new();
        for worker in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for n in 0..200 {
                    store.create(draft(&format!("w{worker}-{n}"), n)).await;
                    tokio::task::yield_now().await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let items = store.snapshot().await;
        assert_eq!(items.len(), 1600);
        let inversions = items
            .windows(2)
            .filter(|pair| pair[0].created_at > pair[1].created_at)
            .count();
        assert_eq!(inversions, 0);
        assert_eq!(tick.load(Ordering::SeqCst), 1600);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deletes_remove_each_item_once() {
        let store = Arc::new(ItemStore::new());
        for n in 0..100 {
            store.create(draft(&format!("Item {n}"), n)).await;
        }

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let mut removed = 0;
                for id in 1..=100 {
                    if store.delete(id).await {
                        removed += 1;
                    }
                }
                removed
            }));
        }

        let mut total_removed = 0;
        for handle in handles {
            total_removed += handle.await.unwrap();
        }

        assert_eq!(total_removed, 100);
        assert!(store.is_empty().await);
    }
}
