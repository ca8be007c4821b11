//! End-to-end behavior of a list view driven through `ListRuntime` against an
//! in-memory shop.

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wud_console::api::{ApiRequest, DataApi, Method};
use wud_console::app::{Event, FilterChange, FormSubmission, NotificationLevel};
use wud_console::domain::{ApiError, ResourceKind};
use wud_console::{AutoConfirm, Console, ListRuntime, Theme};

/// In-memory Data API: one collection per endpoint, paged like the real
/// server, with optional per-path failures and per-search delays.
#[derive(Default)]
struct ShopApi {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    failures: Mutex<HashMap<String, ApiError>>,
    slow_searches: HashMap<String, Duration>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ShopApi {
    fn with(endpoint: &str, items: Vec<Value>) -> Self {
        let api = Self::default();
        api.collections.lock().unwrap().insert(endpoint.to_string(), items);
        api
    }

    fn slow_search(mut self, term: &str, delay: Duration) -> Self {
        self.slow_searches.insert(term.to_string(), delay);
        self
    }

    fn fail(&self, path: &str, error: ApiError) {
        self.failures.lock().unwrap().insert(path.to_string(), error);
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    fn requests_with(&self, method: Method) -> Vec<ApiRequest> {
        self.requests().into_iter().filter(|r| r.method == method).collect()
    }

    fn list(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let query: HashMap<&str, &str> = request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let size: usize = query.get("pageSize").and_then(|p| p.parse().ok()).unwrap_or(20);
        let search = query.get("search").map(|s| s.to_lowercase());

        let collections = self.collections.lock().unwrap();
        let matching: Vec<Value> = collections
            .get(&request.path)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|item| {
                search.as_ref().map_or(true, |s| {
                    item["name"].as_str().unwrap_or_default().to_lowercase().contains(s)
                })
            })
            .filter(|item| {
                query
                    .get("status")
                    .map_or(true, |status| item["status"].as_str() == Some(*status))
            })
            .collect();

        let count = matching.len();
        let items: Vec<Value> = matching.into_iter().skip((page - 1) * size).take(size).collect();
        let mut body = Map::new();
        body.insert(request.path.trim_start_matches('/').to_string(), Value::Array(items));
        body.insert("page".to_string(), json!(page));
        body.insert("pages".to_string(), json!(count.div_ceil(size).max(1)));
        body.insert("count".to_string(), json!(count));
        Ok(Value::Object(body))
    }

    fn respond(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        if let Some(error) = self.failures.lock().unwrap().get(&request.path) {
            return Err(error.clone());
        }

        let (collection, id) = match request.path.rsplit_once('/') {
            Some(("", _)) | None => (request.path.clone(), None),
            Some((collection, id)) => (collection.to_string(), Some(id.to_string())),
        };

        match (request.method, id) {
            (Method::Get, None) => self.list(request),
            (Method::Get, Some(id)) => self
                .collections
                .lock()
                .unwrap()
                .get(&collection)
                .and_then(|items| items.iter().find(|item| item["_id"] == id.as_str()).cloned())
                .map(|item| json!({ "product": item }))
                .ok_or_else(not_found),
            (Method::Delete, Some(id)) => {
                if let Some(items) = self.collections.lock().unwrap().get_mut(&collection) {
                    items.retain(|item| item["_id"] != id.as_str());
                }
                Ok(json!({ "message": "deleted" }))
            }
            _ => Ok(json!({})),
        }
    }
}

impl DataApi for ShopApi {
    fn request(&self, request: ApiRequest) -> BoxFuture<'_, Result<Value, ApiError>> {
        let delay = request
            .query
            .iter()
            .find(|(k, _)| k == "search")
            .and_then(|(_, v)| self.slow_searches.get(v).copied());
        let reply = self.respond(&request);
        self.seen.lock().unwrap().push(request);

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            reply
        }
        .boxed()
    }
}

fn status(code: u16, message: &str) -> ApiError {
    ApiError::Status {
        status: code,
        message: message.to_string(),
        data: json!({ "message": message }),
    }
}

fn not_found() -> ApiError {
    status(404, "Not found")
}

fn products(n: usize) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "_id": format!("p{i}"),
                "name": if i % 2 == 0 { format!("Walnut shelf {i}") } else { format!("Oak chair {i}") },
                "price": 100 + i,
                "status": "published",
                "createdAt": "2024-03-01T10:00:00.000Z",
            })
        })
        .collect()
}

fn runtime(resource: ResourceKind, api: &Arc<ShopApi>, confirm: bool) -> ListRuntime {
    let console = Console::new(resource, 20, Duration::from_millis(500));
    ListRuntime::new(console, Arc::clone(api) as Arc<dyn DataApi>, Box::new(AutoConfirm(confirm)))
}

fn screen(runtime: &ListRuntime) -> String {
    runtime.render(&Theme::default(), false, 100)
}

fn pairs(query: &[(&str, &str)]) -> Vec<(String, String)> {
    query.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[tokio::test]
async fn first_load_uses_default_parameters() {
    let api = Arc::new(ShopApi::with("/products", products(3)));
    let mut rt = runtime(ResourceKind::Products, &api, true);

    assert!(rt.dispatch(Event::Open).unwrap());
    assert!(rt.state().phase.is_loading());
    rt.settle().await.unwrap();

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/products");
    assert!(requests[0].requires_auth);
    assert_eq!(
        requests[0].query,
        pairs(&[("page", "1"), ("pageSize", "20"), ("sortBy", "createdAt"), ("sortOrder", "desc")])
    );

    let screen = screen(&rt);
    assert!(screen.contains("Products (3)"));
    assert!(screen.contains("Oak chair 1"));
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_sends_one_search_request() {
    let api = Arc::new(ShopApi::with("/products", products(30)));
    let mut rt = runtime(ResourceKind::Products, &api, true);
    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();

    for text in ["w", "wa", "wal", "waln", "walnut"] {
        rt.dispatch(Event::SearchInput(text.to_string())).unwrap();
    }
    assert!(screen(&rt).contains("Search: walnut…"));
    rt.settle().await.unwrap();

    let requests = api.requests_with(Method::Get);
    assert_eq!(requests.len(), 2);
    assert!(requests[1].query.contains(&("search".to_string(), "walnut".to_string())));
    assert!(requests[1].query.contains(&("page".to_string(), "1".to_string())));
    assert_eq!(rt.state().page_result().map(|p| p.count), Some(15));
}

#[tokio::test(start_paused = true)]
async fn slower_earlier_response_is_discarded() {
    let api = Arc::new(ShopApi::with("/products", products(10)).slow_search("oak", Duration::from_secs(2)));
    let mut rt = runtime(ResourceKind::Products, &api, true);

    rt.dispatch(Event::ChangeFilters(FilterChange::search("oak"))).unwrap();
    rt.dispatch(Event::ChangeFilters(FilterChange::search("walnut"))).unwrap();
    rt.settle().await.unwrap();

    assert_eq!(api.requests().len(), 2);
    assert_eq!(rt.state().filter().search, "walnut");
    let result = rt.state().page_result().unwrap();
    assert_eq!(result.count, 5);
    assert!(result.items.iter().all(|r| r.display("name").starts_with("Walnut")));
}

#[tokio::test]
async fn deleting_the_last_row_falls_back_one_page() {
    let api = Arc::new(ShopApi::with("/products", products(41)));
    let mut rt = runtime(ResourceKind::Products, &api, true);
    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();
    rt.dispatch(Event::GoToPage(3)).unwrap();
    rt.settle().await.unwrap();

    let last = rt.state().page_result().unwrap().items[0].id.clone();
    assert_eq!(last, "p41");

    rt.dispatch(Event::RequestDelete { id: last }).unwrap();
    rt.settle().await.unwrap();

    let deletes = api.requests_with(Method::Delete);
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].path, "/products/p41");

    assert_eq!(rt.state().filter().page, 2);
    let reload = api.requests().last().cloned().unwrap();
    assert!(reload.query.contains(&("page".to_string(), "2".to_string())));
    assert_eq!(rt.state().page_result().map(|p| p.count), Some(40));
    assert_eq!(
        rt.state().notification.as_ref().map(|n| n.level),
        Some(NotificationLevel::Info)
    );
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let api = Arc::new(ShopApi::with("/products", products(3)));
    let mut rt = runtime(ResourceKind::Products, &api, false);
    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();

    rt.dispatch(Event::RequestDelete { id: "p1".to_string() }).unwrap();
    rt.settle().await.unwrap();

    assert!(api.requests_with(Method::Delete).is_empty());
    assert_eq!(rt.state().page_result().map(|p| p.count), Some(3));
}

#[tokio::test]
async fn missing_endpoint_renders_not_found() {
    let api = Arc::new(ShopApi::default());
    api.fail("/orders", not_found());
    let mut rt = runtime(ResourceKind::Orders, &api, true);

    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();

    let screen = screen(&rt);
    assert!(screen.contains("Orders not found"));
    assert!(!screen.contains("Orders ("));
    assert!(!rt.session_invalidated());
}

#[tokio::test]
async fn empty_results_distinguish_filtered_from_blank() {
    let api = Arc::new(ShopApi::with("/products", vec![]));
    let mut rt = runtime(ResourceKind::Products, &api, true);
    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();
    assert!(screen(&rt).contains("No products yet"));

    rt.dispatch(Event::ChangeFilters(FilterChange::default().filter("status", "draft")))
        .unwrap();
    rt.settle().await.unwrap();
    assert!(screen(&rt).contains("No products match the current filters"));
}

#[tokio::test]
async fn rejected_credential_invalidates_session() {
    let api = Arc::new(ShopApi::default());
    api.fail("/users", status(401, "Token expired"));
    let mut rt = runtime(ResourceKind::Users, &api, true);

    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();

    assert!(rt.session_invalidated());
    assert!(screen(&rt).contains("Your session has expired"));
}

#[tokio::test]
async fn invalid_form_never_reaches_the_network() {
    let api = Arc::new(ShopApi::with("/products", products(2)));
    let mut rt = runtime(ResourceKind::Products, &api, true);
    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();

    let mut fields = Map::new();
    fields.insert("name".to_string(), json!("Walnut bench"));
    rt.dispatch(Event::SubmitForm(FormSubmission::create(fields))).unwrap();

    assert!(!rt.is_busy());
    assert!(api.requests_with(Method::Post).is_empty());
    let notification = rt.state().notification.clone().unwrap();
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, "Missing required fields: price, category");
}

#[tokio::test]
async fn editing_loads_the_full_record_into_the_form() {
    let api = Arc::new(ShopApi::with("/products", products(2)));
    let mut rt = runtime(ResourceKind::Products, &api, true);
    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();

    rt.dispatch(Event::Edit { id: "p2".to_string() }).unwrap();
    rt.settle().await.unwrap();

    let form = rt.state().edit_form.clone().unwrap();
    assert_eq!(form.record.map(|r| r.id), Some("p2".to_string()));
    assert!(screen(&rt).contains("Walnut shelf 2"));
}

#[tokio::test]
async fn failed_wishlist_toggle_reverts() {
    let catalog = vec![json!({ "_id": "p1", "name": "Oak chair", "price": 120, "isWishlisted": false })];
    let api = Arc::new(ShopApi::with("/products", catalog));
    api.fail("/wishlist/p1", status(500, "Wishlist unavailable"));
    let mut rt = runtime(ResourceKind::Catalog, &api, true);
    rt.dispatch(Event::Open).unwrap();
    rt.settle().await.unwrap();
    assert!(!api.requests()[0].requires_auth);

    rt.dispatch(Event::ToggleWishlist { id: "p1".to_string() }).unwrap();
    assert_eq!(rt.state().is_wishlisted("p1"), Some(true));
    rt.settle().await.unwrap();

    assert_eq!(rt.state().is_wishlisted("p1"), Some(false));
    assert_eq!(
        rt.state().notification.as_ref().map(|n| n.message.as_str()),
        Some("Wishlist unavailable")
    );
    let posts = api.requests_with(Method::Post);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, "/wishlist/p1");
}

#[tokio::test(start_paused = true)]
async fn switching_tabs_starts_from_defaults() {
    let api = Arc::new(
        ShopApi::with("/products", products(10)).slow_search("oak", Duration::from_secs(1)),
    );
    api.collections
        .lock()
        .unwrap()
        .insert("/orders".to_string(), vec![json!({ "_id": "o1", "orderNumber": "WUD-1001", "status": "paid" })]);
    let mut rt = runtime(ResourceKind::Products, &api, true);

    rt.dispatch(Event::ChangeFilters(FilterChange::search("oak"))).unwrap();
    assert!(rt.switch_tab(ResourceKind::Orders));
    assert!(!rt.switch_tab(ResourceKind::Orders));
    rt.settle().await.unwrap();

    let state = rt.state();
    assert_eq!(state.resource(), ResourceKind::Orders);
    assert_eq!(state.filter().search, "");
    assert_eq!(state.page_result().map(|p| p.count), Some(1));
    assert!(api.requests().iter().any(|r| r.path == "/orders"));
}
