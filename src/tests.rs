//! Integration tests against an in-process stub backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::app::DirectoryApp;
use crate::config::Config;
use crate::form::RestaurantForm;
use crate::models::{ParkingKind, RestaurantId, RestaurantPage};
use crate::state::ListParams;
use crate::view::CardTarget;

/// What the stub backend serves and what it has been asked.
#[derive(Default)]
struct Backend {
    records: Vec<Value>,
    total_pages: u32,
    fail: bool,
    list_queries: Vec<HashMap<String, String>>,
    created: Vec<Value>,
    updated: Vec<(String, Value)>,
    deleted: Vec<String>,
}

type Shared = Arc<Mutex<Backend>>;

fn failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "database unavailable" })),
    )
}

async fn list_restaurants(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut backend = state.lock().unwrap();
    backend.list_queries.push(query);
    if backend.fail {
        return Err(failure());
    }
    Ok(Json(json!({
        "restaurants": backend.records,
        "total_pages": backend.total_pages,
    })))
}

async fn create_restaurant(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let mut backend = state.lock().unwrap();
    if backend.fail {
        return Err(failure());
    }
    backend.created.push(body);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Restaurant created successfully", "id": "new-1" })),
    ))
}

async fn update_restaurant(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut backend = state.lock().unwrap();
    if backend.fail {
        return Err(failure());
    }
    backend.updated.push((id, body));
    Ok(Json(json!({ "message": "Restaurant updated successfully" })))
}

async fn delete_restaurant(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut backend = state.lock().unwrap();
    if backend.fail {
        return Err(failure());
    }
    backend
        .records
        .retain(|r| r["_id"]["$oid"].as_str() != Some(id.as_str()));
    backend.deleted.push(id);
    Ok(Json(json!({ "message": "Restaurant deleted successfully" })))
}

async fn list_categories(State(state): State<Shared>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if state.lock().unwrap().fail {
        return Err(failure());
    }
    Ok(Json(json!(["Bars", "Mexican", "Pizza"])))
}

async fn filter_options() -> Json<Value> {
    Json(json!({
        "price_range": ["1", "2", "3", "4"],
        "parking": {
            "garage": ["true", "false"],
            "street": ["true", "false"],
            "validated": ["true", "false"],
            "lot": ["true", "false"],
            "valet": ["true", "false"]
        },
        "pets_allowed": ["true", "false"],
        "delivery": ["true", "false"],
        "alcohol": ["none", "beer_and_wine", "full_bar"],
        "smoking": ["no", "outdoor", "yes"],
        "wifi": ["no", "free", "paid"]
    }))
}

fn record(id: &str, name: &str, parking: &str) -> Value {
    json!({
        "_id": { "$oid": id },
        "name": name,
        "address": "100 Central Ave",
        "city": "Phoenix",
        "state": "AZ",
        "stars": 4.5,
        "review_count": 120,
        "categories": "Pizza, Bars",
        "attributes": {
            "RestaurantsPriceRange2": "2",
            "WiFi": "free",
            "BusinessParking": parking
        },
        "hours": { "Monday": "11:0-22:0" }
    })
}

const STREET_PARKING: &str =
    "{'garage': False, 'street': True, 'validated': False, 'lot': False, 'valet': False}";

/// Test fixture: a stub backend on a random port plus a matching config.
struct TestFixture {
    backend: Shared,
    config: Config,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_records(vec![
            record("r1", "Pizzeria Bianco", STREET_PARKING),
            record("r2", "Taco Guild", "None"),
        ])
        .await
    }

    async fn with_records(records: Vec<Value>) -> Self {
        let backend: Shared = Arc::new(Mutex::new(Backend {
            records,
            total_pages: 3,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/restaurants", get(list_restaurants).post(create_restaurant))
            .route(
                "/api/restaurants/{id}",
                put(update_restaurant).delete(delete_restaurant),
            )
            .route("/api/categories", get(list_categories))
            .route("/api/filters", get(filter_options))
            .with_state(backend.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let config = Config {
            api_url: format!("http://{}", addr),
            ..Config::default()
        };

        TestFixture { backend, config }
    }

    fn api(&self) -> ApiClient {
        ApiClient::new(&self.config).expect("Failed to create client")
    }

    fn app(&self) -> DirectoryApp {
        DirectoryApp::new(self.api(), &self.config)
    }

    fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }

    fn list_calls(&self) -> usize {
        self.backend().list_queries.len()
    }

    fn last_query(&self) -> HashMap<String, String> {
        self.backend().list_queries.last().cloned().unwrap_or_default()
    }
}

// ==================== LISTING ====================

#[tokio::test]
async fn test_initial_load() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();

    assert!(app.refresh().await);
    assert_eq!(app.restaurants().len(), 2);
    assert_eq!(app.restaurants()[0].id, RestaurantId::new("r1"));
    assert_eq!(app.total_pages(), 3);
    assert!(!app.is_loading());
    assert!(app.error_message().is_none());

    let query = fixture.last_query();
    assert_eq!(query.get("page").map(String::as_str), Some("1"));
    assert_eq!(query.get("per_page").map(String::as_str), Some("30"));
    assert!(!query.contains_key("price_range_min"));
    assert!(!query.contains_key("parking"));
}

#[tokio::test]
async fn test_filter_change_resets_page() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();
    app.refresh().await;

    app.next_page().await;
    assert_eq!(app.page(), 2);
    assert_eq!(fixture.last_query().get("page").map(String::as_str), Some("2"));

    app.apply_filter_input("city", "Phoenix").await;
    assert_eq!(app.page(), 1);
    assert_eq!(fixture.list_calls(), 3);

    let query = fixture.last_query();
    assert_eq!(query.get("city").map(String::as_str), Some("Phoenix"));
    assert_eq!(query.get("page").map(String::as_str), Some("1"));

    app.apply_filter_input("price_range_min", "").await;
    assert!(!fixture.last_query().contains_key("price_range_min"));
    assert_eq!(
        fixture.last_query().get("city").map(String::as_str),
        Some("Phoenix")
    );
}

#[tokio::test]
async fn test_parking_sort_and_clear() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();

    app.toggle_parking(ParkingKind::Garage).await;
    assert_eq!(
        fixture.last_query().get("parking").map(String::as_str),
        Some(r#"{"garage":true}"#)
    );
    assert_eq!(app.active_filter_count(), 1);

    app.set_sort(crate::state::Sort::parse("stars", Some("asc")).ok())
        .await;
    let query = fixture.last_query();
    assert_eq!(query.get("sort").map(String::as_str), Some("stars"));
    assert_eq!(query.get("order").map(String::as_str), Some("asc"));

    app.search("bianco").await;
    assert_eq!(fixture.last_query().get("name").map(String::as_str), Some("bianco"));

    app.clear_filters().await;
    let query = fixture.last_query();
    assert!(!query.contains_key("parking"));
    assert!(!query.contains_key("name"));
    assert!(!query.contains_key("sort"));
    assert_eq!(app.search_input(), "");
    assert_eq!(app.active_filter_count(), 0);
}

#[tokio::test]
async fn test_pagination_is_clamped() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();
    app.refresh().await;

    app.prev_page().await;
    assert_eq!(app.page(), 1);

    app.set_page(3).await;
    app.next_page().await;
    assert_eq!(app.page(), 3);
    // refresh, set_page(3); the clamped moves issue no request
    assert_eq!(fixture.list_calls(), 2);
}

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let fixture = TestFixture::with_records(vec![
        record("r1", "Good Eats", STREET_PARKING),
        json!({ "_id": { "$oid": "r2" }, "city": "Nowhere" }),
        json!({ "_id": "plain-id", "name": "Plain", "stars": null }),
    ])
    .await;

    let page = fixture.api().list(&ListParams::default()).await.unwrap();
    assert_eq!(page.restaurants.len(), 2);
    assert_eq!(page.rejected, 1);
    assert_eq!(page.restaurants[1].id.as_str(), "plain-id");
    assert_eq!(page.restaurants[1].stars, 0.0);
}

#[tokio::test]
async fn test_list_failure_shows_generic_message() {
    let fixture = TestFixture::new().await;
    fixture.backend().fail = true;

    let mut app = fixture.app();
    app.refresh().await;
    assert_eq!(app.error_message(), Some("Failed to fetch restaurants"));
    assert!(app.restaurants().is_empty());
    assert!(!app.is_loading());

    app.dismiss_error();
    assert!(app.error_message().is_none());
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let fixture = TestFixture::new().await;
    let api = fixture.api();
    let mut app = fixture.app();

    let first = app.begin_refresh();
    app.apply_filter_input("city", "Tempe").await;

    let late = api.list(&first.params).await;
    assert!(late.is_ok());
    assert!(!app.finish_refresh(first, late));

    let stale_only = app.begin_refresh();
    let newest = app.begin_refresh();
    let page = RestaurantPage {
        total_pages: 9,
        ..Default::default()
    };
    assert!(app.finish_refresh(newest, Ok(page)));
    assert!(!app.finish_refresh(stale_only, Ok(RestaurantPage::default())));
    assert_eq!(app.total_pages(), 9);
}

// ==================== CARDS & DIALOGS ====================

#[tokio::test]
async fn test_card_clicks_open_one_dialog() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();
    app.refresh().await;

    app.click_card(1, CardTarget::Body);
    assert_eq!(app.detail().map(|r| r.name.as_str()), Some("Pizzeria Bianco"));
    assert!(app.form().is_none());
    assert!(app.delete_target().is_none());
    app.close_view();

    app.click_card(2, CardTarget::EditIcon);
    assert!(app.detail().is_none());
    assert_eq!(app.form().map(|f| f.title()), Some("Edit Restaurant"));
    app.cancel_form();

    app.click_card(9, CardTarget::Body);
    assert!(app.detail().is_none());
    assert_eq!(app.error_message(), Some("No restaurant at position 9"));
}

#[tokio::test]
async fn test_confirm_delete_refreshes_once() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();
    app.refresh().await;

    app.click_card(1, CardTarget::DeleteIcon);
    assert_eq!(
        app.delete_target().map(|r| r.name.as_str()),
        Some("Pizzeria Bianco")
    );
    assert!(app.detail().is_none());

    let before = fixture.list_calls();
    assert!(app.confirm_delete().await);
    assert_eq!(fixture.list_calls(), before + 1);
    assert_eq!(fixture.backend().deleted, vec!["r1".to_string()]);
    assert!(app.delete_target().is_none());
    assert_eq!(app.restaurants().len(), 1);
}

#[tokio::test]
async fn test_reserved_characters_in_id_stay_in_path() {
    let fixture = TestFixture::new().await;
    let api = fixture.api();
    let id = RestaurantId::new("odd?x=1/y#z");

    api.delete(&id).await.unwrap();
    {
        let backend = fixture.backend();
        assert_eq!(backend.deleted, vec!["odd?x=1/y#z".to_string()]);
        assert_eq!(backend.records.len(), 2);
    }

    let payload = RestaurantForm {
        name: "Odd Diner".to_string(),
        ..RestaurantForm::default()
    }
    .to_payload();
    api.update(&id, &payload).await.unwrap();
    let backend = fixture.backend();
    assert_eq!(backend.updated.len(), 1);
    assert_eq!(backend.updated[0].0, "odd?x=1/y#z");
    assert_eq!(backend.updated[0].1["name"], "Odd Diner");
}

#[tokio::test]
async fn test_cancel_delete_sends_nothing() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();
    app.refresh().await;

    app.click_card(2, CardTarget::DeleteIcon);
    app.cancel_delete();
    assert!(!app.confirm_delete().await);
    assert!(fixture.backend().deleted.is_empty());
}

#[tokio::test]
async fn test_failed_delete_keeps_confirmation_open() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();
    app.refresh().await;
    app.click_card(1, CardTarget::DeleteIcon);

    fixture.backend().fail = true;
    let before = fixture.list_calls();
    assert!(!app.confirm_delete().await);
    assert_eq!(app.error_message(), Some("Failed to delete restaurant"));
    assert!(app.delete_target().is_some());
    assert_eq!(fixture.list_calls(), before);
}

// ==================== FORM ====================

#[tokio::test]
async fn test_create_sends_record_shape() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();

    app.open_create();
    let editor = app.form_mut().unwrap();
    for (key, value) in [
        ("name", "Cafe Zupas"),
        ("address", "5 Mill Ave"),
        ("city", "Tempe"),
        ("state", "AZ"),
        ("categories", "Soup, Salad"),
        ("price_range", "2"),
        ("wifi", "free"),
    ] {
        editor.set_field(key, value).unwrap();
    }
    editor.toggle_parking(ParkingKind::Lot);

    assert!(app.submit_form().await);
    assert!(app.form().is_none());
    assert_eq!(fixture.list_calls(), 1);

    let backend = fixture.backend();
    let body = &backend.created[0];
    assert_eq!(body["name"], "Cafe Zupas");
    assert_eq!(body["state"], "AZ");
    assert_eq!(body["price_range"], "2");
    assert_eq!(body["wifi"], "free");
    assert_eq!(
        body["parking"],
        json!({ "garage": false, "street": false, "validated": false, "lot": true, "valet": false })
    );
}

#[tokio::test]
async fn test_edit_prefills_and_updates() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();
    app.refresh().await;

    app.click_card(1, CardTarget::EditIcon);
    let editor = app.form_mut().unwrap();
    assert!(editor.form.parking.street);
    assert_eq!(editor.form.city, "Phoenix");
    editor.set_field("name", "Pizzeria Bianco Downtown").unwrap();

    assert!(app.submit_form().await);
    let backend = fixture.backend();
    let (id, body) = &backend.updated[0];
    assert_eq!(id, "r1");
    assert_eq!(body["name"], "Pizzeria Bianco Downtown");
    assert_eq!(body["parking"]["street"], true);
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();

    app.open_create();
    assert!(!app.submit_form().await);
    assert_eq!(
        app.form().and_then(|f| f.error.as_deref()),
        Some("Name is required")
    );
    assert!(fixture.backend().created.is_empty());
    assert_eq!(fixture.list_calls(), 0);
}

#[tokio::test]
async fn test_failed_save_keeps_form_open() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();
    app.refresh().await;
    app.click_card(2, CardTarget::EditIcon);

    fixture.backend().fail = true;
    assert!(!app.submit_form().await);

    let editor = app.form().unwrap();
    assert_eq!(editor.error.as_deref(), Some("Failed to update restaurant"));
    assert!(!editor.submitting);
    assert!(app.error_message().is_none());
}

// ==================== CATALOGS ====================

#[tokio::test]
async fn test_catalogs() {
    let fixture = TestFixture::new().await;
    let mut app = fixture.app();

    app.load_categories().await;
    app.load_filter_options().await;
    assert_eq!(app.categories(), ["Bars", "Mexican", "Pizza"]);

    let options = app.filter_options().unwrap();
    assert_eq!(options.parking_kinds(), ParkingKind::ALL.to_vec());
    assert_eq!(options.wifi, vec!["no", "free", "paid"]);

    fixture.backend().fail = true;
    app.load_categories().await;
    assert_eq!(app.error_message(), Some("Failed to fetch categories"));
    assert_eq!(app.categories().len(), 3);
}

#[tokio::test]
async fn test_unreachable_backend() {
    let config = Config {
        api_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let mut app = DirectoryApp::new(ApiClient::new(&config).unwrap(), &config);

    app.refresh().await;
    assert_eq!(app.error_message(), Some("Failed to fetch restaurants"));
}
