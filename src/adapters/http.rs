use {
    crate::{
        AppState,
        adapters::{api_errors::ApiError, query::LastValueQuery},
        domain::{event::ActivityEvent, person::Person},
        services::timeline::{
            self, CountsParams, CustomerDirectory, CustomerParams, DailyCounts, EventPage,
            EventsParams, FirstTouchpoints, ScopeParams,
        },
    },
    axum::{
        Json, Router,
        extract::{DefaultBodyLimit, State},
        http::{Method, StatusCode},
        routing::get,
    },
    std::time::Duration,
    tower_http::{
        cors::{Any, CorsLayer},
        timeout::TimeoutLayer,
        trace::TraceLayer,
    },
};

pub const ROOT_GREETING: &str = "Hello, world! This is the API root.";

// GET-only API
const MAX_BODY_BYTES: usize = 16 * 1024;

/// All routes of the API. Transport concerns (timeouts, body limits) are
/// added separately by [`with_transport_layers`].
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/api/customers/", get(customers))
        .route("/api/events/", get(activity_events))
        .route("/api/events/counts/", get(activity_counts))
        .route("/api/events/first-touchpoints/", get(first_touchpoints))
        .route("/api/events/random/", get(random_activity_events))
        .route("/api/people/random/", get(random_persons))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Requests running longer than `timeout` are answered with 408.
pub fn with_transport_layers(app: Router, timeout: Duration) -> Router {
    app.layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

async fn index() -> &'static str {
    ROOT_GREETING
}

async fn customers(State(state): State<AppState>) -> Result<Json<CustomerDirectory>, ApiError> {
    let directory = timeline::customer_directory(&*state.store).await?;
    Ok(Json(directory))
}

async fn activity_events(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<EventsParams>,
) -> Result<Json<EventPage>, ApiError> {
    let page = timeline::list_events(&*state.store, &params).await?;
    Ok(Json(page))
}

async fn activity_counts(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<CountsParams>,
) -> Result<Json<DailyCounts>, ApiError> {
    let counts = timeline::daily_counts(&*state.store, &params).await?;
    Ok(Json(counts))
}

async fn first_touchpoints(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<ScopeParams>,
) -> Result<Json<FirstTouchpoints>, ApiError> {
    let touchpoints = timeline::first_touchpoints_for(&*state.store, &params).await?;
    Ok(Json(touchpoints))
}

async fn random_activity_events(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<ScopeParams>,
) -> Result<Json<Vec<ActivityEvent>>, ApiError> {
    let events = timeline::random_events(&*state.store, &params).await?;
    Ok(Json(events))
}

async fn random_persons(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<CustomerParams>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let persons = timeline::random_persons(&*state.store, &params).await?;
    Ok(Json(persons))
}
