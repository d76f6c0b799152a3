use {
    crate::domain::directory::{CustomerEntry, group_accounts},
    crate::domain::error::TimelineError,
    crate::domain::event::{ActivityEvent, DEFAULT_DIRECTION, DailyCount, EventFilter, EventView},
    crate::domain::id::{CustomerOrgId, Scope},
    crate::domain::pagination::{PageRequest, PaginationMeta, Paginator},
    crate::domain::person::{Person, PersonDirectory, index_persons},
    crate::domain::store::TimelineStore,
    crate::domain::timestamp::parse_iso8601,
    crate::domain::touchpoint::{FirstTouchpoint, first_touchpoints},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

pub const RANDOM_EVENTS_LIMIT: u32 = 10;
pub const RANDOM_PERSONS_LIMIT: u32 = 5;

/// Query parameters of `/api/events/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsParams {
    pub customer_org_id: Option<String>,
    pub account_id: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Query parameters of `/api/events/counts/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountsParams {
    pub customer_org_id: Option<String>,
    pub account_id: Option<String>,
    pub direction: Option<String>,
}

/// Query parameters of the endpoints that only need a scope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeParams {
    pub customer_org_id: Option<String>,
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerParams {
    pub customer_org_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventPage {
    pub events: Vec<EventView>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct DailyCounts {
    pub daily_counts: Vec<DailyCount>,
    pub direction: String,
}

#[derive(Debug, Serialize)]
pub struct FirstTouchpoints {
    pub first_touchpoints: Vec<FirstTouchpoint>,
}

#[derive(Debug, Serialize)]
pub struct CustomerDirectory {
    pub customers: Vec<CustomerEntry>,
}

fn parse_date_param(
    raw: Option<&str>,
    name: &str,
) -> Result<Option<DateTime<Utc>>, TimelineError> {
    // An empty bound means "no bound".
    raw.map(str::trim).filter(|s| !s.is_empty()).map(|s| {
        parse_iso8601(s)
            .ok_or_else(|| TimelineError::validation(format!("Invalid {name} format")))
    })
    .transpose()
}

/// Loads every person referenced by `events` in one query.
async fn load_people(
    store: &dyn TimelineStore,
    events: &[ActivityEvent],
) -> Result<PersonDirectory, TimelineError> {
    let mut ids: Vec<String> = events
        .iter()
        .flat_map(ActivityEvent::referenced_person_ids)
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let persons = store.persons_by_id(&ids).await?;
    Ok(index_persons(persons))
}

/// One page of a scope's events, oldest first, with people enriched.
pub async fn list_events(
    store: &dyn TimelineStore,
    params: &EventsParams,
) -> Result<EventPage, TimelineError> {
    let scope = Scope::from_params(params.customer_org_id.clone(), params.account_id.clone())?;
    let mut filter = EventFilter::new(scope);
    filter.start = parse_date_param(params.start_date.as_deref(), "start_date")?;
    filter.end = parse_date_param(params.end_date.as_deref(), "end_date")?;
    let request = PageRequest::from_params(params.page.as_deref(), params.page_size.as_deref())?;

    let total = store.count_events(&filter).await?;
    let paginator = Paginator::new(total, request.page_size);
    let window = paginator.window(request.page);

    let events = if total == 0 {
        Vec::new()
    } else {
        store.list_events(&filter, window).await?
    };
    let people = load_people(store, &events).await?;

    tracing::debug!(
        scope = %filter.scope,
        page = window.number,
        returned = events.len(),
        total,
        "listed events"
    );

    Ok(EventPage {
        events: events.iter().map(|e| e.to_view(&people)).collect(),
        pagination: paginator.meta(&window),
    })
}

/// Events per UTC day for one direction (`IN` unless given).
pub async fn daily_counts(
    store: &dyn TimelineStore,
    params: &CountsParams,
) -> Result<DailyCounts, TimelineError> {
    let scope = Scope::from_params(params.customer_org_id.clone(), params.account_id.clone())?;
    let direction = params
        .direction
        .clone()
        .unwrap_or_else(|| DEFAULT_DIRECTION.to_string());

    let daily_counts = store.daily_counts(&scope, &direction).await?;
    tracing::debug!(%scope, %direction, days = daily_counts.len(), "computed daily counts");

    Ok(DailyCounts {
        daily_counts,
        direction,
    })
}

pub async fn first_touchpoints_for(
    store: &dyn TimelineStore,
    params: &ScopeParams,
) -> Result<FirstTouchpoints, TimelineError> {
    let scope = Scope::from_params(params.customer_org_id.clone(), params.account_id.clone())?;

    let events = store.scope_events(&scope).await?;
    let people = load_people(store, &events).await?;
    let first_touchpoints = first_touchpoints(&events, &people);

    tracing::debug!(
        %scope,
        scanned = events.len(),
        persons = first_touchpoints.len(),
        "computed first touchpoints"
    );

    Ok(FirstTouchpoints { first_touchpoints })
}

pub async fn customer_directory(
    store: &dyn TimelineStore,
) -> Result<CustomerDirectory, TimelineError> {
    let pairs = store.customer_accounts().await?;
    Ok(CustomerDirectory {
        customers: group_accounts(pairs),
    })
}

pub async fn random_events(
    store: &dyn TimelineStore,
    params: &ScopeParams,
) -> Result<Vec<ActivityEvent>, TimelineError> {
    let scope = Scope::from_params(params.customer_org_id.clone(), params.account_id.clone())?;
    store.sample_events(&scope, RANDOM_EVENTS_LIMIT).await
}

pub async fn random_persons(
    store: &dyn TimelineStore,
    params: &CustomerParams,
) -> Result<Vec<Person>, TimelineError> {
    let customer_org_id = CustomerOrgId::from_param(params.customer_org_id.clone())?;
    store
        .sample_persons(&customer_org_id, RANDOM_PERSONS_LIMIT)
        .await
}
