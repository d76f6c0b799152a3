use {
    super::id::Scope,
    super::person::{PersonDirectory, PersonEntry, PersonRef, enrich_people},
    super::timestamp::serialize_rfc3339,
    chrono::{DateTime, NaiveDate, Utc},
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

pub const DEFAULT_DIRECTION: &str = "IN";

/// A stored activity/touchpoint event. Read-only once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ActivityEvent {
    pub id: i64,
    pub customer_org_id: String,
    pub account_id: String,
    pub touchpoint_id: String,
    pub timestamp: DateTime<Utc>,
    pub activity: Option<String>,
    pub channel: String,
    pub status: String,
    pub record_type: String,
    pub source_record_type: Option<String>,
    pub source_record_id: Option<String>,
    pub campaign_id: Option<String>,
    pub campaign_name: Option<String>,
    pub direction: String,
    #[sqlx(json)]
    pub people: Vec<PersonRef>,
    pub involved_team_ids: Value,
    pub related_opportunity_ids: Value,
    pub activity_grouping_id: Option<String>,
}

impl ActivityEvent {
    pub fn in_scope(&self, scope: &Scope) -> bool {
        self.customer_org_id == scope.customer_org_id.as_str()
            && self.account_id == scope.account_id.as_str()
    }

    /// Ids of every person this event references, in list order.
    pub fn referenced_person_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.people.iter().filter_map(PersonRef::person_id)
    }

    pub fn to_view(&self, directory: &PersonDirectory) -> EventView {
        EventView {
            id: self.id,
            timestamp: self.timestamp,
            activity: self.activity.clone(),
            channel: self.channel.clone(),
            status: self.status.clone(),
            people: enrich_people(&self.people, directory),
            involved_team_ids: self.involved_team_ids.clone(),
            direction: self.direction.clone(),
            customer_org_id: self.customer_org_id.clone(),
            account_id: self.account_id.clone(),
        }
    }
}

/// An event row as found in an import file, before it has an id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewActivityEvent {
    pub customer_org_id: String,
    pub account_id: String,
    pub touchpoint_id: String,
    #[serde(skip)]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub activity: Option<String>,
    pub channel: String,
    pub status: String,
    pub record_type: String,
    #[serde(default)]
    pub source_record_type: Option<String>,
    #[serde(default)]
    pub source_record_id: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub campaign_name: Option<String>,
    pub direction: String,
    pub people: Vec<PersonRef>,
    pub involved_team_ids: Value,
    pub related_opportunity_ids: Value,
    #[serde(default)]
    pub activity_grouping_id: Option<String>,
}

/// Scope plus an inclusive time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub scope: Scope,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            start: None,
            end: None,
        }
    }

    pub fn matches(&self, event: &ActivityEvent) -> bool {
        event.in_scope(&self.scope)
            && self.start.is_none_or(|start| event.timestamp >= start)
            && self.end.is_none_or(|end| event.timestamp <= end)
    }
}

/// Event as returned by the listing endpoint, people enriched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventView {
    pub id: i64,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub activity: Option<String>,
    pub channel: String,
    pub status: String,
    pub people: Vec<PersonEntry>,
    pub involved_team_ids: Value,
    pub direction: String,
    pub customer_org_id: String,
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}
