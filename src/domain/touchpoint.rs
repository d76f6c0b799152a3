use {
    super::event::ActivityEvent,
    super::person::PersonDirectory,
    super::timestamp::serialize_rfc3339,
    chrono::{DateTime, Utc},
    serde::Serialize,
    serde_json::Value,
    std::collections::HashSet,
};

pub const UNKNOWN_PERSON: &str = "Unknown";

/// The earliest event that references a given person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstTouchpoint {
    /// As stored in the reference, so numeric ids stay numbers.
    pub person_id: Value,
    pub person_name: String,
    pub email: String,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub activity: Option<String>,
    pub channel: String,
}

/// Records the first touchpoint of every referenced person.
///
/// `events` must already be in chronological order; the first event seen for
/// a person wins. Names and emails come from `directory` when the person is
/// known, otherwise from the inline reference data.
pub fn first_touchpoints<'a>(
    events: impl IntoIterator<Item = &'a ActivityEvent>,
    directory: &PersonDirectory,
) -> Vec<FirstTouchpoint> {
    let mut seen = HashSet::new();
    let mut touchpoints = Vec::new();

    for event in events {
        for person_ref in &event.people {
            let (Some(person_id), Some(raw_id)) =
                (person_ref.person_id(), person_ref.person_id_value())
            else {
                continue;
            };
            if !seen.insert(person_id.clone()) {
                continue;
            }

            let (person_name, email) = match directory.get(&person_id) {
                Some(person) => (person.full_name(), person.email_address.clone()),
                None => (
                    person_ref
                        .inline_name()
                        .unwrap_or_else(|| UNKNOWN_PERSON.to_string()),
                    person_ref.inline_email().to_string(),
                ),
            };

            touchpoints.push(FirstTouchpoint {
                person_id: raw_id.clone(),
                person_name,
                email,
                timestamp: event.timestamp,
                activity: event.activity.clone(),
                channel: event.channel.clone(),
            });
        }
    }

    // Stable, so input order decides ties.
    touchpoints.sort_by_key(|t| t.timestamp);
    touchpoints
}
