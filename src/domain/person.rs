use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::collections::HashMap,
};

/// A contact belonging to one customer organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(deny_unknown_fields)]
pub struct Person {
    pub customer_org_id: String,
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[serde(default)]
    pub job_title: Option<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Persons keyed by id, as loaded for one enrichment pass.
pub type PersonDirectory = HashMap<String, Person>;

pub fn index_persons(persons: impl IntoIterator<Item = Person>) -> PersonDirectory {
    persons.into_iter().map(|p| (p.id.clone(), p)).collect()
}

/// One entry of an event's embedded `people` list.
///
/// The stored shape is loose: usually an object with `id` (or `person_id`)
/// and `role_in_touchpoint`, sometimes only inline name and email. The raw
/// JSON is kept as-is so unresolved references round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonRef(Value);

impl PersonRef {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The referenced person id: `id` when present and non-empty, otherwise
    /// `person_id`. Numeric ids are returned in their decimal form.
    pub fn person_id(&self) -> Option<String> {
        self.person_id_value().map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// The id exactly as stored, string or number.
    pub fn person_id_value(&self) -> Option<&Value> {
        self.id_field("id").or_else(|| self.id_field("person_id"))
    }

    pub fn role_in_touchpoint(&self) -> Value {
        self.0
            .get("role_in_touchpoint")
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Inline `first_name last_name`, or `None` when both are blank.
    pub fn inline_name(&self) -> Option<String> {
        let name = format!(
            "{} {}",
            self.str_field("first_name"),
            self.str_field("last_name")
        );
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    pub fn inline_email(&self) -> &str {
        self.str_field("email_address")
    }

    fn id_field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| match v {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            _ => false,
        })
    }

    fn str_field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }
}

/// A reference replaced by live `Person` data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPerson {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub role_in_touchpoint: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PersonEntry {
    Resolved(EnrichedPerson),
    Unresolved(PersonRef),
}

/// Resolves each reference against `directory`. References without an id
/// or whose id is unknown are passed through untouched.
pub fn enrich_people(people: &[PersonRef], directory: &PersonDirectory) -> Vec<PersonEntry> {
    people
        .iter()
        .map(|person_ref| {
            match person_ref.person_id().and_then(|id| directory.get(&id)) {
                Some(person) => PersonEntry::Resolved(EnrichedPerson {
                    id: person.id.clone(),
                    first_name: person.first_name.clone(),
                    last_name: person.last_name.clone(),
                    email_address: person.email_address.clone(),
                    role_in_touchpoint: person_ref.role_in_touchpoint(),
                }),
                None => PersonEntry::Unresolved(person_ref.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person(id: &str, first: &str, last: &str) -> Person {
        Person {
            customer_org_id: "org".into(),
            id: id.into(),
            first_name: first.into(),
            last_name: last.into(),
            email_address: format!("{id}@example.com"),
            job_title: None,
        }
    }

    #[test]
    fn person_id_prefers_id_then_person_id() {
        assert_eq!(
            PersonRef::new(json!({"id": "p1", "person_id": "p2"})).person_id(),
            Some("p1".into())
        );
        assert_eq!(
            PersonRef::new(json!({"id": "", "person_id": "p2"})).person_id(),
            Some("p2".into())
        );
        assert_eq!(PersonRef::new(json!({"id": 7})).person_id(), Some("7".into()));
        assert_eq!(
            PersonRef::new(json!({"id": 7})).person_id_value(),
            Some(&json!(7))
        );
        assert_eq!(PersonRef::new(json!({"first_name": "A"})).person_id(), None);
        assert_eq!(PersonRef::new(json!("not an object")).person_id(), None);
    }

    #[test]
    fn inline_name_blank_is_none() {
        assert_eq!(PersonRef::new(json!({"first_name": " "})).inline_name(), None);
        assert_eq!(
            PersonRef::new(json!({"last_name": "Lovelace"})).inline_name(),
            Some("Lovelace".into())
        );
    }

    #[test]
    fn enrich_replaces_known_and_keeps_unknown() {
        let directory = index_persons([person("p1", "Ada", "Lovelace")]);
        let people = vec![
            PersonRef::new(json!({"id": "p1", "role_in_touchpoint": "sender", "first_name": "stale"})),
            PersonRef::new(json!({"id": "ghost", "first_name": "Grace"})),
            PersonRef::new(json!({"email_address": "x@example.com"})),
        ];

        let out = serde_json::to_value(enrich_people(&people, &directory)).unwrap();
        assert_eq!(
            out[0],
            json!({
                "id": "p1",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email_address": "p1@example.com",
                "role_in_touchpoint": "sender",
            })
        );
        assert_eq!(out[1], json!({"id": "ghost", "first_name": "Grace"}));
        assert_eq!(out[2], json!({"email_address": "x@example.com"}));
    }
}
