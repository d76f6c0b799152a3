use {
    crate::{adapters::api_errors::ApiError, domain::error::TimelineError},
    axum::{
        extract::{FromRequestParts, Query},
        http::request::Parts,
    },
    serde::de::DeserializeOwned,
    serde_json::{Map, Value},
};

/// Query-string extractor that tolerates repeated keys (the last value wins)
/// and reports failures as JSON `ApiError`s instead of axum's plain-text
/// rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastValueQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for LastValueQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|rejection| TimelineError::validation(rejection.body_text()))?;

        // Later inserts overwrite earlier ones.
        let fields: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        let params = serde_json::from_value(Value::Object(fields))
            .map_err(|e| TimelineError::validation(format!("invalid query string: {e}")))?;
        Ok(Self(params))
    }
}
