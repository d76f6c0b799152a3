use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::TimelineError;

pub const SCOPE_REQUIRED: &str =
    "Both 'customer_org_id' and 'account_id' query parameters are required.";
pub const CUSTOMER_REQUIRED: &str = "'customer_org_id' query parameter is required.";

/// Customer organization identifier. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerOrgId(String);

impl CustomerOrgId {
    pub fn new(id: impl Into<String>) -> Result<Self, TimelineError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TimelineError::validation(CUSTOMER_REQUIRED));
        }
        Ok(Self(id))
    }

    /// Accepts an optional query-string value; absent and empty are both rejected.
    pub fn from_param(id: Option<String>) -> Result<Self, TimelineError> {
        Self::new(id.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Account identifier within a customer organization. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Result<Self, TimelineError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TimelineError::validation(SCOPE_REQUIRED));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The (customer organization, account) pair every event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{customer_org_id}/{account_id}")]
pub struct Scope {
    pub customer_org_id: CustomerOrgId,
    pub account_id: AccountId,
}

impl Scope {
    pub fn new(customer_org_id: CustomerOrgId, account_id: AccountId) -> Self {
        Self {
            customer_org_id,
            account_id,
        }
    }

    /// Builds a scope from raw query parameters. Either one missing or empty
    /// yields the same validation error.
    pub fn from_params(
        customer_org_id: Option<String>,
        account_id: Option<String>,
    ) -> Result<Self, TimelineError> {
        let missing = || TimelineError::validation(SCOPE_REQUIRED);
        let customer_org_id = CustomerOrgId::new(customer_org_id.unwrap_or_default())
            .map_err(|_| missing())?;
        let account_id = AccountId::new(account_id.unwrap_or_default()).map_err(|_| missing())?;
        Ok(Self::new(customer_org_id, account_id))
    }
}
