use serde::Serialize;

/// One distinct (organization, account) pair seen in the event table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CustomerAccount {
    pub customer_org_id: String,
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerEntry {
    pub customer_org_id: String,
    pub accounts: Vec<AccountEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountEntry {
    pub account_id: String,
    pub display_name: String,
}

/// Nests accounts under their organization, keeping first-seen order for
/// both levels.
pub fn group_accounts(pairs: impl IntoIterator<Item = CustomerAccount>) -> Vec<CustomerEntry> {
    let mut customers: Vec<CustomerEntry> = Vec::new();

    for pair in pairs {
        let account = AccountEntry {
            // No account names are stored yet.
            display_name: pair.account_id.clone(),
            account_id: pair.account_id,
        };
        match customers
            .iter_mut()
            .find(|c| c.customer_org_id == pair.customer_org_id)
        {
            Some(entry) => entry.accounts.push(account),
            None => customers.push(CustomerEntry {
                customer_org_id: pair.customer_org_id,
                accounts: vec![account],
            }),
        }
    }

    customers
}
