use {
    super::directory::CustomerAccount,
    super::error::TimelineError,
    super::event::{ActivityEvent, DailyCount, EventFilter},
    super::id::{CustomerOrgId, Scope},
    super::pagination::PageWindow,
    super::person::Person,
    std::{future::Future, pin::Pin},
};

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TimelineError>> + Send + 'a>>;

/// Read access to events and people. Every ordered query sorts by
/// `(timestamp, id)` ascending.
pub trait TimelineStore: Send + Sync {
    /// Distinct (organization, account) pairs, ordered by both.
    fn customer_accounts(&self) -> StoreFuture<'_, Vec<CustomerAccount>>;

    fn count_events<'a>(&'a self, filter: &'a EventFilter) -> StoreFuture<'a, u64>;

    fn list_events<'a>(
        &'a self,
        filter: &'a EventFilter,
        window: PageWindow,
    ) -> StoreFuture<'a, Vec<ActivityEvent>>;

    /// Every event in `scope`, oldest first.
    fn scope_events<'a>(&'a self, scope: &'a Scope) -> StoreFuture<'a, Vec<ActivityEvent>>;

    /// Per-UTC-day event counts for one direction, oldest day first.
    fn daily_counts<'a>(
        &'a self,
        scope: &'a Scope,
        direction: &'a str,
    ) -> StoreFuture<'a, Vec<DailyCount>>;

    /// Persons whose id is in `ids`. Unknown ids are simply absent.
    fn persons_by_id<'a>(&'a self, ids: &'a [String]) -> StoreFuture<'a, Vec<Person>>;

    fn sample_events<'a>(
        &'a self,
        scope: &'a Scope,
        limit: u32,
    ) -> StoreFuture<'a, Vec<ActivityEvent>>;

    fn sample_persons<'a>(
        &'a self,
        customer_org_id: &'a CustomerOrgId,
        limit: u32,
    ) -> StoreFuture<'a, Vec<Person>>;
}
