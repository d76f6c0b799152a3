use {
    super::{event_repo, person_repo},
    crate::domain::directory::CustomerAccount,
    crate::domain::event::{ActivityEvent, DailyCount, EventFilter},
    crate::domain::id::{CustomerOrgId, Scope},
    crate::domain::pagination::PageWindow,
    crate::domain::person::Person,
    crate::domain::store::{StoreFuture, TimelineStore},
    sqlx::PgPool,
};

/// [`TimelineStore`] backed by the PostgreSQL tables in `migrations/`.
#[derive(Clone)]
pub struct PgTimelineStore {
    pool: PgPool,
}

impl PgTimelineStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TimelineStore for PgTimelineStore {
    fn customer_accounts(&self) -> StoreFuture<'_, Vec<CustomerAccount>> {
        Box::pin(event_repo::customer_accounts(&self.pool))
    }

    fn count_events<'a>(&'a self, filter: &'a EventFilter) -> StoreFuture<'a, u64> {
        Box::pin(event_repo::count_events(&self.pool, filter))
    }

    fn list_events<'a>(
        &'a self,
        filter: &'a EventFilter,
        window: PageWindow,
    ) -> StoreFuture<'a, Vec<ActivityEvent>> {
        Box::pin(event_repo::list_events(&self.pool, filter, window))
    }

    fn scope_events<'a>(&'a self, scope: &'a Scope) -> StoreFuture<'a, Vec<ActivityEvent>> {
        Box::pin(event_repo::scope_events(&self.pool, scope))
    }

    fn daily_counts<'a>(
        &'a self,
        scope: &'a Scope,
        direction: &'a str,
    ) -> StoreFuture<'a, Vec<DailyCount>> {
        Box::pin(event_repo::daily_counts(&self.pool, scope, direction))
    }

    fn persons_by_id<'a>(&'a self, ids: &'a [String]) -> StoreFuture<'a, Vec<Person>> {
        Box::pin(person_repo::persons_by_id(&self.pool, ids))
    }

    fn sample_events<'a>(
        &'a self,
        scope: &'a Scope,
        limit: u32,
    ) -> StoreFuture<'a, Vec<ActivityEvent>> {
        Box::pin(event_repo::sample_events(&self.pool, scope, limit))
    }

    fn sample_persons<'a>(
        &'a self,
        customer_org_id: &'a CustomerOrgId,
        limit: u32,
    ) -> StoreFuture<'a, Vec<Person>> {
        Box::pin(person_repo::sample_persons(&self.pool, customer_org_id, limit))
    }
}
