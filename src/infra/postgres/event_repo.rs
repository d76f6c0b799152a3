use {
    crate::domain::directory::CustomerAccount,
    crate::domain::error::TimelineError,
    crate::domain::event::{ActivityEvent, DailyCount, EventFilter, NewActivityEvent},
    crate::domain::id::Scope,
    crate::domain::pagination::PageWindow,
    sqlx::{PgPool, Postgres, QueryBuilder, types::Json},
};

const SELECT_EVENTS: &str = r#"
    SELECT id, customer_org_id, account_id, touchpoint_id, "timestamp", activity,
           channel, status, record_type, source_record_type, source_record_id,
           campaign_id, campaign_name, direction, people, involved_team_ids,
           related_opportunity_ids, activity_grouping_id
    FROM activity_events
"#;

/// Rows per INSERT statement; keeps bind parameters under the protocol limit.
const INSERT_CHUNK: usize = 1000;

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &EventFilter) {
    qb.push(" WHERE customer_org_id = ")
        .push_bind(filter.scope.customer_org_id.as_str().to_owned())
        .push(" AND account_id = ")
        .push_bind(filter.scope.account_id.as_str().to_owned());
    if let Some(start) = filter.start {
        qb.push(r#" AND "timestamp" >= "#).push_bind(start);
    }
    if let Some(end) = filter.end {
        qb.push(r#" AND "timestamp" <= "#).push_bind(end);
    }
}

fn to_sql_int(value: u64, what: &str) -> Result<i64, TimelineError> {
    i64::try_from(value).map_err(|_| TimelineError::validation(format!("{what} out of range")))
}

pub async fn customer_accounts(pool: &PgPool) -> Result<Vec<CustomerAccount>, TimelineError> {
    let rows = sqlx::query_as::<_, CustomerAccount>(
        r#"
        SELECT DISTINCT customer_org_id, account_id
        FROM activity_events
        ORDER BY customer_org_id, account_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn count_events(pool: &PgPool, filter: &EventFilter) -> Result<u64, TimelineError> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM activity_events");
    push_filter(&mut qb, filter);

    let count: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(u64::try_from(count).unwrap_or_default())
}

/// One page of `filter`'s events, oldest first.
pub async fn list_events(
    pool: &PgPool,
    filter: &EventFilter,
    window: PageWindow,
) -> Result<Vec<ActivityEvent>, TimelineError> {
    let limit = to_sql_int(window.limit, "page_size")?;
    let offset = to_sql_int(window.offset, "page")?;

    let mut qb = QueryBuilder::new(SELECT_EVENTS);
    push_filter(&mut qb, filter);
    qb.push(r#" ORDER BY "timestamp", id LIMIT "#)
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows = qb.build_query_as::<ActivityEvent>().fetch_all(pool).await?;
    Ok(rows)
}

pub async fn scope_events(pool: &PgPool, scope: &Scope) -> Result<Vec<ActivityEvent>, TimelineError> {
    let sql = format!(
        r#"{SELECT_EVENTS} WHERE customer_org_id = $1 AND account_id = $2 ORDER BY "timestamp", id"#
    );
    let rows = sqlx::query_as::<_, ActivityEvent>(&sql)
        .bind(scope.customer_org_id.as_str())
        .bind(scope.account_id.as_str())
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn daily_counts(
    pool: &PgPool,
    scope: &Scope,
    direction: &str,
) -> Result<Vec<DailyCount>, TimelineError> {
    let rows = sqlx::query_as::<_, DailyCount>(
        r#"
        SELECT ("timestamp" AT TIME ZONE 'UTC')::date AS "date", COUNT(*) AS "count"
        FROM activity_events
        WHERE customer_org_id = $1 AND account_id = $2 AND direction = $3
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .bind(scope.customer_org_id.as_str())
    .bind(scope.account_id.as_str())
    .bind(direction)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Up to `limit` events of `scope` in random order.
pub async fn sample_events(
    pool: &PgPool,
    scope: &Scope,
    limit: u32,
) -> Result<Vec<ActivityEvent>, TimelineError> {
    let sql = format!(
        "{SELECT_EVENTS} WHERE customer_org_id = $1 AND account_id = $2 ORDER BY random() LIMIT $3"
    );
    let rows = sqlx::query_as::<_, ActivityEvent>(&sql)
        .bind(scope.customer_org_id.as_str())
        .bind(scope.account_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Bulk insert. Conflicts on the unique touchpoint key are errors.
pub async fn insert_events(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    events: &[NewActivityEvent],
) -> Result<u64, TimelineError> {
    let mut inserted = 0;

    for chunk in events.chunks(INSERT_CHUNK) {
        let mut qb = QueryBuilder::new(
            r#"INSERT INTO activity_events
                (customer_org_id, account_id, touchpoint_id, "timestamp", activity,
                 channel, status, record_type, source_record_type, source_record_id,
                 campaign_id, campaign_name, direction, people, involved_team_ids,
                 related_opportunity_ids, activity_grouping_id) "#,
        );
        qb.push_values(chunk, |mut row, e| {
            row.push_bind(e.customer_org_id.clone())
                .push_bind(e.account_id.clone())
                .push_bind(e.touchpoint_id.clone())
                .push_bind(e.timestamp)
                .push_bind(e.activity.clone())
                .push_bind(e.channel.clone())
                .push_bind(e.status.clone())
                .push_bind(e.record_type.clone())
                .push_bind(e.source_record_type.clone())
                .push_bind(e.source_record_id.clone())
                .push_bind(e.campaign_id.clone())
                .push_bind(e.campaign_name.clone())
                .push_bind(e.direction.clone())
                .push_bind(Json(e.people.clone()))
                .push_bind(e.involved_team_ids.clone())
                .push_bind(e.related_opportunity_ids.clone())
                .push_bind(e.activity_grouping_id.clone());
        });

        let result = qb.build().execute(&mut **tx).await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}
