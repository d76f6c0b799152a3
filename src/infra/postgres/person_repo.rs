use {
    crate::domain::error::TimelineError,
    crate::domain::id::CustomerOrgId,
    crate::domain::person::Person,
    sqlx::{PgPool, Postgres, QueryBuilder},
};

const INSERT_CHUNK: usize = 5000;

pub async fn persons_by_id(pool: &PgPool, ids: &[String]) -> Result<Vec<Person>, TimelineError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, Person>(
        r#"
        SELECT customer_org_id, id, first_name, last_name, email_address, job_title
        FROM persons
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids.to_vec())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Up to `limit` persons of one organization in random order.
pub async fn sample_persons(
    pool: &PgPool,
    customer_org_id: &CustomerOrgId,
    limit: u32,
) -> Result<Vec<Person>, TimelineError> {
    let rows = sqlx::query_as::<_, Person>(
        r#"
        SELECT customer_org_id, id, first_name, last_name, email_address, job_title
        FROM persons
        WHERE customer_org_id = $1
        ORDER BY random()
        LIMIT $2
        "#,
    )
    .bind(customer_org_id.as_str())
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Bulk insert. Duplicate primary keys are errors.
pub async fn insert_persons(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    persons: &[Person],
) -> Result<u64, TimelineError> {
    let mut inserted = 0;

    for chunk in persons.chunks(INSERT_CHUNK) {
        let mut qb = QueryBuilder::new(
            "INSERT INTO persons (customer_org_id, id, first_name, last_name, email_address, job_title) ",
        );
        qb.push_values(chunk, |mut row, p| {
            row.push_bind(p.customer_org_id.clone())
                .push_bind(p.id.clone())
                .push_bind(p.first_name.clone())
                .push_bind(p.last_name.clone())
                .push_bind(p.email_address.clone())
                .push_bind(p.job_title.clone());
        });

        let result = qb.build().execute(&mut **tx).await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}
