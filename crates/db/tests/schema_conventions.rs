use sqlx::PgPool;

/// Tables that only ever receive inserts and so carry no `updated_at`.
const APPEND_ONLY: &[&str] = &["events"];

async fn public_tables(pool: &PgPool) -> Vec<String> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(pool)
    .await
    .unwrap();
    rows.into_iter().map(|(t,)| t).collect()
}

async fn column_type(pool: &PgPool, table: &str, column: &str) -> Option<String> {
    sqlx::query_scalar::<_, String>(
        "SELECT data_type
         FROM information_schema.columns
         WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
    )
    .bind(table)
    .bind(column)
    .fetch_optional(pool)
    .await
    .unwrap()
}

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    for table in public_tables(&pool).await {
        if let Some(data_type) = column_type(&pool, &table, "id").await {
            assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
        }
    }
}

/// Every mutable table has `created_at` and `updated_at` as timestamptz,
/// plus a trigger keeping `updated_at` current.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    for table in public_tables(&pool).await {
        let created = column_type(&pool, &table, "created_at").await;
        assert_eq!(
            created.as_deref(),
            Some("timestamp with time zone"),
            "Table {table} needs created_at timestamptz"
        );

        if APPEND_ONLY.contains(&table.as_str()) {
            continue;
        }

        let updated = column_type(&pool, &table, "updated_at").await;
        assert_eq!(
            updated.as_deref(),
            Some("timestamp with time zone"),
            "Table {table} needs updated_at timestamptz"
        );

        let trigger: Option<String> = sqlx::query_scalar(
            "SELECT trigger_name
             FROM information_schema.triggers
             WHERE event_object_table = $1 AND trigger_name = $2",
        )
        .bind(&table)
        .bind(format!("trg_{table}_updated_at"))
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert!(trigger.is_some(), "Table {table} needs trg_{table}_updated_at");
    }
}
