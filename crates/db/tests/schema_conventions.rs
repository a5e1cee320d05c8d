use sqlx::PgPool;

/// Every `id` column must be bigint, matching the `DbId` alias in core.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty(), "expected id columns in the schema");
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Every table carries created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let stamps: Vec<(String, String)> = sqlx::query_as(
            "SELECT column_name, data_type
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name IN ('created_at', 'updated_at')
             ORDER BY column_name",
        )
        .bind(table)
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(stamps.len(), 2, "Table {table} is missing a timestamp column");
        for (column, data_type) in &stamps {
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{column} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// Unique constraints must use the `uq_` prefix so the API error classifier
/// can map violations to 409 responses.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, constraint_name
         FROM information_schema.table_constraints
         WHERE constraint_type = 'UNIQUE'
           AND table_schema = 'public'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty(), "expected at least one unique constraint");
    for (table, constraint) in &rows {
        assert!(
            constraint.starts_with("uq_"),
            "Constraint {constraint} on {table} should start with uq_"
        );
    }
}
