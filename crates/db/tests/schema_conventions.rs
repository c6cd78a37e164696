//! Structural checks over the migrated schema.

use sqlx::PgPool;

const MIGRATIONS_TABLE: &str = "_sqlx_migrations";

async fn public_tables(pool: &PgPool) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT table_name::TEXT
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name <> $1
         ORDER BY table_name",
    )
    .bind(MIGRATIONS_TABLE)
    .fetch_all(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expected_tables_exist(pool: PgPool) {
    let tables = public_tables(&pool).await;
    assert_eq!(
        tables,
        vec!["data_checks", "datasets", "organizations", "records"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn primary_keys_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::TEXT, data_type::TEXT
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND column_name = 'id'
           AND table_name <> $1",
    )
    .bind(MIGRATIONS_TABLE)
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 4);
    for (table, data_type) in rows {
        assert_eq!(data_type, "bigint", "{table}.id");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_table_has_timestamptz_audit_columns(pool: PgPool) {
    for table in public_tables(&pool).await {
        for column in ["created_at", "updated_at"] {
            let data_type: Option<String> = sqlx::query_scalar(
                "SELECT data_type::TEXT
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
            )
            .bind(&table)
            .bind(column)
            .fetch_optional(&pool)
            .await
            .unwrap();

            assert_eq!(
                data_type.as_deref(),
                Some("timestamp with time zone"),
                "{table}.{column}"
            );
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn text_columns_do_not_use_varchar(pool: PgPool) {
    let offenders: Vec<String> = sqlx::query_scalar(
        "SELECT (table_name || '.' || column_name)::TEXT
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name <> $1",
    )
    .bind(MIGRATIONS_TABLE)
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(offenders.is_empty(), "VARCHAR columns: {offenders:?}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_keys_are_indexed_and_declare_rules(pool: PgPool) {
    let fks: Vec<(String, String, String, String)> = sqlx::query_as(
        "SELECT tc.table_name::TEXT, kcu.column_name::TEXT,
                rc.delete_rule::TEXT, rc.update_rule::TEXT
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON kcu.constraint_name = tc.constraint_name
            AND kcu.table_schema = tc.table_schema
         JOIN information_schema.referential_constraints rc
             ON rc.constraint_name = tc.constraint_name
            AND rc.constraint_schema = tc.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(fks.len(), 3);

    for (table, column, on_delete, on_update) in fks {
        let indexed: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = $1
                  AND indexdef LIKE '%(' || $2 || ')%'
            )",
        )
        .bind(&table)
        .bind(&column)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(indexed, "{table}.{column} has no index");

        assert_ne!(on_delete, "NO ACTION", "{table}.{column} ON DELETE");
        assert_eq!(on_update, "CASCADE", "{table}.{column} ON UPDATE");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn updated_at_is_maintained_by_trigger(pool: PgPool) {
    let triggers: Vec<String> = sqlx::query_scalar(
        "SELECT event_object_table::TEXT
         FROM information_schema.triggers
         WHERE trigger_schema = 'public'
           AND action_statement LIKE '%set_updated_at%'
         ORDER BY event_object_table",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(
        triggers,
        vec!["data_checks", "datasets", "organizations", "records"]
    );
}
