//! Structural checks on the migrated schema.

use sqlx::PgPool;

/// `(table, column, data_type)` for every user column.
async fn columns(pool: &PgPool) -> Vec<(String, String, String)> {
    sqlx::query_as(
        "SELECT table_name::TEXT, column_name::TEXT, data_type::TEXT
         FROM information_schema.columns
         WHERE table_schema = 'public' AND table_name <> '_sqlx_migrations'
         ORDER BY table_name, ordinal_position",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

/// `(table, column, delete_rule)` for every single-column foreign key.
async fn foreign_keys(pool: &PgPool) -> Vec<(String, String, String)> {
    sqlx::query_as(
        "SELECT kcu.table_name::TEXT, kcu.column_name::TEXT, rc.delete_rule::TEXT
         FROM information_schema.referential_constraints rc
         JOIN information_schema.key_column_usage kcu
           ON kcu.constraint_name = rc.constraint_name
          AND kcu.constraint_schema = rc.constraint_schema
         WHERE rc.constraint_schema = 'public'
         ORDER BY kcu.table_name, kcu.column_name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

fn type_of<'a>(cols: &'a [(String, String, String)], table: &str, column: &str) -> Option<&'a str> {
    cols.iter()
        .find(|(t, c, _)| t == table && c == column)
        .map(|(_, _, ty)| ty.as_str())
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ids_are_bigint_and_audit_columns_are_timestamptz(pool: PgPool) {
    let cols = columns(&pool).await;
    let mut tables: Vec<&str> = cols.iter().map(|(t, _, _)| t.as_str()).collect();
    tables.dedup();
    assert_eq!(tables.len(), 13, "tables: {tables:?}");

    for table in tables {
        assert_eq!(type_of(&cols, table, "id"), Some("bigint"), "{table}.id");
        for audit in ["created_at", "updated_at"] {
            assert_eq!(
                type_of(&cols, table, audit),
                Some("timestamp with time zone"),
                "{table}.{audit}"
            );
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn text_columns_never_use_varchar(pool: PgPool) {
    let varchar: Vec<_> = columns(&pool)
        .await
        .into_iter()
        .filter(|(_, _, ty)| ty == "character varying")
        .collect();
    assert!(varchar.is_empty(), "{varchar:?}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_table_keeps_updated_at_current(pool: PgPool) {
    let untriggered: Vec<(String,)> = sqlx::query_as(
        "SELECT c.relname::TEXT
         FROM pg_class c
         JOIN pg_namespace n ON n.oid = c.relnamespace
         WHERE n.nspname = 'public' AND c.relkind = 'r' AND c.relname <> '_sqlx_migrations'
           AND NOT EXISTS (
               SELECT 1 FROM pg_trigger t
               JOIN pg_proc p ON p.oid = t.tgfoid
               WHERE t.tgrelid = c.oid AND p.proname = 'set_updated_at')",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(untriggered.is_empty(), "{untriggered:?}");
}

/// The API maps `23505` to 409 only for `uq_*` names.
#[sqlx::test(migrations = "../../db/migrations")]
async fn unique_constraints_use_uq_prefix(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT constraint_name::TEXT FROM information_schema.table_constraints
         WHERE table_schema = 'public' AND constraint_type = 'UNIQUE'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(names.len() >= 10);
    for (name,) in names {
        assert!(name.starts_with("uq_"), "{name}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_keys_are_indexed(pool: PgPool) {
    let indexed: Vec<(String, String)> = sqlx::query_as(
        "SELECT t.relname::TEXT, a.attname::TEXT
         FROM pg_index i
         JOIN pg_class t ON t.oid = i.indrelid
         JOIN pg_attribute a ON a.attrelid = t.oid AND a.attnum = i.indkey[0]",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, column, _) in foreign_keys(&pool).await {
        assert!(
            indexed.iter().any(|(t, c)| *t == table && *c == column),
            "{table}.{column} has no leading index"
        );
    }
}

/// Covers and itinerary stops survive their image or attraction; all
/// other children go with their parent.
#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_rules_match_ownership(pool: PgPool) {
    let set_null = [
        ("attractions", "cover_image_id"),
        ("destinations", "cover_image_id"),
        ("itinerary_items", "attraction_id"),
    ];

    for (table, column, rule) in foreign_keys(&pool).await {
        let expected = if set_null.contains(&(table.as_str(), column.as_str())) {
            "SET NULL"
        } else {
            "CASCADE"
        };
        assert_eq!(rule, expected, "{table}.{column}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_after_bootstrap(pool: PgPool) {
    travelguide_db::health_check(&pool).await.unwrap();
}
