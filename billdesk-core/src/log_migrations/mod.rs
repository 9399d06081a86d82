//! Schema migrations for logs.duckdb, embedded at compile time

/// `(filename, sql)` pairs applied in order. `000_migrations.sql` creates
/// the bookkeeping table and is always applied first.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_initial_schema.sql", include_str!("001_initial_schema.sql")),
];
