//! The table/row walker: enumerate tables, classify columns, select,
//! rewrite, and emit updates.
//!
//! This is the one place in the crate that touches the network. It is
//! inherently sequential per table: one connection is acquired per table,
//! its `SELECT` is read to completion, and the resulting `UPDATE`s are
//! issued on that same connection afterward — a live result set cannot
//! share a connection with a second in-flight query.

use sqlx::{MySqlPool, Row};

use crate::config::Config;
use crate::error::WalkError;
use crate::plan;
use crate::report::{Report, TableReport};
use crate::schema::{self, RowIdStrategy, TableDescriptor};

/// Enumerate every table, scan its text-like columns, and stage/emit
/// updates for any row whose rewritten payload differs from what was read.
///
/// Returns `Err` only for a connection or enumeration failure; per-table
/// and per-row failures are recorded on the returned [`Report`] and do not
/// stop the walk.
pub async fn walk(pool: &MySqlPool, config: &Config) -> Result<Report, WalkError> {
    let tables = schema::list_tables(pool)
        .await
        .map_err(WalkError::Connection)?;

    let mut report = Report::default();

    for table in tables {
        if !config.table_filter.allows(&table) {
            continue;
        }

        let descriptor = match schema::describe_table(pool, &table).await {
            Ok(d) => d,
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "skipping table: metadata failure");
                report.errors.push(err);
                report.tables.push(TableReport {
                    name: table,
                    skipped: true,
                    ..Default::default()
                });
                continue;
            }
        };

        if descriptor.text_like.is_empty() {
            report.tables.push(TableReport {
                name: descriptor.name,
                columns_examined: Vec::new(),
                ..Default::default()
            });
            continue;
        }

        tracing::info!(
            table = %descriptor.name,
            columns = ?descriptor.text_like,
            "scanning table"
        );

        let table_report = scan_table(pool, config, &descriptor, &mut report.errors).await;
        report.tables.push(table_report);
    }

    Ok(report)
}

async fn scan_table(
    pool: &MySqlPool,
    config: &Config,
    descriptor: &TableDescriptor,
    errors: &mut Vec<WalkError>,
) -> TableReport {
    let row_id_cols = descriptor.row_id_columns();
    let select_sql = plan::build_select_sql(&descriptor.name, &row_id_cols, &descriptor.text_like);

    let mut report = TableReport {
        name: descriptor.name.clone(),
        columns_examined: descriptor.text_like.clone(),
        ..Default::default()
    };

    // A single connection serves both the SELECT and the per-row UPDATEs
    // for this table: the driver does not allow a second query to start
    // on a connection while a streaming result set from the first is
    // still open, so the SELECT is read to completion (buffered) before
    // any UPDATE is issued on the same connection.
    let mut conn = match pool.acquire().await {
        Ok(conn) => conn,
        Err(source) => {
            errors.push(WalkError::TableMetadata {
                table: descriptor.name.clone(),
                source,
            });
            return report;
        }
    };

    let rows = match sqlx::query(&select_sql).fetch_all(&mut *conn).await {
        Ok(rows) => rows,
        Err(source) => {
            errors.push(WalkError::TableMetadata {
                table: descriptor.name.clone(),
                source,
            });
            return report;
        }
    };

    for row in rows {
        report.rows_examined += 1;

        let row_id: Vec<(String, Option<Vec<u8>>)> = row_id_cols
            .iter()
            .map(|c| (c.clone(), cell_bytes(&row, c)))
            .collect();

        let text_values: Vec<(String, Option<Vec<u8>>)> = descriptor
            .text_like
            .iter()
            .map(|c| (c.clone(), cell_bytes(&row, c)))
            .collect();

        let row_plan = plan::plan_row_update(&text_values, &config.search, &config.replace, config.max_passes);

        if row_plan.is_noop() || config.dry_run {
            if !row_plan.is_noop() {
                report.rows_updated += 1;
            }
            continue;
        }

        match emit_update(&mut conn, &descriptor.name, &row_id, &row_plan.changed).await {
            Ok(()) => report.rows_updated += 1,
            Err(source) => errors.push(WalkError::RowUpdate {
                table: descriptor.name.clone(),
                source,
            }),
        }
    }

    report
}

/// Read one projected cell as raw bytes-or-null.
///
/// Row-identifier columns are not necessarily text-like (an integer primary
/// key is the common case), so [`plan::build_select_sql`] projects any
/// non-text-like row-identifier column through `CAST(... AS CHAR)` — this
/// is the one place that matters, letting every projected column decode
/// uniformly as `Option<Vec<u8>>` here regardless of its underlying SQL
/// type, while text-like columns (whose payload bytes must never be
/// reinterpreted under a character set) are always projected raw.
fn cell_bytes(row: &sqlx::mysql::MySqlRow, column: &str) -> Option<Vec<u8>> {
    row.try_get::<Option<Vec<u8>>, _>(column).ok().flatten()
}

/// Binds and executes the `UPDATE` built by [`plan::build_update_sql`] on
/// the connection shared with this table's `SELECT`.
async fn emit_update(
    conn: &mut sqlx::pool::PoolConnection<sqlx::MySql>,
    table: &str,
    row_id: &[(String, Option<Vec<u8>>)],
    changed: &[(String, Vec<u8>)],
) -> Result<(), sqlx::Error> {
    let row_id_cols: Vec<String> = row_id.iter().map(|(c, _)| c.clone()).collect();
    let changed_cols: Vec<String> = changed.iter().map(|(c, _)| c.clone()).collect();
    let sql = plan::build_update_sql(table, &row_id_cols, &changed_cols);

    let mut query = sqlx::query(&sql);
    for (_, value) in changed {
        query = query.bind(value.clone());
    }
    for (_, value) in row_id {
        query = query.bind(value.clone());
    }

    query.execute(&mut **conn).await?;
    Ok(())
}

impl RowIdStrategy {
    #[cfg(test)]
    fn is_whole_row(&self) -> bool {
        matches!(self, RowIdStrategy::WholeRow)
    }
}
