//! The pure, I/O-free half of a table scan: given one row's column values,
//! decide what changed and what SQL to run. Splitting this out of
//! `walker.rs` means it can be exercised against a fake in-memory row
//! source instead of a live MySQL instance.

use crate::schema::escape_identifier;

/// What one row needs, decided without touching the network.
#[derive(Debug, PartialEq, Eq)]
pub struct RowPlan {
    pub changed: Vec<(String, Vec<u8>)>,
}

impl RowPlan {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Rewrite every text-like column's value and report which ones differ
/// from what was read. `row_id` is carried through unchanged; callers use
/// it only to build the `WHERE` clause.
pub fn plan_row_update(
    text_values: &[(String, Option<Vec<u8>>)],
    search: &[u8],
    replace: &[u8],
    max_passes: usize,
) -> RowPlan {
    let mut changed = Vec::new();
    for (column, value) in text_values {
        let Some(value) = value else {
            continue; // NULL: leave untouched
        };
        let rewritten = cellswap_core::rewrite_with_passes(value, search, replace, max_passes);
        if &rewritten != value {
            changed.push((column.clone(), rewritten));
        }
    }
    RowPlan { changed }
}

/// `SELECT <row-id columns, deduplicated against text-like columns> FROM
/// <table>` with no `WHERE` — every row is a candidate.
///
/// A row-identifier column that is not itself text-like (the common case of
/// an integer primary key) is projected through `CAST(... AS CHAR)` so it
/// decodes uniformly as bytes on the Rust side regardless of its SQL type;
/// a text-like column is always projected raw, since casting blob payload
/// bytes through a character set could corrupt them.
pub fn build_select_sql(table: &str, row_id_cols: &[String], text_like_cols: &[String]) -> String {
    let mut projection: Vec<String> = row_id_cols
        .iter()
        .map(|c| project_column(c, text_like_cols))
        .collect();
    for c in text_like_cols {
        if !row_id_cols.contains(c) {
            projection.push(project_column(c, text_like_cols));
        }
    }
    format!(
        "SELECT {} FROM `{}`",
        projection.join(", "),
        escape_identifier(table)
    )
}

fn project_column(column: &str, text_like_cols: &[String]) -> String {
    let quoted = format!("`{}`", escape_identifier(column));
    if text_like_cols.contains(&column.to_string()) {
        quoted
    } else {
        format!("CAST({} AS CHAR) AS {}", quoted, quoted)
    }
}

/// `UPDATE <t> SET <assignments> WHERE <null-safe-equals-chain>`. The
/// null-safe `<=>` operator is used throughout so a `NULL` row-identifier
/// column still matches. Bind order is `changed` values first, then
/// `row_id` values, matching the `?` placeholders left to right.
pub fn build_update_sql(table: &str, row_id_cols: &[String], changed_cols: &[String]) -> String {
    let set_clause = changed_cols
        .iter()
        .map(|c| format!("`{}` = ?", escape_identifier(c)))
        .collect::<Vec<_>>()
        .join(", ");
    let where_clause = row_id_cols
        .iter()
        .map(|c| format!("`{}` <=> ?", escape_identifier(c)))
        .collect::<Vec<_>>()
        .join(" AND ");

    format!(
        "UPDATE `{}` SET {} WHERE {}",
        escape_identifier(table),
        set_clause,
        where_clause
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_skips_null_columns() {
        let plan = plan_row_update(&[("body".into(), None)], b"old", b"new", 5);
        assert!(plan.is_noop());
    }

    #[test]
    fn plan_flags_only_changed_columns() {
        let rows = vec![
            ("title".to_string(), Some(b"old.example.com".to_vec())),
            ("body".to_string(), Some(b"nothing to see here".to_vec())),
        ];
        let plan = plan_row_update(&rows, b"old.example.com", b"new.example.com", 5);
        assert_eq!(plan.changed.len(), 1);
        assert_eq!(plan.changed[0].0, "title");
        assert_eq!(plan.changed[0].1, b"new.example.com".to_vec());
    }

    #[test]
    fn plan_is_noop_when_nothing_matches() {
        let rows = vec![("title".to_string(), Some(b"unrelated content".to_vec()))];
        let plan = plan_row_update(&rows, b"old.example.com", b"new.example.com", 5);
        assert!(plan.is_noop());
    }

    #[test]
    fn select_sql_dedupes_row_id_and_text_columns() {
        let sql = build_select_sql("wp_posts", &["id".into()], &["id".into(), "post_content".into()]);
        assert_eq!(sql, "SELECT `id`, `post_content` FROM `wp_posts`");
    }

    #[test]
    fn select_sql_handles_whole_row_strategy_with_no_id_columns() {
        let sql = build_select_sql("wp_options", &[], &["option_value".into()]);
        assert_eq!(sql, "SELECT `option_value` FROM `wp_options`");
    }

    #[test]
    fn select_sql_casts_non_text_row_id_columns_to_char() {
        // A non-text-like row-id column (the common integer primary key)
        // must be projected through CAST(... AS CHAR) so it decodes
        // uniformly as bytes; the text-like payload column stays raw.
        let sql = build_select_sql("wp_posts", &["id".into()], &["post_content".into()]);
        assert_eq!(
            sql,
            "SELECT CAST(`id` AS CHAR) AS `id`, `post_content` FROM `wp_posts`"
        );
    }

    #[test]
    fn update_sql_uses_null_safe_equality_and_backtick_quoting() {
        let sql = build_update_sql(
            "wp_posts",
            &["id".into()],
            &["post_content".into(), "post_title".into()],
        );
        assert_eq!(
            sql,
            "UPDATE `wp_posts` SET `post_content` = ?, `post_title` = ? WHERE `id` <=> ?"
        );
    }

    #[test]
    fn update_sql_joins_multiple_row_id_columns_with_and() {
        let sql = build_update_sql("composite", &["a".into(), "b".into()], &["val".into()]);
        assert_eq!(sql, "UPDATE `composite` SET `val` = ? WHERE `a` <=> ? AND `b` <=> ?");
    }
}
