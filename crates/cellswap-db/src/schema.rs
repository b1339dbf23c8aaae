//! Table/column discovery.
//!
//! A [`TableDescriptor`] is built once per table from three metadata
//! queries and discarded once that table's scan finishes — it carries no
//! state across tables.

use sqlx::{MySqlPool, Row};

use crate::error::WalkError;

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub type_name: String,
}

impl ColumnInfo {
    /// A column is text-like when its declared type name contains `char`,
    /// `text`, or `blob` as a case-insensitive substring.
    pub fn is_text_like(&self) -> bool {
        let lower = self.type_name.to_ascii_lowercase();
        ["char", "text", "blob"]
            .iter()
            .any(|needle| lower.contains(needle))
    }
}

#[derive(Debug, Clone)]
pub enum RowIdStrategy {
    /// Primary key columns, or the first-encountered unique key's columns.
    Columns(Vec<String>),
    /// No usable key was found; address rows by matching every column.
    WholeRow,
}

#[derive(Debug, Clone)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    pub text_like: Vec<String>,
    pub row_id: RowIdStrategy,
}

impl TableDescriptor {
    /// Columns that must be read (and bound in `WHERE`) to re-address a
    /// row, independent of whether they also happen to be text-like.
    pub fn row_id_columns(&self) -> Vec<String> {
        match &self.row_id {
            RowIdStrategy::Columns(cols) => cols.clone(),
            RowIdStrategy::WholeRow => self.columns.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

pub async fn list_tables(pool: &MySqlPool) -> Result<Vec<String>, sqlx::Error> {
    let rows = sqlx::query("SHOW TABLES").fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| row.get::<String, _>(0))
        .collect())
}

async fn primary_key_columns(pool: &MySqlPool, table: &str) -> Result<Vec<String>, sqlx::Error> {
    let sql = format!(
        "SHOW KEYS FROM `{}` WHERE Key_name = 'PRIMARY'",
        escape_identifier(table)
    );
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| row.get::<String, _>("Column_name"))
        .collect())
}

/// First-encountered unique index's columns, stopping at the first change
/// in `Key_name`.
async fn first_unique_key_columns(
    pool: &MySqlPool,
    table: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let sql = format!(
        "SHOW INDEX FROM `{}` WHERE Non_unique = 0",
        escape_identifier(table)
    );
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    let mut columns = Vec::new();
    let mut current_index_name: Option<String> = None;
    for row in rows {
        let key_name: String = row.get("Key_name");
        let column_name: String = row.get("Column_name");
        match &current_index_name {
            None => {
                current_index_name = Some(key_name);
                columns.push(column_name);
            }
            Some(name) if *name == key_name => columns.push(column_name),
            Some(_) => break,
        }
    }
    Ok(columns)
}

async fn columns_of(pool: &MySqlPool, table: &str) -> Result<Vec<ColumnInfo>, sqlx::Error> {
    let sql = format!("SHOW COLUMNS FROM `{}`", escape_identifier(table));
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|row| ColumnInfo {
            name: row.get::<String, _>("Field"),
            type_name: row.get::<String, _>("Type"),
        })
        .collect())
}

/// Discover everything needed to scan and rewrite one table.
pub async fn describe_table(
    pool: &MySqlPool,
    table: &str,
) -> Result<TableDescriptor, WalkError> {
    let map_err = |source: sqlx::Error| WalkError::TableMetadata {
        table: table.to_string(),
        source,
    };

    let columns = columns_of(pool, table).await.map_err(map_err)?;

    let primary = primary_key_columns(pool, table).await.map_err(map_err)?;
    let row_id = if !primary.is_empty() {
        RowIdStrategy::Columns(primary)
    } else {
        let unique = first_unique_key_columns(pool, table).await.map_err(map_err)?;
        if !unique.is_empty() {
            RowIdStrategy::Columns(unique)
        } else {
            RowIdStrategy::WholeRow
        }
    };

    let text_like = columns
        .iter()
        .filter(|c| c.is_text_like())
        .map(|c| c.name.clone())
        .collect();

    Ok(TableDescriptor {
        name: table.to_string(),
        columns,
        text_like,
        row_id,
    })
}

/// Backtick-quote an identifier, doubling any embedded backtick — table
/// and column names are never interpolated as values, but they cannot be
/// bound as parameters either, so this is the one place raw string
/// formatting into SQL is correct.
pub fn escape_identifier(ident: &str) -> String {
    ident.replace('`', "``")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_like_matches_char_text_blob_case_insensitively() {
        let col = |type_name: &str| ColumnInfo {
            name: "c".into(),
            type_name: type_name.into(),
        };
        assert!(col("varchar(255)").is_text_like());
        assert!(col("TEXT").is_text_like());
        assert!(col("longblob").is_text_like());
        assert!(!col("int(11)").is_text_like());
        assert!(!col("datetime").is_text_like());
    }

    #[test]
    fn escape_identifier_doubles_backticks() {
        assert_eq!(escape_identifier("wp`posts"), "wp``posts");
        assert_eq!(escape_identifier("wp_posts"), "wp_posts");
    }

    #[test]
    fn whole_row_strategy_uses_every_column() {
        let desc = TableDescriptor {
            name: "t".into(),
            columns: vec![
                ColumnInfo { name: "a".into(), type_name: "int".into() },
                ColumnInfo { name: "b".into(), type_name: "text".into() },
            ],
            text_like: vec!["b".into()],
            row_id: RowIdStrategy::WholeRow,
        };
        assert_eq!(desc.row_id_columns(), vec!["a".to_string(), "b".to_string()]);
    }
}
