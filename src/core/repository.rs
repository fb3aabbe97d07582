use crate::domain::model::{Quote, Statement};
use crate::domain::ports::Database;
use crate::domain::schema::{table_names, TABLES};
use crate::utils::error::{AppError, Result};

/// Creates every table that does not exist yet. Returns the table names.
pub async fn push_schema<D: Database + ?Sized>(db: &D) -> Result<Vec<&'static str>> {
    let statements = TABLES.iter().map(|t| Statement::new(t.ddl)).collect();
    db.execute_batch(statements).await?;
    Ok(table_names())
}

fn insert_quote(quote: &Quote) -> Statement {
    Statement::with_args(
        "INSERT INTO quotes (text, source, category) VALUES (?, ?, ?)",
        vec![
            quote.text.as_str().into(),
            quote.source.as_str().into(),
            quote.category.as_deref().into(),
        ],
    )
}

/// Replaces the whole quotes table in one transaction. A failed insert leaves
/// the previous quotes in place.
pub async fn replace_quotes<D: Database + ?Sized>(db: &D, quotes: &[Quote]) -> Result<usize> {
    let mut statements = Vec::with_capacity(quotes.len() + 1);
    statements.push(Statement::new("DELETE FROM quotes"));
    statements.extend(quotes.iter().map(insert_quote));

    let results = db.execute_transaction(statements).await?;
    let inserted = results
        .iter()
        .skip(1)
        .map(|r| r.affected_rows as usize)
        .sum();
    Ok(inserted)
}

pub async fn delete_all_quotes<D: Database + ?Sized>(db: &D) -> Result<u64> {
    let results = db
        .execute_batch(vec![Statement::new("DELETE FROM quotes")])
        .await?;
    Ok(results.first().map(|r| r.affected_rows).unwrap_or(0))
}

pub async fn count_quotes<D: Database + ?Sized>(db: &D) -> Result<i64> {
    let results = db
        .execute_batch(vec![Statement::new("SELECT COUNT(*) FROM quotes")])
        .await?;

    results
        .first()
        .and_then(|r| r.rows.first())
        .and_then(|row| row.first())
        .and_then(|v| v.as_i64())
        .ok_or_else(|| AppError::DatabaseError {
            message: "COUNT(*) returned no value".to_string(),
        })
}
