//! Row extraction from the Android contacts provider database.
//!
//! Reads the `data` table joined with `mimetypes` and `raw_contacts`,
//! restricted to the mimetypes the exporter understands and ordered by raw
//! contact so rows for one contact arrive together.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::models::{Mimetype, RawRow, DATA_COLUMNS};

const CONTACT_ROWS_SQL: &str = r#"
    SELECT m.mimetype,
           c._id AS contact_id,
           c.display_name AS display_name,
           d.data1, d.data2, d.data3, d.data4, d.data5,
           d.data6, d.data7, d.data8, d.data9, d.data10,
           d.data11, d.data12, d.data13, d.data14, d.data15
    FROM data AS d
    INNER JOIN mimetypes AS m ON m._id = d.mimetype_id
    INNER JOIN raw_contacts AS c ON c._id = d.raw_contact_id
    WHERE m.mimetype IN (?, ?, ?, ?)
    ORDER BY d.raw_contact_id
"#;

/// Fetch every contact data row in raw-contact order.
pub async fn fetch_rows(pool: &SqlitePool) -> Result<Vec<RawRow>> {
    let mut query = sqlx::query(CONTACT_ROWS_SQL);
    for mimetype in Mimetype::recognized() {
        query = query.bind(mimetype.as_str().to_string());
    }

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to query contact data")?;

    let raw_rows = rows.iter().map(decode_row).collect::<Result<Vec<_>>>()?;
    tracing::debug!(rows = raw_rows.len(), "fetched contact data rows");
    Ok(raw_rows)
}

fn decode_row(row: &SqliteRow) -> Result<RawRow> {
    let mut data: [Option<String>; DATA_COLUMNS] = Default::default();
    for (i, slot) in data.iter_mut().enumerate() {
        let column = format!("data{}", i + 1);
        *slot = row
            .try_get(column.as_str())
            .with_context(|| format!("Failed to read column {}", column))?;
    }

    Ok(RawRow {
        mimetype: row.try_get("mimetype")?,
        contact_id: row.try_get("contact_id")?,
        display_name: row.try_get("display_name")?,
        data,
    })
}
