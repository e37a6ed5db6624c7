//! Export contacts as JSON and vCard.
//!
//! JSON always goes to stdout so it can be piped; vCards are written to a
//! file only when a destination is given.

use anyhow::{Context, Result};
use std::path::Path;

use crate::aggregate::{Aggregator, TracingSink};
use crate::config::Config;
use crate::db;
use crate::models::Contact;
use crate::source;
use crate::vcard::VCardRecord;

/// Read `database`, write vCards to `vcards` if given, and print the JSON.
pub async fn run_export(config: &Config, database: &Path, vcards: Option<&Path>) -> Result<()> {
    let pool = db::connect(database).await?;
    let rows = source::fetch_rows(&pool).await?;
    pool.close().await;

    let sink = TracingSink;
    let export = Aggregator::new(config.phone.region.as_str(), config.output.emit, &sink).ingest(rows);

    if let Some(path) = vcards {
        write_vcards(path, &export.vcards)?;
    }

    println!("{}", render_json(&export.contacts)?);

    tracing::info!(
        records = export.len(),
        database = %database.display(),
        "export complete"
    );
    Ok(())
}

/// Pretty-printed JSON array with two-space indentation.
///
/// Non-ASCII text is written as UTF-8, not as `\uXXXX` escapes.
pub fn render_json(contacts: &[Contact]) -> Result<String> {
    Ok(serde_json::to_string_pretty(contacts)?)
}

/// All cards concatenated in production order.
pub fn render_vcards(vcards: &[VCardRecord]) -> String {
    vcards.iter().map(VCardRecord::serialize).collect()
}

fn write_vcards(path: &Path, vcards: &[VCardRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, render_vcards(vcards))
        .with_context(|| format!("Failed to write vCards: {}", path.display()))?;
    tracing::info!(cards = vcards.len(), path = %path.display(), "wrote vCards");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json_indents_two_spaces() {
        let mut c = Contact::new("Jane Doe");
        c.email = Some("jane@example.com".into());
        let json = render_json(&[c]).unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"display_name\": \"Jane Doe\",\n    \"email\": \"jane@example.com\"\n  }\n]"
        );
    }

    #[test]
    fn test_render_json_keeps_utf8() {
        let json = render_json(&[Contact::new("Åsa Öberg")]).unwrap();
        assert!(json.contains("\"display_name\": \"Åsa Öberg\""));
    }

    #[test]
    fn test_render_json_empty() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_render_vcards_concatenates_in_order() {
        let text = render_vcards(&[VCardRecord::new("A"), VCardRecord::new("B")]);
        assert_eq!(text.matches("BEGIN:VCARD").count(), 2);
        assert!(text.find("FN:A").unwrap() < text.find("FN:B").unwrap());
    }

    #[test]
    fn test_write_vcards_creates_parent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out").join("contacts.vcf");
        write_vcards(&path, &[VCardRecord::new("A")]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("BEGIN:VCARD\r\n"));
    }
}
