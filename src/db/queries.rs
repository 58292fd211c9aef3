use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{AnalysisOutcome, DraftRecord, ExtractedFields};

fn now_string() -> String {
    Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── Analyses ──

pub struct NewAnalysis<'a> {
    pub image_ref: &'a str,
    pub prompt: &'a str,
    pub categories: &'a [String],
    pub fields: &'a ExtractedFields,
    pub combined_text: &'a str,
}

pub fn insert_analysis(
    conn: &Connection,
    analysis: &NewAnalysis<'_>,
) -> anyhow::Result<AnalysisOutcome> {
    let id = uuid::Uuid::new_v4().to_string();
    let created_at = now_string();
    let categories_json = serde_json::to_string(analysis.categories)?;
    let fields_json = serde_json::to_string(analysis.fields)?;

    conn.execute(
        "INSERT INTO analyses (id, image_ref, prompt, categories, fields, combined_text, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            analysis.image_ref,
            analysis.prompt,
            categories_json,
            fields_json,
            analysis.combined_text,
            created_at
        ],
    )?;

    Ok(AnalysisOutcome {
        id,
        image_ref: analysis.image_ref.to_string(),
        prompt: analysis.prompt.to_string(),
        categories: analysis.categories.to_vec(),
        fields: analysis.fields.clone(),
        combined_text: analysis.combined_text.to_string(),
        no_data: analysis.fields.is_empty(),
        created_at,
    })
}

fn row_to_analysis(row: &Row<'_>) -> rusqlite::Result<AnalysisOutcome> {
    let categories_json: String = row.get(3)?;
    let fields_json: String = row.get(4)?;

    let categories: Vec<String> = serde_json::from_str(&categories_json).unwrap_or_default();
    let fields: ExtractedFields = serde_json::from_str(&fields_json).unwrap_or_default();

    Ok(AnalysisOutcome {
        id: row.get(0)?,
        image_ref: row.get(1)?,
        prompt: row.get(2)?,
        categories,
        no_data: fields.is_empty(),
        fields,
        combined_text: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub fn get_analysis(conn: &Connection, id: &str) -> anyhow::Result<Option<AnalysisOutcome>> {
    let analysis = conn
        .query_row(
            "SELECT id, image_ref, prompt, categories, fields, combined_text, created_at
             FROM analyses WHERE id = ?1",
            [id],
            row_to_analysis,
        )
        .optional()?;
    Ok(analysis)
}

pub fn list_analyses(conn: &Connection, limit: i64) -> anyhow::Result<Vec<AnalysisOutcome>> {
    let mut stmt = conn.prepare(
        "SELECT id, image_ref, prompt, categories, fields, combined_text, created_at
         FROM analyses ORDER BY created_at DESC, rowid DESC LIMIT ?1",
    )?;

    let analyses = stmt
        .query_map([limit], row_to_analysis)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(analyses)
}

// ── Product drafts ──

pub fn insert_draft(
    conn: &Connection,
    analysis_id: &str,
    remote_id: &str,
    title: &str,
    status: &str,
) -> anyhow::Result<DraftRecord> {
    let id = uuid::Uuid::new_v4().to_string();
    let created_at = now_string();

    conn.execute(
        "INSERT INTO product_drafts (id, analysis_id, remote_id, title, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![id, analysis_id, remote_id, title, status, created_at],
    )?;

    Ok(DraftRecord {
        id,
        analysis_id: analysis_id.to_string(),
        remote_id: remote_id.to_string(),
        title: title.to_string(),
        status: status.to_string(),
        created_at,
    })
}

pub fn list_drafts_for_analysis(
    conn: &Connection,
    analysis_id: &str,
) -> anyhow::Result<Vec<DraftRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, analysis_id, remote_id, title, status, created_at
         FROM product_drafts WHERE analysis_id = ?1 ORDER BY created_at, rowid",
    )?;

    let drafts = stmt
        .query_map([analysis_id], |row| {
            Ok(DraftRecord {
                id: row.get(0)?,
                analysis_id: row.get(1)?,
                remote_id: row.get(2)?,
                title: row.get(3)?,
                status: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::models::FieldValue;

    #[test]
    fn test_analysis_roundtrip() {
        let conn = init_db(":memory:").unwrap();
        let mut fields = ExtractedFields::new();
        fields.insert("product_title", FieldValue::Text("Mug".into()));
        fields.insert("price", FieldValue::Number(12.0));
        let categories = vec!["product title".to_string()];

        let saved = insert_analysis(
            &conn,
            &NewAnalysis {
                image_ref: "https://cdn.example.com/mug.jpg",
                prompt: "Analyze...",
                categories: &categories,
                fields: &fields,
                combined_text: "product title: Mug",
            },
        )
        .unwrap();
        assert!(!saved.no_data);

        let loaded = get_analysis(&conn, &saved.id).unwrap().unwrap();
        assert_eq!(loaded.fields, fields);
        assert_eq!(loaded.categories, categories);
        assert_eq!(loaded.combined_text, "product title: Mug");

        assert!(get_analysis(&conn, "missing").unwrap().is_none());
        assert_eq!(list_analyses(&conn, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_drafts_for_analysis() {
        let conn = init_db(":memory:").unwrap();
        let fields = ExtractedFields::new();
        let saved = insert_analysis(
            &conn,
            &NewAnalysis {
                image_ref: "inline:image/png:4b",
                prompt: "p",
                categories: &[],
                fields: &fields,
                combined_text: "",
            },
        )
        .unwrap();
        assert!(saved.no_data);

        insert_draft(
            &conn,
            &saved.id,
            "gid://shopify/Product/1",
            "Untitled Product",
            "draft",
        )
        .unwrap();
        let drafts = list_drafts_for_analysis(&conn, &saved.id).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].remote_id, "gid://shopify/Product/1");
    }
}
