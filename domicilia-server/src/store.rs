use anyhow::Context;
use domicilia_core::{ContactMessage, StoredMessage};
use sqlx::{Row, SqlitePool};

/// Salva un messaggio già validato.
pub async fn insert_message(pool: &SqlitePool, stored: &StoredMessage) -> anyhow::Result<()> {
    let m = &stored.message;
    sqlx::query(
        "INSERT INTO messages (message_id, company_id, name, email, phone, text, sent_at, received_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&stored.message_id)
    .bind(&m.company_id)
    .bind(&m.name)
    .bind(&m.email)
    .bind(&m.phone)
    .bind(&m.text)
    .bind(&m.timestamp)
    .bind(&stored.received_at)
    .execute(pool)
    .await
    .context("insert message")?;
    Ok(())
}

/// Messaggi di un'azienda, dal più recente (ordine di inserimento).
pub async fn list_messages(pool: &SqlitePool, company_id: &str, limit: u32) -> anyhow::Result<Vec<StoredMessage>> {
    let rows = sqlx::query(
        "SELECT message_id, company_id, name, email, phone, text, sent_at, received_at \
         FROM messages WHERE company_id = ? ORDER BY rowid DESC LIMIT ?",
    )
    .bind(company_id)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
    .context("select messages")?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(StoredMessage {
            message_id: row.try_get("message_id")?,
            message: ContactMessage {
                text: row.try_get("text")?,
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                phone: row.try_get("phone")?,
                company_id: row.try_get("company_id")?,
                timestamp: row.try_get("sent_at")?,
            },
            received_at: row.try_get("received_at")?,
        });
    }
    Ok(out)
}
