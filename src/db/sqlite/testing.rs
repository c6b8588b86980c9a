//! Shared fixtures for SQLite-backed tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

use crate::db::codec::NumberArrayCodec;
use crate::db::{JsonArrayCodec, SqliteDatabase};

/// Table layout the repository reads from.
pub(crate) const ACCOUNTS_TABLE: &str = r#"
    CREATE TABLE accounts (
        id          INTEGER PRIMARY KEY,
        name        TEXT    NOT NULL,
        email       TEXT    NOT NULL,
        active      BOOLEAN NOT NULL,
        fav_color   TEXT    NOT NULL,
        fav_numbers TEXT,
        properties  TEXT,
        created_at  TEXT    NOT NULL
    )
"#;

pub(crate) async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    sqlx::query(ACCOUNTS_TABLE)
        .execute(db.pool())
        .await
        .expect("Create table should succeed");
    db
}

pub(crate) fn timestamp(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) struct NewAccount<'a> {
    pub id: i64,
    pub name: &'a str,
    pub active: bool,
    pub fav_color: &'a str,
    pub fav_numbers: &'a [i64],
    pub properties: Value,
}

impl<'a> NewAccount<'a> {
    pub fn new(id: i64, name: &'a str) -> Self {
        Self {
            id,
            name,
            active: true,
            fav_color: "red",
            fav_numbers: &[],
            properties: json!({}),
        }
    }
}

pub(crate) async fn insert_account(db: &SqliteDatabase, account: NewAccount<'_>) {
    let fav_numbers = JsonArrayCodec
        .encode(account.fav_numbers)
        .expect("Encode should succeed");

    sqlx::query(
        "INSERT INTO accounts (id, name, email, active, fav_color, fav_numbers, properties, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(account.id)
    .bind(account.name)
    .bind(format!("{}@example.com", account.name.to_lowercase()))
    .bind(account.active)
    .bind(account.fav_color)
    .bind(fav_numbers)
    .bind(account.properties.to_string())
    .bind(timestamp(account.id.clamp(1, 28) as u32))
    .execute(db.pool())
    .await
    .expect("Insert account should succeed");
}

/// Jane (active, red, [1,2,3]) and John (inactive, blue, []).
pub(crate) async fn seed_jane_and_john(db: &SqliteDatabase) {
    insert_account(
        db,
        NewAccount {
            fav_numbers: &[1, 2, 3],
            properties: json!({"tags": ["admin"], "score": 10}),
            ..NewAccount::new(1, "Jane")
        },
    )
    .await;
    insert_account(
        db,
        NewAccount {
            active: false,
            fav_color: "blue",
            ..NewAccount::new(2, "John")
        },
    )
    .await;
}
