//! SQL schema for the LandGPT SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per parcel. Re-inserting an identity replaces the details in place.
CREATE TABLE IF NOT EXISTS land_records (
    record_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    district          TEXT NOT NULL,
    tehsil            TEXT NOT NULL,
    village           TEXT NOT NULL,
    khasra_number     TEXT NOT NULL,
    khata_number      TEXT,
    owner_name        TEXT,
    father_name       TEXT,
    area_hectare      REAL,
    area_bigha        REAL,
    land_type         TEXT,
    irrigation_status TEXT,
    crop_details      TEXT,
    mutation_date     TEXT,            -- YYYY-MM-DD
    registry_date     TEXT,            -- YYYY-MM-DD
    created_at        TEXT NOT NULL,   -- ISO 8601 UTC; set on first insert
    UNIQUE (district, tehsil, village, khasra_number)
);

-- Duplicate questions are permitted.
CREATE TABLE IF NOT EXISTS legal_faqs (
    faq_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    question   TEXT NOT NULL,
    answer     TEXT NOT NULL,
    category   TEXT,
    tags       TEXT,                   -- comma-separated
    language   TEXT NOT NULL DEFAULT 'hindi',
    created_at TEXT NOT NULL
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS user_queries (
    query_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    query      TEXT NOT NULL,
    response   TEXT,
    query_type TEXT,
    timestamp  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS land_records_district_idx ON land_records(district);
CREATE INDEX IF NOT EXISTS legal_faqs_category_idx   ON legal_faqs(category);

PRAGMA user_version = 1;
";
