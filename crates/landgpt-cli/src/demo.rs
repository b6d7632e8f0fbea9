//! Scripted walkthrough of a populated store, plus the statistics view.

use std::io::Write;

use anyhow::Result;
use landgpt_assistant::KeywordResponder;
use landgpt_core::{
  record::{RecordField, RecordQuery},
  store::{FaqStore, QueryLog, RecordStore},
};
use landgpt_store_sqlite::SqliteStore;

/// Questions replayed by the demo and logged with type `demo`.
pub const DEMO_QUERIES: &[&str] = &[
  "Mutation ke liye application kaise karein?",
  "Khasra number kya hota hai?",
  "Agra mein kitni zameen hai?",
  "Registry ke documents kya chahiye?",
];

/// FAQ search terms shown in the demo.
const FAQ_TERMS: &[&str] = &["mutation", "म्यूटेशन", "registry"];

pub async fn run<W: Write>(
  store: &SqliteStore,
  responder: &KeywordResponder,
  out: &mut W,
) -> Result<()> {
  writeln!(out, "🎬 Starting LandGPT demo")?;
  writeln!(out, "{}", "=".repeat(60))?;

  overview(store, out).await?;
  sample_queries(store, out).await?;
  faq_search(store, out).await?;
  analysis(store, out).await?;
  user_interaction(store, responder, out).await?;
  report(store, out).await?;

  writeln!(out, "\n{}", "=".repeat(60))?;
  writeln!(out, "🎉 Demo complete!")?;
  Ok(())
}

async fn overview<W: Write>(store: &SqliteStore, out: &mut W) -> Result<()> {
  writeln!(out, "\n📊 === DATABASE OPERATIONS ===")?;
  let tables = store.list_tables().await?;
  writeln!(out, "📋 Database tables: {}", tables.join(", "))?;
  writeln!(out, "📄 Land records: {}", store.count().await?)?;
  writeln!(out, "❓ Legal FAQs: {}", store.count_faqs().await?)?;
  Ok(())
}

async fn sample_queries<W: Write>(store: &SqliteStore, out: &mut W) -> Result<()> {
  writeln!(out, "\n🔍 === SAMPLE QUERIES ===")?;

  writeln!(out, "\n🏙️ Records from Agra district")?;
  let agra = store
    .search(&RecordQuery::new().with(RecordField::District, "Agra").limit(5))
    .await?;
  match agra.first() {
    Some(first) => {
      writeln!(out, "   Found {} records", agra.len())?;
      writeln!(
        out,
        "   Sample: Owner '{}' - Khasra {}",
        first.details.owner_name.as_deref().unwrap_or("-"),
        first.parcel.khasra_number
      )?;
    }
    None => writeln!(out, "   No records found")?,
  }

  writeln!(out, "\n📐 Land parcels > 2 hectares")?;
  let large = store
    .search(&RecordQuery::new().larger_than(2.0).limit(3))
    .await?;
  if large.is_empty() {
    writeln!(out, "   No large parcels found")?;
  } else {
    writeln!(out, "   Found {} large parcels", large.len())?;
    for r in &large {
      writeln!(
        out,
        "   - {:.2} hectare plot in {}",
        r.details.area_hectare.unwrap_or_default(),
        r.parcel.village
      )?;
    }
  }

  writeln!(out, "\n❓ Legal FAQs by category")?;
  for tally in store.category_counts().await? {
    writeln!(out, "   - {}: {} questions", tally.value, tally.count)?;
  }
  Ok(())
}

async fn faq_search<W: Write>(store: &SqliteStore, out: &mut W) -> Result<()> {
  writeln!(out, "\n💬 === FAQ SEARCH ===")?;
  for term in FAQ_TERMS {
    writeln!(out, "\n🔎 Searching for: '{term}'")?;
    let hits = store.search_faqs(term, Some(2)).await?;
    if hits.is_empty() {
      writeln!(out, "   No matching FAQs found")?;
    }
    for faq in hits {
      let preview: String = faq.answer.chars().take(100).collect();
      writeln!(out, "   Q: {}", faq.question)?;
      writeln!(out, "   A: {preview}...")?;
      writeln!(out, "   Category: {}\n", faq.category.as_deref().unwrap_or("-"))?;
    }
  }
  Ok(())
}

async fn analysis<W: Write>(store: &SqliteStore, out: &mut W) -> Result<()> {
  writeln!(out, "\n📈 === DATA ANALYSIS ===")?;

  let districts = store.district_breakdown().await?;
  if !districts.is_empty() {
    writeln!(out, "   By District:")?;
    for d in districts {
      writeln!(
        out,
        "   - {}: {} plots, avg {:.2} hectares",
        d.district, d.plots, d.average_hectare
      )?;
    }
  }

  for (title, field) in [
    ("By Land Type", RecordField::LandType),
    ("By Irrigation Status", RecordField::IrrigationStatus),
  ] {
    let tallies = store.tally(field).await?;
    if tallies.is_empty() {
      continue;
    }
    writeln!(out, "\n   {title}:")?;
    for t in tallies {
      writeln!(out, "   - {}: {} plots", t.value, t.count)?;
    }
  }
  Ok(())
}

async fn user_interaction<W: Write>(
  store: &SqliteStore,
  responder: &KeywordResponder,
  out: &mut W,
) -> Result<()> {
  writeln!(out, "\n👤 === MOCK USER INTERACTION ===")?;
  for (i, query) in DEMO_QUERIES.iter().enumerate() {
    writeln!(out, "\n🗣️ User Query {}: {query}", i + 1)?;
    let response = responder.respond_and_log(store, query, Some("demo")).await;
    writeln!(out, "🤖 LandGPT Response: {}", response.text)?;
  }
  writeln!(
    out,
    "\n📊 Total user queries logged: {}",
    store.count_queries().await?
  )?;
  Ok(())
}

async fn report<W: Write>(store: &SqliteStore, out: &mut W) -> Result<()> {
  let stats = store.stats().await?;
  writeln!(out, "\n📋 === DATABASE STATISTICS ===")?;
  writeln!(out, "   • Land Records: {}", stats.land_records)?;
  writeln!(out, "   • Legal FAQs: {}", stats.faqs)?;
  writeln!(out, "   • User Queries: {}", stats.queries)?;
  writeln!(out, "   • Districts Covered: {}", stats.districts)?;
  writeln!(out, "   • Tehsils Covered: {}", stats.tehsils)?;
  writeln!(out, "   • Villages Covered: {}", stats.villages)?;
  Ok(())
}

/// Short summary for the "view stats" menu entry.
pub async fn show_stats<W: Write>(store: &SqliteStore, out: &mut W) -> Result<()> {
  let stats = store.stats().await?;
  writeln!(out, "\n📊 Database Statistics:")?;
  writeln!(out, "{}", "-".repeat(30))?;
  writeln!(out, "📄 Land Records: {}", stats.land_records)?;
  writeln!(out, "❓ Legal FAQs: {}", stats.faqs)?;
  writeln!(out, "🏙️ Districts: {}", stats.districts)?;

  if stats.land_records > 0 {
    writeln!(out, "\n📝 Sample Records:")?;
    for r in store.search(&RecordQuery::new().limit(3)).await? {
      writeln!(
        out,
        "   • {} - {} - Khasra {}",
        r.parcel.district, r.parcel.village, r.parcel.khasra_number
      )?;
    }
  }
  Ok(())
}
