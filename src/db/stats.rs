use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

#[derive(Debug, Clone)]
pub struct KeyStats {
    pub key: String,
    pub bytes: i64,
    pub updated_at: String,
}

/// Size and last update of every stored document.
pub fn key_stats(pool: &DbPool) -> rusqlite::Result<Vec<KeyStats>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT key, LENGTH(CAST(value AS BLOB)), updated_at FROM storage ORDER BY key ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok(KeyStats {
            key: row.get(0)?,
            bytes: row.get(1)?,
            updated_at: row.get(2)?,
        })
    })?;

    rows.collect()
}

pub fn print_db_info(pool: &DbPool, db_path: &str, quota: usize) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) DOCUMENTS
    //
    let stats = key_stats(pool)?;
    let used: i64 = stats.iter().map(|s| s.bytes).sum();

    println!(
        "{}• Storage used:{} {}{}{} / {} bytes",
        CYAN, RESET, GREEN, used, RESET, quota
    );
    println!("{}• Documents:{}", CYAN, RESET);

    if stats.is_empty() {
        println!("    {GREY}--{RESET}");
    }
    for s in &stats {
        println!("    {:<28} {:>9} bytes  {GREY}{}{RESET}", s.key, s.bytes, s.updated_at);
    }

    //
    // 3) LAST ACTIVITY
    //
    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM log WHERE operation <> 'migration_applied' ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!(
        "{}• Last change:{} {}",
        CYAN,
        RESET,
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
