use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::store::kv::{KeyValueStore, SqliteKv};
use crate::ui::messages::{info, success, warning};

/// Maintenance of the SQLite file holding the documents.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        info("Nothing to do: pass --migrate, --check, --vacuum or --info.");
        return Ok(());
    }

    let pool = open_db(&cfg.database)?;

    if *migrate {
        info("Running migrations…");
        run_pending_migrations(&pool.conn)?;
        success("Migrations up to date.");
    }

    if *show_info {
        stats::print_db_info(&pool, &cfg.database, cfg.storage_quota_bytes)?;
    }

    let pool = if *check {
        check_documents(pool, cfg.storage_quota_bytes)?
    } else {
        pool
    };

    if *vacuum {
        info("Running VACUUM…");
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}

/// SQLite integrity check, then every stored document must still be JSON.
fn check_documents(pool: DbPool, quota: usize) -> AppResult<DbPool> {
    info("Running integrity check…");
    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    if integrity == "ok" {
        success("Integrity check passed.");
    } else {
        warning(format!("Integrity check failed: {integrity}"));
    }

    let kv = SqliteKv::from_pool(pool, quota)?;
    let mut unreadable = 0;
    for key in kv.keys()? {
        let Some(raw) = kv.get(&key)? else { continue };
        if let Err(e) = serde_json::from_str::<serde_json::Value>(&raw) {
            warning(format!("Document '{key}' is not valid JSON ({e}); defaults are used on load"));
            unreadable += 1;
        }
    }
    if unreadable == 0 {
        success("Every stored document is readable.");
    }

    Ok(kv.into_pool())
}
