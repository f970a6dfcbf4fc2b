use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::db::log::write_log;
use crate::errors::AppResult;
use crate::store::AppStore;
use crate::store::kv::SqliteKv;
use crate::utils::date::today;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and its migrations
///  - the default documents (pictogram library, settings)
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing pictoplan…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let pool = open_db(&db_path)?;

    if let Err(e) = write_log(
        &pool.conn,
        "init",
        &db_path,
        "Database initialized",
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    let kv = SqliteKv::from_pool(pool, cfg.storage_quota_bytes)?;
    let store = AppStore::load(kv, today(), &cfg.avatar_url)?;

    println!("✅ Database initialized at {}", &db_path);
    println!("🖼️  Pictograms : {}", store.pictograms().len());
    println!("🎉 pictoplan initialization completed!");
    Ok(())
}
