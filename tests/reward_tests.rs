use predicates::str::contains;

mod common;
use common::{init_db_with_day, ok, pp, setup_test_db};

#[test]
fn finishing_a_period_unlocks_its_reward_once() {
    let db_path = setup_test_db("reward_unlock");
    init_db_with_day(&db_path, "2025-09-01");
    ok(
        &db_path,
        &["reward", "set", "2025-09-01", "--period", "morning", "--label", "Tablet", "--emoji", "📱"],
    );

    pp().args(["--db", &db_path, "reward", "redeem", "2025-09-01", "--period", "morning"])
        .assert()
        .failure()
        .stderr(contains("still locked"));

    pp().args(["--db", &db_path, "toggle", "2025-09-01", "1"])
        .assert()
        .success()
        .stdout(contains("Done: Desayuno"))
        .stdout(contains("Reward unlocked: Tablet"));

    pp().args(["--db", &db_path, "reward", "redeem", "2025-09-01", "--period", "morning"])
        .assert()
        .success()
        .stdout(contains("Enjoy your reward: Tablet"));

    pp().args(["--db", &db_path, "reward", "redeem", "2025-09-01", "--period", "morning"])
        .assert()
        .success()
        .stdout(contains("already redeemed"));
}

#[test]
fn finishing_the_whole_day_celebrates_the_day() {
    let db_path = setup_test_db("day_complete");
    init_db_with_day(&db_path, "2025-09-01");
    ok(&db_path, &["toggle", "2025-09-01", "1"]);

    pp().args(["--db", &db_path, "toggle", "2025-09-01", "2"])
        .assert()
        .success()
        .stdout(contains("Every activity of Lunes is done"));

    pp().args(["--db", &db_path, "day", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("100%"));
}

#[test]
fn reward_needs_a_definition() {
    let db_path = setup_test_db("reward_missing");
    init_db_with_day(&db_path, "2025-09-01");

    pp().args(["--db", &db_path, "reward", "redeem", "2025-09-01", "--period", "evening"])
        .assert()
        .failure()
        .stderr(contains("No reward defined"));
}
