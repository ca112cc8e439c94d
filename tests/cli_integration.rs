use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SPOTS: &str = r#"[
  {"id": "s-1", "name": "Quiet Nook", "description": "Corner table by the window", "area": "North",
   "category": "cafe", "noiseLevel": "quiet", "chargingPorts": "abundant", "wifi": "yes", "mallId": "m-1"},
  {"id": "s-2", "name": "Harbor Deck", "area": "South",
   "category": "outdoor", "noiseLevel": "noisy", "chargingPorts": "none", "wifi": "no"},
  {"id": "s-3", "name": "Reading Room", "description": "Silent floor", "area": "North",
   "category": "library", "noiseLevel": "quiet", "chargingPorts": "limited", "wifi": "yes"},
  {"id": 4, "name": "Food Court Bench", "area": "South",
   "category": "cafe", "noiseLevel": "noisy", "chargingPorts": "limited", "wifi": "yes", "mallId": "m-2"}
]"#;

const MALLS: &str = r#"[
  {"id": "m-1", "name": "Central Plaza", "description": "Three floors", "area": "North"},
  {"id": "m-2", "name": "Harbour Point", "area": "South"}
]"#;

struct Fixture {
    temp: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let data = temp.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("spots.json"), SPOTS).unwrap();
        std::fs::write(data.join("malls.json"), MALLS).unwrap();
        Self { temp }
    }

    fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    fn data(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    /// Isolated command without a data directory override.
    fn bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("studyspots").unwrap();
        cmd.current_dir(self.temp.path())
            .env("STUDYSPOTS_HOME", self.home())
            .env_remove("STUDYSPOTS_DATA")
            .env_remove("RUST_LOG")
            .arg("--no-color");
        cmd
    }

    fn cmd(&self) -> Command {
        self.cmd_with_data(&self.data())
    }

    fn cmd_with_data(&self, data: &Path) -> Command {
        let mut cmd = self.bare();
        cmd.arg("--data").arg(data);
        cmd
    }
}

#[test]
fn test_default_command_lists_all_spots() {
    let fx = Fixture::new();
    fx.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Study spots"))
        .stdout(predicate::str::contains("Quiet Nook"))
        .stdout(predicate::str::contains("Food Court Bench"))
        .stdout(predicate::str::contains("Page 1 of 1 · 4 spots"));
}

#[test]
fn test_list_area_filter() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--area", "North"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiet Nook"))
        .stdout(predicate::str::contains("Reading Room"))
        .stdout(predicate::str::contains("Harbor Deck").not())
        .stdout(predicate::str::contains("Food Court Bench").not())
        .stdout(predicate::str::contains("area: North"));
}

#[test]
fn test_list_combined_filters_and_search() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--category", "cafe", "--wifi", "yes", "--search", "CORNER"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiet Nook"))
        .stdout(predicate::str::contains("1 spot"))
        .stdout(predicate::str::contains("Food Court Bench").not());
}

#[test]
fn test_unknown_filter_value_is_ignored() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--noise", "deafening"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 spots"));
}

#[test]
fn test_no_matches_shows_empty_message() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--area", "Nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No study spots match these filters."))
        .stdout(predicate::str::contains("0 spots"));
}

#[test]
fn test_favorites_toggle_persists() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["fav", "s-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Reading Room to favorites"));

    fx.cmd()
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading Room"))
        .stdout(predicate::str::contains("Quiet Nook").not());

    fx.cmd()
        .args(["fav", "s-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Reading Room from favorites"));

    fx.cmd()
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("No favorites yet."));
}

#[test]
fn test_favorite_numeric_id() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["fav", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Food Court Bench to favorites"));

    fx.cmd()
        .args(["list", "--area", "South"])
        .assert()
        .success()
        .stdout(predicate::str::contains("★ Food Court Bench"));
}

#[test]
fn test_fav_unknown_id_fails() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["fav", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No spot or mall with id nope"));
}

#[test]
fn test_prefs_clamp_and_persist() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["prefs", "--columns", "9", "--per-page", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("columns   3"))
        .stdout(predicate::str::contains("per page  12"))
        .stdout(predicate::str::contains("View preferences saved"));

    fx.cmd()
        .args(["prefs", "--columns", "1"])
        .assert()
        .success();

    fx.cmd()
        .arg("prefs")
        .assert()
        .success()
        .stdout(predicate::str::contains("columns   1"))
        .stdout(predicate::str::contains("per page  12"))
        .stdout(predicate::str::contains("saved").not());

    assert!(fx.home().join("studyspots_view_prefs.json").exists());
}

#[test]
fn test_prefs_work_without_catalog() {
    let fx = Fixture::new();
    fx.cmd_with_data(&fx.temp.path().join("missing"))
        .arg("prefs")
        .assert()
        .success()
        .stdout(predicate::str::contains("per page  30"));
}

#[test]
fn test_missing_data_dir_fails() {
    let fx = Fixture::new();
    fx.cmd_with_data(&fx.temp.path().join("missing"))
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Failed to load spots.json"));
}

#[test]
fn test_malformed_catalog_fails() {
    let fx = Fixture::new();
    std::fs::write(fx.data().join("malls.json"), "{not json").unwrap();
    fx.cmd()
        .arg("malls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load malls.json"));
}

#[test]
fn test_spot_views_work_without_malls() {
    let fx = Fixture::new();
    std::fs::remove_file(fx.data().join("malls.json")).unwrap();

    fx.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiet Nook"))
        .stdout(predicate::str::contains("Central Plaza").not())
        .stdout(predicate::str::contains("4 spots"));

    fx.cmd().args(["fav", "s-1"]).assert().success();
    fx.cmd()
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiet Nook"));

    fx.cmd()
        .arg("malls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load malls.json"));
}

#[test]
fn test_mall_listing_and_detail() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["malls", "--area", "South"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Harbour Point"))
        .stdout(predicate::str::contains("1 spot"))
        .stdout(predicate::str::contains("Central Plaza").not());

    fx.cmd()
        .args(["mall", "m-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Central Plaza"))
        .stdout(predicate::str::contains("North · Three floors"))
        .stdout(predicate::str::contains("Quiet Nook"))
        .stdout(predicate::str::contains("Reading Room").not());

    fx.cmd()
        .args(["mall", "m-404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mall not found: m-404"));
}

#[test]
fn test_areas() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("areas")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spot areas\n  North\n  South\n"))
        .stdout(predicate::str::contains("Mall areas\n  North\n  South\n"));
}

#[test]
fn test_config_data_dir_is_used() {
    let fx = Fixture::new();

    fx.bare()
        .args(["config", "data_dir"])
        .arg(fx.data())
        .assert()
        .success();

    fx.bare()
        .args(["config", "data_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains(fx.data().display().to_string()));

    fx.bare()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 spots"));
}

#[test]
fn test_env_data_dir_is_used() {
    let fx = Fixture::new();
    fx.bare()
        .env("STUDYSPOTS_DATA", fx.data())
        .arg("areas")
        .assert()
        .success()
        .stdout(predicate::str::contains("North"));
}

#[test]
fn test_config_unknown_key_fails() {
    let fx = Fixture::new();
    fx.bare()
        .args(["config", "flavor", "mint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: flavor"));
}

#[test]
fn test_paging_past_the_end_clamps() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--page", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 1"));
}
