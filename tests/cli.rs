use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const FULL_ROUTE: &str = "a*30 s*30 d*60 w*60 a*60 d*60 s*60 a*30 w*75";

fn build_world() -> NamedTempFile {
    let world = r#"<world>
  <settings>
    <collect_radius>1.0</collect_radius>
  </settings>
  <entity><name>hero</name><kind>character</kind><position>0 0.5 0</position></entity>
  <entity><name>elder</name><kind>npc</kind><position>-3 0.5 0</position></entity>
  <entity><name>bot</name><kind>robot</kind><position>0 0.5 -2</position></entity>
  <entity><name>bear</name><kind>teddy_bear</kind><position>1 0.5 0</position></entity>
  <entity><name>key</name><kind>key</kind><position>2 0.5 2</position><hidden>true</hidden></entity>
  <entity><name>gate</name><kind>gate</kind><position>3 0.5 -3</position><color>200 40 40</color></entity>
</world>
"#;
    let mut tmp = NamedTempFile::new().expect("temp world");
    tmp.write_all(world.as_bytes()).expect("write world");
    tmp
}

#[test]
fn cli_plays_default_world_to_victory() {
    let mut cmd = Command::cargo_bin("quest-runtime").expect("binary exists");
    cmd.arg("--script").arg(FULL_ROUTE);
    cmd.assert()
        .success()
        .stdout(contains("Loaded world with 8 entities"))
        .stdout(contains(" - teddy_bear (teddy_bear)"))
        .stdout(contains("] You found the teddy bear!"))
        .stdout(contains("You win!"))
        .stdout(contains(" - score: 1"))
        .stdout(contains(" - game_won: true"))
        .stdout(contains(" - key (key) pos=(3.00, 0.50, 3.00) active=false visible=true"));
}

#[test]
fn cli_loads_world_file_and_script_file() {
    let world = build_world();
    let mut script = NamedTempFile::new().expect("temp script");
    writeln!(script, "d*10\nwait:100").expect("write script");

    let mut cmd = Command::cargo_bin("quest-runtime").expect("binary exists");
    cmd.arg(world.path())
        .arg("--script-file")
        .arg(script.path())
        .arg("--frame-ms")
        .arg("20");
    cmd.assert()
        .success()
        .stdout(contains("Loaded world with 6 entities"))
        .stdout(contains(" - hero (character)"))
        .stdout(contains(" - has_teddy_bear: true"))
        .stdout(contains(" - game_won: false"))
        .stdout(contains(" - bear (teddy_bear)"));
}

#[test]
fn cli_without_script_reports_initial_state() {
    let mut cmd = Command::cargo_bin("quest-runtime").expect("binary exists");
    cmd.assert()
        .success()
        .stdout(contains(" - score: 0"))
        .stdout(contains("You found").not());
}

#[test]
fn cli_rejects_unknown_steps() {
    let mut cmd = Command::cargo_bin("quest-runtime").expect("binary exists");
    cmd.arg("--script").arg("w jump");
    cmd.assert()
        .failure()
        .stderr(contains("Error:"))
        .stderr(contains("jump"));
}

#[test]
fn cli_reports_missing_quest_entities() {
    let mut world = NamedTempFile::new().expect("temp world");
    world
        .write_all(b"<world><entity><name>hero</name><kind>character</kind></entity></world>")
        .expect("write world");
    let mut cmd = Command::cargo_bin("quest-runtime").expect("binary exists");
    cmd.arg(world.path());
    cmd.assert()
        .failure()
        .stderr(contains("world has no npc entity"));
}
