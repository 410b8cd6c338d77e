//! Integration tests for the corsair CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A one-level campaign: "1" wins with a penalty, "2" dies.
const TINY_CAMPAIGN: &str = r#"{
  "levels": [{
    "level": "lagoon",
    "title": "Lagoon",
    "intro": ["A quiet lagoon."],
    "entry": "start",
    "nodes": {
      "start": {
        "question": "Swim across?",
        "input": {
          "kind": "choice",
          "options": [
            {
              "text": "Yes",
              "response": "You reach the far shore, but lose your map.",
              "effects": [{"score": {"rule": "mission_fail", "reason": "losing the map"}}],
              "next": "win"
            },
            {
              "text": "No",
              "effects": [{"health": -100}, {"score": {"rule": "death", "reason": "drowning"}}],
              "next": "die"
            }
          ]
        }
      }
    }
  }]
}"#;

const DANGLING_CAMPAIGN: &str = r#"{
  "levels": [{
    "level": "lagoon",
    "title": "Lagoon",
    "entry": "start",
    "nodes": {
      "start": {
        "question": "Swim across?",
        "input": {
          "kind": "choice",
          "options": [
            {"text": "Yes", "next": {"goto": "far_shore"}},
            {"text": "No", "next": "win"}
          ]
        }
      }
    }
  }]
}"#;

fn campaign_file(json: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("campaign.json"), json).unwrap();
    dir
}

fn corsair() -> Command {
    Command::cargo_bin("corsair").unwrap()
}

/// The game with no pacing and a fixed seed.
fn game() -> Command {
    let mut cmd = corsair();
    cmd.args(["--pace-ms", "0", "--seed", "7"]);
    cmd
}

// -- play --

#[test]
fn death_then_decline_retry() {
    game()
        .args(["--name", "Ahmose"])
        .write_stdin("1\n1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome Ahmose to the game!"))
        .stdout(predicate::str::contains("=== DEATH ISLAND LEVEL ==="))
        .stdout(predicate::str::contains("Gained 10 points for accepting the king's mission!"))
        .stdout(predicate::str::contains("You entered a huge storm and the ship broke!"))
        .stdout(predicate::str::contains("You are dead."))
        .stdout(predicate::str::contains("Player Health: 0"))
        .stdout(predicate::str::contains("Thanks for playing!"));
}

#[test]
fn asks_for_name() {
    game()
        .write_stdin("\nAhmose\n2\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter your name: "))
        .stdout(predicate::str::contains("Please enter a valid name (max 20 characters)"))
        .stdout(predicate::str::contains("Welcome Ahmose to the game!"))
        .stdout(predicate::str::contains("Mission failed."));
}

#[test]
fn invalid_choice_reprompts() {
    game()
        .args(["--name", "Ahmose"])
        .write_stdin("7\nyes\n2\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1) Accept 2) Refuse"))
        .stdout(predicate::str::contains("Invalid input. Please choose from: 1, 2"))
        .stdout(predicate::str::contains("Mission failed."));
}

#[test]
fn retry_restarts_the_level() {
    game()
        .args(["--name", "Ahmose"])
        .write_stdin("2\n1\n2\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== DEATH ISLAND LEVEL ===").count(2))
        .stdout(predicate::str::contains("Player Health: 100"));
}

#[test]
fn completing_death_island_moves_on() {
    game()
        .args(["--name", "Ahmose"])
        .write_stdin("1\n2\n1\n1\n2\n1\n2\n1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gained 50 points for completing death island!"))
        .stdout(predicate::str::contains("Current Score: 100"))
        .stdout(predicate::str::contains("Starting Ghost Ship level..."))
        .stdout(predicate::str::contains("Thanks for playing!"));
}

#[test]
fn closed_stdin_ends_cleanly() {
    game()
        .args(["--name", "Ahmose"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Thanks for playing!"));
}

#[test]
fn closed_stdin_at_name_prompt() {
    game().write_stdin("").assert().success();
}

#[cfg(unix)]
#[test]
fn ctrl_c_reprompts() {
    use std::io::{Read, Write};
    use std::process::{Command as StdCommand, Stdio};

    use assert_cmd::cargo::CommandCargoExt;

    fn read_until(out: &mut impl Read, seen: &mut String, needle: &str) {
        let mut buf = [0u8; 256];
        while !seen.contains(needle) {
            let n = out.read(&mut buf).unwrap();
            assert!(n > 0, "exited before {needle:?}; output: {seen}");
            seen.push_str(&String::from_utf8_lossy(&buf[..n]));
        }
    }

    let mut child = StdCommand::cargo_bin("corsair")
        .unwrap()
        .args(["--pace-ms", "0", "--seed", "7", "--name", "Ahmose"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdout = child.stdout.take().unwrap();
    let mut seen = String::new();

    read_until(&mut stdout, &mut seen, "(1/2): ");
    let status = StdCommand::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
    read_until(&mut stdout, &mut seen, "Input interrupted. Please try again.");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"2\n2\n").unwrap();
    drop(stdin);
    stdout.read_to_string(&mut seen).unwrap();

    assert!(child.wait().unwrap().success());
    assert_eq!(seen.matches("Do you accept the king's mission? (1/2): ").count(), 2);
    assert!(seen.contains("Mission failed."));
    assert!(seen.contains("Thanks for playing!"));
}

#[test]
fn play_subcommand() {
    corsair()
        .args(["play", "--pace-ms", "0", "--name", "Ahmose"])
        .write_stdin("2\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mission failed."));
}

#[test]
fn custom_campaign_full_victory() {
    let dir = campaign_file(TINY_CAMPAIGN);
    game()
        .args(["--name", "Ahmose", "--campaign"])
        .arg(dir.path().join("campaign.json"))
        .write_stdin("1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== LAGOON LEVEL ==="))
        .stdout(predicate::str::contains("Lost 30 points for losing the map!"))
        .stdout(predicate::str::contains("Gained 100 points for winning the game!"))
        .stdout(predicate::str::contains("Congratulations! You've completed all levels!"))
        .stdout(predicate::str::contains("As a reward for completing all levels, you have won:"));
}

#[test]
fn lose_score_threshold() {
    let dir = campaign_file(TINY_CAMPAIGN);
    game()
        .args(["--name", "Ahmose", "--lose-score", "-20", "--campaign"])
        .arg(dir.path().join("campaign.json"))
        .write_stdin("1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game Over! Your score is too low."))
        .stdout(predicate::str::contains("1) Yes 2) No\nTry again? (1/2): "));
}

#[test]
fn invalid_campaign_fails() {
    let dir = campaign_file(DANGLING_CAMPAIGN);
    game()
        .args(["--name", "Ahmose", "--campaign"])
        .arg(dir.path().join("campaign.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("goto unknown node far_shore"));
}

#[test]
fn play_flags_conflict_with_subcommands() {
    corsair()
        .args(["--seed", "5", "play"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn invalid_name_flag_fails() {
    game()
        .args(["--name", "a name far too long for a pirate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// -- check --

#[test]
fn check_passes_valid_campaign() {
    let dir = campaign_file(TINY_CAMPAIGN);
    corsair()
        .arg("check")
        .arg(dir.path().join("campaign.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("Lagoon (lagoon): 1 nodes, 0 code locks, entry 'start'"))
        .stdout(predicate::str::contains("1 levels"));
}

#[test]
fn check_rejects_dangling_goto() {
    let dir = campaign_file(DANGLING_CAMPAIGN);
    corsair()
        .arg("check")
        .arg(dir.path().join("campaign.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("goto unknown node far_shore"));
}

#[test]
fn check_rejects_malformed_json() {
    let dir = campaign_file("{\"levels\": [");
    corsair()
        .arg("check")
        .arg(dir.path().join("campaign.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse story"));
}

#[test]
fn check_missing_file() {
    corsair()
        .args(["check", "no_such_campaign.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// -- calc --

#[test]
fn calc_division_by_zero() {
    corsair()
        .arg("calc")
        .write_stdin("1\n0\n/\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Math Error"))
        .stdout(predicate::str::contains("Thank you for using the calculator!"));
}

#[test]
fn calc_adds() {
    corsair()
        .arg("calc")
        .write_stdin("2\n3\n+\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("5.0"));
}

#[test]
fn calc_unknown_operation_restarts() {
    corsair()
        .arg("calc")
        .write_stdin("2\n3\n^\n4\n2\n/\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid operation. Please try again."))
        .stdout(predicate::str::contains("2.0"));
}
