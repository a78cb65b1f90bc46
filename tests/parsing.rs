use std::fs;
use std::path::PathBuf;

use serde_json::json;

use round_board::normalize::{normalize_scores, parse_scores_json};
use round_board::schedule::{ROUNDS_PER_DAY, RoundStatus};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn statuses(rounds: &[round_board::schedule::RoundEntry]) -> Vec<RoundStatus> {
    rounds.iter().map(|r| r.status()).collect()
}

#[test]
fn parses_scores_fixture_in_payload_order() {
    let raw = read_fixture("scores_submitted.json");
    let teams = parse_scores_json(&raw).expect("fixture should parse");
    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Bears", "Lions", "Aardvarks", "Owls"]);
    let ids: Vec<u32> = teams.iter().map(|t| t.id).collect();
    assert_eq!(ids, [1, 2, 3, 4]);
}

#[test]
fn every_team_has_five_plus_five_rounds() {
    let raw = read_fixture("scores_submitted.json");
    let teams = parse_scores_json(&raw).expect("fixture should parse");
    for team in &teams {
        assert_eq!(team.friday_rounds.len(), ROUNDS_PER_DAY, "{}", team.name);
        assert_eq!(team.saturday_rounds.len(), ROUNDS_PER_DAY, "{}", team.name);
    }
}

#[test]
fn rounds_past_ten_are_ignored() {
    let raw = read_fixture("scores_submitted.json");
    let teams = parse_scores_json(&raw).expect("fixture should parse");
    let bears = &teams[0];
    use RoundStatus::*;
    assert_eq!(
        statuses(&bears.friday_rounds),
        [Submitted, Scheduled, Submitted, Scheduled, Submitted]
    );
    assert_eq!(
        statuses(&bears.saturday_rounds),
        [Scheduled, Submitted, Bye, Scheduled, Submitted]
    );
}

#[test]
fn short_team_pads_with_bye() {
    let raw = read_fixture("scores_submitted.json");
    let teams = parse_scores_json(&raw).expect("fixture should parse");
    let lions = &teams[1];
    use RoundStatus::*;
    assert_eq!(
        statuses(&lions.friday_rounds),
        [Submitted, Scheduled, Scheduled, Bye, Bye]
    );
    assert!(lions.saturday_rounds.iter().all(|r| r.status() == Bye));
    assert!(lions.saturday_rounds.iter().all(|r| r.raw_status == "bye"));
}

#[test]
fn unknown_values_are_stored_as_bye() {
    let raw = read_fixture("scores_submitted.json");
    let teams = parse_scores_json(&raw).expect("fixture should parse");
    let aardvarks = &teams[2];
    let raw_friday: Vec<&str> = aardvarks
        .friday_rounds
        .iter()
        .map(|r| r.raw_status.as_str())
        .collect();
    assert_eq!(raw_friday, ["bye", "bye", "bye", "bye", "scheduled"]);
    assert_eq!(aardvarks.saturday_rounds[0].raw_status, "submitted");
}

#[test]
fn empty_team_is_all_bye() {
    let raw = read_fixture("scores_submitted.json");
    let teams = parse_scores_json(&raw).expect("fixture should parse");
    let owls = &teams[3];
    assert_eq!(owls.count_status(RoundStatus::Bye), 10);
}

#[test]
fn labels_are_synthetic_day_positions() {
    let teams = normalize_scores(&json!({ "Bears": { "r1": "submitted" } }));
    let labels: Vec<&str> = teams[0]
        .friday_rounds
        .iter()
        .chain(&teams[0].saturday_rounds)
        .map(|r| r.opponent_label.as_str())
        .collect();
    assert_eq!(
        labels,
        ["F1", "F2", "F3", "F4", "F5", "S1", "S2", "S3", "S4", "S5"]
    );
}

#[test]
fn ids_follow_key_order_not_alphabetical() {
    let teams = normalize_scores(&json!({ "Lions": {}, "Bears": {} }));
    assert_eq!(teams[0].name, "Lions");
    assert_eq!(teams[0].id, 1);
    assert_eq!(teams[1].name, "Bears");
    assert_eq!(teams[1].id, 2);
}

#[test]
fn non_object_team_value_yields_byes() {
    let teams = normalize_scores(&json!({ "Bears": "submitted", "Lions": [1, 2] }));
    assert_eq!(teams.len(), 2);
    for team in &teams {
        assert_eq!(team.count_status(RoundStatus::Bye), 10);
    }
}

#[test]
fn scores_null_and_arrays_are_errors() {
    assert!(parse_scores_json("null").is_err());
    assert!(parse_scores_json("   ").is_err());
    assert!(parse_scores_json("[]").is_err());
}

#[test]
fn empty_object_is_empty_board() {
    let teams = parse_scores_json("{}").expect("empty object should parse");
    assert!(teams.is_empty());
}

#[test]
fn blank_team_keys_are_skipped() {
    let teams = parse_scores_json(r#"{"": {"r1": "submitted"}, "  ": {}, "Bears": {}}"#)
        .expect("object should parse");
    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Bears"]);
    assert_eq!(teams[0].id, 1);
    assert!(teams.iter().all(|t| !t.name.trim().is_empty()));
}

#[test]
fn ids_stay_sequential_around_blank_keys() {
    let teams = normalize_scores(&json!({ "Lions": {}, "": {}, "Bears": {} }));
    let ids: Vec<(u32, &str)> = teams.iter().map(|t| (t.id, t.name.as_str())).collect();
    assert_eq!(ids, [(1, "Lions"), (2, "Bears")]);
}
