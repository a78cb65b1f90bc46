use serde_json::json;

use round_board::normalize::normalize_scores;
use round_board::schedule::TeamRecord;
use round_board::state::{AppState, DataSource, filter_teams};

fn board() -> Vec<TeamRecord> {
    normalize_scores(&json!({
        "Bears": { "r1": "submitted" },
        "Lions": { "r1": "scheduled" },
        "Detroit Lions Reserve": {},
        "Packers": {}
    }))
}

#[test]
fn empty_search_returns_all_teams() {
    let teams = board();
    let out = filter_teams(&teams, "");
    assert_eq!(out.len(), teams.len());
    assert_eq!(out[0].name, "Bears");
}

#[test]
fn search_is_case_insensitive_substring() {
    let teams = board();
    let names: Vec<&str> = filter_teams(&teams, "LIONS")
        .into_iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, ["Lions", "Detroit Lions Reserve"]);
}

#[test]
fn search_without_match_is_empty() {
    let teams = board();
    assert!(filter_teams(&teams, "zebras").is_empty());
}

#[test]
fn selection_wraps_within_filtered_rows() {
    let mut state = AppState::with_teams(board(), DataSource::Remote);
    state.search = "lions".to_string();
    assert_eq!(state.selected_team().map(|t| t.id), Some(2));
    state.select_next();
    assert_eq!(state.selected_team().map(|t| t.id), Some(3));
    state.select_next();
    assert_eq!(state.selected_team().map(|t| t.id), Some(2));
    state.select_prev();
    assert_eq!(state.selected_team().map(|t| t.id), Some(3));
}

#[test]
fn narrowing_search_resets_selection() {
    let mut state = AppState::with_teams(board(), DataSource::Remote);
    state.selected = 3;
    for c in "pack".chars() {
        state.push_search_char(c);
    }
    assert_eq!(state.selected, 0);
    assert_eq!(state.selected_team().map(|t| t.name.as_str()), Some("Packers"));

    state.pop_search_char();
    state.pop_search_char();
    state.pop_search_char();
    state.pop_search_char();
    assert_eq!(state.filtered_teams().len(), 4);
}

#[test]
fn clear_search_leaves_search_mode() {
    let mut state = AppState::with_teams(board(), DataSource::Remote);
    state.search_active = true;
    state.search = "zzz".to_string();
    assert!(state.selected_team().is_none());
    state.clear_search();
    assert!(!state.search_active);
    assert!(state.search.is_empty());
    assert!(state.selected_team().is_some());
}

#[test]
fn toggle_expanded_flips_selected_team() {
    let mut state = AppState::with_teams(board(), DataSource::Remote);
    state.select_next();
    state.toggle_expanded();
    assert!(state.is_expanded(2));
    assert!(!state.is_expanded(1));
    state.toggle_expanded();
    assert!(!state.is_expanded(2));
}

#[test]
fn new_state_starts_from_mock_placeholder() {
    let state = AppState::new();
    assert_eq!(state.teams.len(), 40);
    assert_eq!(state.source, DataSource::Fallback);
    assert_eq!(state.teams[0].name, "Team 1");
}
