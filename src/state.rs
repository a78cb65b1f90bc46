use std::collections::{HashSet, VecDeque};

use crate::mock::mock_teams;
use crate::schedule::TeamRecord;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub teams: Vec<TeamRecord>,
    pub source: DataSource,
    pub search: String,
    pub search_active: bool,
    pub selected: usize,
    pub expanded: HashSet<u32>,
    pub logs: VecDeque<String>,
    pub last_refreshed: Option<String>,
    pub refresh_inflight: bool,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Starts with a mock board so the first frame has something to show
    /// while the initial fetch runs.
    pub fn new() -> Self {
        Self::with_teams(mock_teams(), DataSource::Fallback)
    }

    pub fn with_teams(teams: Vec<TeamRecord>, source: DataSource) -> Self {
        Self {
            teams,
            source,
            search: String::new(),
            search_active: false,
            selected: 0,
            expanded: HashSet::new(),
            logs: VecDeque::with_capacity(MAX_LOGS),
            last_refreshed: None,
            refresh_inflight: false,
            help_overlay: false,
        }
    }

    pub fn filtered_teams(&self) -> Vec<&TeamRecord> {
        filter_teams(&self.teams, &self.search)
    }

    pub fn selected_team(&self) -> Option<&TeamRecord> {
        self.filtered_teams().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let total = self.filtered_teams().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.filtered_teams().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.filtered_teams().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    pub fn toggle_expanded(&mut self) {
        let Some(id) = self.selected_team().map(|t| t.id) else {
            return;
        };
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded.contains(&id)
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.search_active = false;
        self.clamp_selection();
    }

    /// Single-flight guard for fetch/refresh. Returns false while one is
    /// already running; the caller must not send another command then.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refresh_inflight {
            return false;
        }
        self.refresh_inflight = true;
        true
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

/// Case-insensitive substring match on team names. An empty term keeps
/// everything.
pub fn filter_teams<'a>(teams: &'a [TeamRecord], term: &str) -> Vec<&'a TeamRecord> {
    let needle = term.to_lowercase();
    teams
        .iter()
        .filter(|team| needle.is_empty() || team.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetTeams {
        teams: Vec<TeamRecord>,
        source: DataSource,
    },
    Log(String),
    Refreshed {
        at: String,
    },
    RefreshFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderCommand {
    /// Fetch and normalize the scores payload.
    FetchTeams,
    /// Trigger the backend load, then fetch.
    Refresh,
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetTeams { teams, source } => {
            let ids: HashSet<u32> = teams.iter().map(|t| t.id).collect();
            state.expanded.retain(|id| ids.contains(id));
            state.teams = teams;
            state.source = source;
            state.refresh_inflight = false;
            state.clamp_selection();
        }
        Delta::Log(msg) => state.push_log(msg),
        Delta::Refreshed { at } => {
            state.push_log(format!("[INFO] Data refreshed at {at}"));
            state.last_refreshed = Some(at);
        }
        Delta::RefreshFailed => {
            state.refresh_inflight = false;
        }
    }
}

pub fn source_label(source: DataSource) -> &'static str {
    match source {
        DataSource::Remote => "LIVE",
        DataSource::Fallback => "FALLBACK",
    }
}
