use serde::Serialize;

pub const ROUNDS_PER_DAY: usize = 5;
pub const TOTAL_ROUNDS: usize = ROUNDS_PER_DAY * 2;

pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_BYE: &str = "bye";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 2] = [Day::Friday, Day::Saturday];

    pub fn letter(self) -> char {
        match self {
            Day::Friday => 'F',
            Day::Saturday => 'S',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }

    /// Global slot indices (0..10) owned by this day.
    pub fn slots(self) -> std::ops::Range<usize> {
        match self {
            Day::Friday => 0..ROUNDS_PER_DAY,
            Day::Saturday => ROUNDS_PER_DAY..TOTAL_ROUNDS,
        }
    }

    pub fn for_slot(slot: usize) -> Day {
        if slot < ROUNDS_PER_DAY {
            Day::Friday
        } else {
            Day::Saturday
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundStatus {
    Submitted,
    Scheduled,
    Bye,
}

impl RoundStatus {
    pub fn label(self) -> &'static str {
        match self {
            RoundStatus::Submitted => "Submitted",
            RoundStatus::Scheduled => "Scheduled",
            RoundStatus::Bye => "Bye",
        }
    }
}

/// Exact, case-sensitive. Anything that is not a known status (including
/// mock score strings like "42-17") is a bye.
pub fn classify(raw: &str) -> RoundStatus {
    if raw == STATUS_SUBMITTED {
        RoundStatus::Submitted
    } else if raw == STATUS_SCHEDULED {
        RoundStatus::Scheduled
    } else {
        RoundStatus::Bye
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundEntry {
    pub opponent_label: String,
    pub raw_status: String,
}

impl RoundEntry {
    pub fn new(slot: usize, raw_status: impl Into<String>) -> Self {
        Self {
            opponent_label: opponent_label(slot),
            raw_status: raw_status.into(),
        }
    }

    pub fn bye(slot: usize) -> Self {
        Self::new(slot, STATUS_BYE)
    }

    pub fn status(&self) -> RoundStatus {
        classify(&self.raw_status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub id: u32,
    pub name: String,
    pub friday_rounds: Vec<RoundEntry>,
    pub saturday_rounds: Vec<RoundEntry>,
}

impl TeamRecord {
    /// Builds a record from a per-slot status lookup. `status_at` is asked for
    /// every slot in 0..10; slots it has nothing for become byes.
    pub fn from_slots<F>(id: u32, name: impl Into<String>, mut status_at: F) -> Self
    where
        F: FnMut(usize) -> Option<String>,
    {
        let mut day_rounds = |day: Day| {
            day.slots()
                .map(|slot| match status_at(slot) {
                    Some(raw) => RoundEntry::new(slot, raw),
                    None => RoundEntry::bye(slot),
                })
                .collect::<Vec<_>>()
        };
        let friday_rounds = day_rounds(Day::Friday);
        let saturday_rounds = day_rounds(Day::Saturday);
        Self {
            id,
            name: name.into(),
            friday_rounds,
            saturday_rounds,
        }
    }

    pub fn rounds(&self, day: Day) -> &[RoundEntry] {
        match day {
            Day::Friday => &self.friday_rounds,
            Day::Saturday => &self.saturday_rounds,
        }
    }

    pub fn count_status(&self, status: RoundStatus) -> usize {
        self.friday_rounds
            .iter()
            .chain(self.saturday_rounds.iter())
            .filter(|r| r.status() == status)
            .count()
    }
}

/// Synthetic label such as "F1" or "S5"; not a real opponent.
pub fn opponent_label(slot: usize) -> String {
    let day = Day::for_slot(slot);
    let position = slot - day.slots().start + 1;
    format!("{}{}", day.letter(), position)
}
