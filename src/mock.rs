use rand::Rng;

use crate::schedule::TeamRecord;

pub const DEFAULT_MOCK_TEAMS: usize = 40;

/// Placeholder/fallback board with the default team count.
pub fn mock_teams() -> Vec<TeamRecord> {
    generate_mock_teams(DEFAULT_MOCK_TEAMS)
}

pub fn generate_mock_teams(count: usize) -> Vec<TeamRecord> {
    let mut rng = rand::thread_rng();
    generate_mock_teams_with(count, &mut rng)
}

pub fn generate_mock_teams_with<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<TeamRecord> {
    (1..=count)
        .map(|i| {
            let id = u32::try_from(i).unwrap_or(u32::MAX);
            TeamRecord::from_slots(id, format!("Team {i}"), |_| Some(random_score(&mut *rng)))
        })
        .collect()
}

fn random_score<R: Rng + ?Sized>(rng: &mut R) -> String {
    let team = rng.gen_range(0..100);
    let opponent = rng.gen_range(0..100);
    format!("{team}-{opponent}")
}
