use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::roster::{Person, PersonId, Role, RosterStore};

#[derive(Debug, Clone)]
pub struct PickRecommendation {
    pub role: Role,
    pub person_id: PersonId,
    pub name: String,
    pub score: f64,
    pub win_rate: f64,
}

pub struct TeamRecommender;

impl TeamRecommender {
    /// Ranking score: average composite score, 0 for players with no history.
    pub fn calculate_score(person: &Person) -> f64 {
        person.stats.average_score().unwrap_or(0.0)
    }

    /// Best free players for `role`, strongest first.
    ///
    /// Ties on score fall back to win rate, then roster order.
    pub fn candidates(store: &RosterStore, role: Role) -> Vec<PickRecommendation> {
        let mut candidates: Vec<PickRecommendation> = store
            .persons()
            .iter()
            .filter(|p| p.role == role && store.team_of(p.id()).is_none())
            .map(|p| PickRecommendation {
                role,
                person_id: p.id().to_string(),
                name: p.name.to_string(),
                score: Self::calculate_score(p),
                win_rate: p.win_rate(),
            })
            .collect();

        // Stable sort keeps roster order for full ties
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(b.win_rate.partial_cmp(&a.win_rate).unwrap_or(Ordering::Equal))
        });
        candidates
    }

    /// Complete `picks` with the best free player for every unpicked role.
    ///
    /// Roles with no free player stay unpicked so that team formation can
    /// report them.
    pub fn auto_pick(store: &RosterStore, picks: &BTreeMap<Role, PersonId>) -> BTreeMap<Role, PersonId> {
        let mut completed = picks.clone();
        for role in Role::ALL {
            if completed.contains_key(&role) {
                continue;
            }
            if let Some(best) = Self::candidates(store, role).into_iter().next() {
                completed.insert(role, best.person_id);
            }
        }
        completed
    }
}
