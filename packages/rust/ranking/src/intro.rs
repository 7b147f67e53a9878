//! Warm-intro path scoring.
//!
//! Every mutual connection between the source and the target is a candidate
//! intermediary. Each candidate gets an additive score built from a fixed set of
//! terms. Every applied term leaves one rationale line, so the score can always
//! be explained from the output alone.

use std::cmp::Ordering;

use tracing::debug;

use warmpath_shared::{ConnectionDegree, PersonRecord, ScoredPath, WarmIntroTargetContext};

use crate::tokens::shared_token_count;

/// Starting score for every mutual.
pub const BASE_SCORE: i32 = 40;
/// Mutual is a first-degree connection of the source.
pub const FIRST_DEGREE_BONUS: i32 = 30;
/// Mutual is a second-degree connection of the source.
pub const SECOND_DEGREE_BONUS: i32 = 15;
pub const HEADLINE_POINTS_PER_TOKEN: i32 = 4;
pub const HEADLINE_BONUS_CAP: i32 = 20;
pub const LOCATION_POINTS_PER_TOKEN: i32 = 5;
pub const LOCATION_BONUS_CAP: i32 = 15;
/// Applied when the mutual has no headline to judge fit from.
pub const EMPTY_HEADLINE_PENALTY: i32 = 5;

/// Score every mutual as an intermediary from `source_id` to `target`.
///
/// Output is sorted best first. Ties fall back to the mutual's name (ignoring
/// case, then exact) and finally the profile URL, so the order is total.
pub fn build_paths(
    source_id: &str,
    target: &WarmIntroTargetContext,
    mutuals: &[PersonRecord],
) -> Vec<ScoredPath> {
    let mut paths: Vec<ScoredPath> = mutuals
        .iter()
        .map(|mutual| score_mutual(source_id, target, mutual))
        .collect();

    paths.sort_by(compare_paths);

    debug!(
        target = %target.profile_url,
        candidates = paths.len(),
        best = paths.first().map(|p| p.score),
        "ranked warm-intro paths"
    );
    paths
}

fn score_mutual(
    source_id: &str,
    target: &WarmIntroTargetContext,
    mutual: &PersonRecord,
) -> ScoredPath {
    let mut score = BASE_SCORE;
    let mut rationale = Vec::new();

    let (bonus, reason) = degree_term(mutual.connection_degree);
    score += bonus;
    rationale.push(reason);

    let shared_headline = shared_token_count(&mutual.headline, &target.headline);
    let headline_bonus = capped(shared_headline, HEADLINE_POINTS_PER_TOKEN, HEADLINE_BONUS_CAP);
    if headline_bonus > 0 {
        score += headline_bonus;
        rationale.push(format!(
            "Headline shares {shared_headline} term(s) with the target (+{headline_bonus})"
        ));
    }

    let shared_location = shared_token_count(&mutual.location, &target.location);
    let location_bonus = capped(shared_location, LOCATION_POINTS_PER_TOKEN, LOCATION_BONUS_CAP);
    if location_bonus > 0 {
        score += location_bonus;
        rationale.push(format!(
            "Location shares {shared_location} term(s) with the target (+{location_bonus})"
        ));
    }

    if mutual.headline.trim().is_empty() {
        score -= EMPTY_HEADLINE_PENALTY;
        rationale.push(format!(
            "No headline to judge fit from (-{EMPTY_HEADLINE_PENALTY})"
        ));
    }

    ScoredPath {
        score,
        rationale,
        source_profile_url: source_id.to_string(),
        via: mutual.clone(),
        target_profile_url: target.profile_url.to_string(),
        target_name: target.name.clone(),
        path: [
            source_id.to_string(),
            mutual.profile_url.to_string(),
            target.profile_url.to_string(),
        ],
    }
}

fn degree_term(degree: ConnectionDegree) -> (i32, String) {
    match degree {
        ConnectionDegree::First => (
            FIRST_DEGREE_BONUS,
            format!("1st-degree connection of the source (+{FIRST_DEGREE_BONUS})"),
        ),
        ConnectionDegree::Second => (
            SECOND_DEGREE_BONUS,
            format!("2nd-degree connection of the source (+{SECOND_DEGREE_BONUS})"),
        ),
        ConnectionDegree::Third => (0, "3rd-degree connection of the source (+0)".to_string()),
        ConnectionDegree::Unknown => (0, "Connection degree unknown (+0)".to_string()),
    }
}

fn capped(shared: usize, per_token: i32, cap: i32) -> i32 {
    let shared = i32::try_from(shared).unwrap_or(i32::MAX);
    shared.saturating_mul(per_token).min(cap)
}

fn compare_paths(a: &ScoredPath, b: &ScoredPath) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.via.name.to_lowercase().cmp(&b.via.name.to_lowercase()))
        .then_with(|| a.via.name.cmp(&b.via.name))
        .then_with(|| a.via.profile_url.cmp(&b.via.profile_url))
}
