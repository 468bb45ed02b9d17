use std::collections::HashSet;
use crate::models::{Match, Profile, ProfileMap};
use crate::core::{
    filters::{is_eligible_candidate, shared_classes},
    scoring::compare_profiles,
};

/// Rank study partner candidates for a user
///
/// # Pipeline Stages
/// 1. Candidate eligibility (not the requester, not excluded)
/// 2. Shared class hard filter
/// 3. Attribute comparison and scoring
/// 4. Ranking by score, then by number of shared classes
///
/// # Arguments
/// * `requester` - Username of the user asking for matches
/// * `requester_profile` - Their profile; no classes means no matches
/// * `all_profiles` - Every stored profile, the requester's own included
/// * `excluded_usernames` - Users that must not be offered (current friends)
///
/// # Returns
/// Every qualifying candidate, best first. Candidates tied on both keys keep
/// no particular order.
pub fn compute_matches(
    requester: &str,
    requester_profile: &Profile,
    all_profiles: &ProfileMap,
    excluded_usernames: &HashSet<String>,
) -> Vec<Match> {
    if requester_profile.classes.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Match> = all_profiles
        .iter()
        // Stage 1: eligibility
        .filter(|(username, _)| is_eligible_candidate(requester, username, excluded_usernames))
        // Stage 2-3: shared classes and scoring
        .filter_map(|(username, profile)| {
            let shared = shared_classes(&requester_profile.classes, &profile.classes);
            if shared.is_empty() {
                return None;
            }

            let common_fields = compare_profiles(requester_profile, profile);

            Some(Match {
                username: username.clone(),
                profile: profile.clone(),
                shared_classes: shared,
                compatibility_score: common_fields.count(),
                common_fields,
            })
        })
        .collect();

    // Stage 4: score (descending), then shared classes (descending)
    matches.sort_by(|a, b| {
        b.compatibility_score
            .cmp(&a.compatibility_score)
            .then_with(|| b.shared_classes.len().cmp(&a.shared_classes.len()))
    });

    matches
}
