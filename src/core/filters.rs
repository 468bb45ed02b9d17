use std::collections::HashSet;

/// Classes of the requester that the candidate also takes.
///
/// Keeps the requester's ordering and never repeats a class.
pub fn shared_classes(requester_classes: &[String], candidate_classes: &[String]) -> Vec<String> {
    let candidate: HashSet<&str> = candidate_classes.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    requester_classes
        .iter()
        .filter(|class| candidate.contains(class.as_str()))
        .filter(|class| seen.insert(class.as_str()))
        .cloned()
        .collect()
}

/// Check whether a username may be offered to the requester at all
///
/// This is the first stage of the matching pipeline: the requester never sees
/// themselves, and excluded users (current friends) are never re-offered.
#[inline]
pub fn is_eligible_candidate(
    requester: &str,
    candidate: &str,
    excluded_usernames: &HashSet<String>,
) -> bool {
    candidate != requester && !excluded_usernames.contains(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_shared_classes_follow_requester_order() {
        let requester = classes(&["MAC2311", "CHM2045", "PHY2048"]);
        let candidate = classes(&["PHY2048", "CHM2045", "MAC2311"]);

        assert_eq!(
            shared_classes(&requester, &candidate),
            vec!["MAC2311", "CHM2045", "PHY2048"]
        );
    }

    #[test]
    fn test_shared_classes_without_duplicates() {
        let requester = classes(&["MAC2311", "MAC2311", "COP3502"]);
        let candidate = classes(&["MAC2311"]);

        assert_eq!(shared_classes(&requester, &candidate), vec!["MAC2311"]);
    }

    #[test]
    fn test_no_overlap() {
        let requester = classes(&["MAC2311"]);
        let candidate = classes(&["ENC1101"]);

        assert!(shared_classes(&requester, &candidate).is_empty());
    }

    #[test]
    fn test_class_codes_are_case_sensitive() {
        let requester = classes(&["MAC2311"]);
        let candidate = classes(&["mac2311"]);

        assert!(shared_classes(&requester, &candidate).is_empty());
    }

    #[test]
    fn test_candidate_eligibility() {
        let mut excluded = HashSet::new();
        excluded.insert("friend".to_string());

        assert!(is_eligible_candidate("me", "stranger", &excluded));
        assert!(!is_eligible_candidate("me", "me", &excluded));
        assert!(!is_eligible_candidate("me", "friend", &excluded));
    }
}
