use crate::models::{CommonFields, Profile};

/// Highest possible compatibility score
pub const MAX_COMPATIBILITY: u8 = 4;

/// Compare the four matchable attributes of two profiles
///
/// Scoring dimensions:
///   study preference  - equal
///   academic year     - equal
///   study goals       - the goal sets share at least one goal
///   study frequency   - equal
///
/// Two `unknown` years or frequencies are equal and count as shared.
pub fn compare_profiles(requester: &Profile, candidate: &Profile) -> CommonFields {
    CommonFields {
        study_preference: requester.study_preference == candidate.study_preference,
        academic_year: requester.academic_year == candidate.academic_year,
        study_goals: requester.study_goals.intersects(&candidate.study_goals),
        study_frequency: requester.study_frequency == candidate.study_frequency,
    }
}

/// Compatibility score (0-4): the number of attributes two profiles share
#[inline]
pub fn compatibility_score(requester: &Profile, candidate: &Profile) -> u8 {
    compare_profiles(requester, candidate).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AcademicYear, StudyFrequency, StudyGoal, StudyGoals, StudyPreference};

    fn profile(
        preference: StudyPreference,
        year: AcademicYear,
        goals: &[StudyGoal],
        frequency: StudyFrequency,
    ) -> Profile {
        Profile {
            classes: vec!["MAC2311".to_string()],
            study_preference: preference,
            academic_year: year,
            study_goals: StudyGoals::new(goals.iter().copied()),
            study_frequency: frequency,
        }
    }

    #[test]
    fn test_identical_profiles_score_max() {
        let a = profile(
            StudyPreference::Long,
            AcademicYear::Junior,
            &[StudyGoal::Exam],
            StudyFrequency::Daily,
        );

        assert_eq!(compatibility_score(&a, &a.clone()), MAX_COMPATIBILITY);
    }

    #[test]
    fn test_nothing_in_common() {
        let a = profile(
            StudyPreference::Long,
            AcademicYear::Junior,
            &[StudyGoal::Exam],
            StudyFrequency::Daily,
        );
        let b = profile(
            StudyPreference::Frequent,
            AcademicYear::Senior,
            &[StudyGoal::Homework],
            StudyFrequency::Once,
        );

        let fields = compare_profiles(&a, &b);
        assert_eq!(fields, CommonFields::default());
        assert_eq!(compatibility_score(&a, &b), 0);
    }

    #[test]
    fn test_partial_goal_overlap_counts() {
        let a = profile(
            StudyPreference::Long,
            AcademicYear::Junior,
            &[StudyGoal::Exam, StudyGoal::Review],
            StudyFrequency::Daily,
        );
        let b = profile(
            StudyPreference::Frequent,
            AcademicYear::Senior,
            &[StudyGoal::Review, StudyGoal::Homework],
            StudyFrequency::Once,
        );

        let fields = compare_profiles(&a, &b);
        assert!(fields.study_goals);
        assert_eq!(fields.count(), 1);
    }

    #[test]
    fn test_empty_goal_sets_do_not_match() {
        let a = profile(StudyPreference::Long, AcademicYear::Junior, &[], StudyFrequency::Daily);

        assert!(!compare_profiles(&a, &a.clone()).study_goals);
        assert_eq!(compatibility_score(&a, &a.clone()), 3);
    }

    #[test]
    fn test_unknown_answers_match_each_other() {
        let a = profile(
            StudyPreference::Long,
            AcademicYear::Unknown,
            &[StudyGoal::Exam],
            StudyFrequency::Unknown,
        );

        let fields = compare_profiles(&a, &a.clone());
        assert!(fields.academic_year);
        assert!(fields.study_frequency);
        assert_eq!(fields.count(), MAX_COMPATIBILITY);
    }

    #[test]
    fn test_unknown_does_not_match_a_stated_answer() {
        let a = profile(
            StudyPreference::Long,
            AcademicYear::Unknown,
            &[StudyGoal::Exam],
            StudyFrequency::Unknown,
        );
        let b = profile(
            StudyPreference::Long,
            AcademicYear::Junior,
            &[StudyGoal::Exam],
            StudyFrequency::Daily,
        );

        let fields = compare_profiles(&a, &b);
        assert!(!fields.academic_year);
        assert!(!fields.study_frequency);
        assert_eq!(fields.count(), 2);
    }
}
