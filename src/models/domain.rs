use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Preferred shape of a study session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyPreference {
    Long,
    Frequent,
}

impl StudyPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyPreference::Long => "long",
            StudyPreference::Frequent => "frequent",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcademicYear {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Graduate,
    #[default]
    Unknown,
}

impl AcademicYear {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcademicYear::Freshman => "freshman",
            AcademicYear::Sophomore => "sophomore",
            AcademicYear::Junior => "junior",
            AcademicYear::Senior => "senior",
            AcademicYear::Graduate => "graduate",
            AcademicYear::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyFrequency {
    Once,
    BeforeExams,
    Daily,
    Other,
    #[default]
    Unknown,
}

impl StudyFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyFrequency::Once => "once",
            StudyFrequency::BeforeExams => "before-exams",
            StudyFrequency::Daily => "daily",
            StudyFrequency::Other => "other",
            StudyFrequency::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyGoal {
    Exam,
    Homework,
    Review,
    /// Placeholder written by older clients; never stored in a set
    Unknown,
}

/// Normalized set of study goals.
///
/// Older profiles stored a single `studyGoal` string while newer ones store an
/// array. Both shapes deserialize into this set; `unknown` placeholders are
/// dropped so they never count towards a goal match. Any other unrecognized
/// goal is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StudyGoals(BTreeSet<StudyGoal>);

impl StudyGoals {
    pub fn new<I>(goals: I) -> Self
    where
        I: IntoIterator<Item = StudyGoal>,
    {
        Self(
            goals
                .into_iter()
                .filter(|goal| *goal != StudyGoal::Unknown)
                .collect(),
        )
    }

    /// True when both sets share at least one goal
    pub fn intersects(&self, other: &StudyGoals) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    pub fn contains(&self, goal: StudyGoal) -> bool {
        self.0.contains(&goal)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudyGoal> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for StudyGoals {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(StudyGoal),
            Many(Vec<StudyGoal>),
        }

        Ok(match Option::<Repr>::deserialize(deserializer)? {
            None => Self::default(),
            Some(Repr::One(goal)) => Self::new([goal]),
            Some(Repr::Many(goals)) => Self::new(goals),
        })
    }
}

/// A user's study profile, keyed by username in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub classes: Vec<String>,
    pub study_preference: StudyPreference,
    #[serde(default)]
    pub academic_year: AcademicYear,
    #[serde(default, alias = "studyGoal")]
    pub study_goals: StudyGoals,
    #[serde(default)]
    pub study_frequency: StudyFrequency,
}

impl Profile {
    /// Trim class codes, drop blanks and repeated codes while keeping the
    /// first-seen order.
    pub fn normalize_classes<I, S>(classes: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        classes
            .into_iter()
            .map(|class| class.as_ref().trim().to_string())
            .filter(|class| !class.is_empty())
            .filter(|class| seen.insert(class.clone()))
            .collect()
    }

    pub fn normalized(mut self) -> Self {
        self.classes = Self::normalize_classes(&self.classes);
        self
    }
}

/// All stored profiles, keyed by username
pub type ProfileMap = BTreeMap<String, Profile>;

/// Friend state as seen from one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    /// Users who asked to be friends and are waiting on this user
    #[serde(default)]
    pub pending: Vec<String>,
    #[serde(default)]
    pub friends: Vec<String>,
}

impl Relationships {
    pub fn has_pending(&self, username: &str) -> bool {
        self.pending.iter().any(|u| u == username)
    }

    pub fn is_friend(&self, username: &str) -> bool {
        self.friends.iter().any(|u| u == username)
    }
}

/// Which profile attributes two users have in common
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonFields {
    pub study_preference: bool,
    pub academic_year: bool,
    pub study_goals: bool,
    pub study_frequency: bool,
}

impl CommonFields {
    pub fn count(&self) -> u8 {
        [
            self.study_preference,
            self.academic_year,
            self.study_goals,
            self.study_frequency,
        ]
        .iter()
        .filter(|matched| **matched)
        .count() as u8
    }
}

/// Ranked study partner candidate. Computed per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub username: String,
    pub profile: Profile,
    pub shared_classes: Vec<String>,
    pub compatibility_score: u8,
    pub common_fields: CommonFields,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Stored account. Never serialized back to clients.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub username: String,
    pub password_hash: String,
    pub salt: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Unavailable => "unavailable",
        }
    }
}

/// Calendar of one user, serialized as `{"YYYY-MM-DD": "available"}`
pub type Availability = BTreeMap<NaiveDate, AvailabilityStatus>;

/// Direct message between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: String,
    pub receiver: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Message {
    pub fn new(sender: String, receiver: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            receiver,
            content,
            timestamp: Utc::now(),
            read: false,
        }
    }

    /// The participant of this message that is not `username`
    pub fn counterpart(&self, username: &str) -> &str {
        if self.sender == username {
            &self.receiver
        } else {
            &self.sender
        }
    }
}

/// Latest state of a conversation with one counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub other_username: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_goals_accept_legacy_scalar() {
        let goals: StudyGoals = serde_json::from_value(json!("exam")).unwrap();
        assert_eq!(goals.len(), 1);
        assert!(goals.contains(StudyGoal::Exam));
    }

    #[test]
    fn test_goals_accept_array_and_drop_unknown() {
        let goals: StudyGoals =
            serde_json::from_value(json!(["review", "unknown", "homework", "review"])).unwrap();
        assert_eq!(goals.len(), 2);
        assert!(goals.contains(StudyGoal::Review));
        assert!(goals.contains(StudyGoal::Homework));
    }

    #[test]
    fn test_goals_reject_unrecognized_value() {
        assert!(serde_json::from_value::<StudyGoals>(json!(["exam", "party"])).is_err());
        assert!(serde_json::from_value::<StudyGoals>(json!("party")).is_err());
    }

    #[test]
    fn test_year_and_frequency_reject_unrecognized_value() {
        assert!(serde_json::from_value::<AcademicYear>(json!("phd")).is_err());
        assert!(serde_json::from_value::<StudyFrequency>(json!("hourly")).is_err());
        assert_eq!(
            serde_json::from_value::<AcademicYear>(json!("unknown")).unwrap(),
            AcademicYear::Unknown
        );
    }

    #[test]
    fn test_goals_null_is_empty() {
        let goals: StudyGoals = serde_json::from_value(json!(null)).unwrap();
        assert!(goals.is_empty());
    }

    #[test]
    fn test_profile_reads_legacy_study_goal_field() {
        let profile: Profile = serde_json::from_value(json!({
            "classes": ["MAC2311"],
            "studyPreference": "long",
            "academicYear": "junior",
            "studyGoal": "exam",
            "studyFrequency": "before-exams"
        }))
        .unwrap();

        assert!(profile.study_goals.contains(StudyGoal::Exam));
        assert_eq!(profile.study_frequency, StudyFrequency::BeforeExams);
    }

    #[test]
    fn test_profile_defaults_missing_fields_to_unknown() {
        let profile: Profile = serde_json::from_value(json!({
            "classes": ["MAC2311"],
            "studyPreference": "frequent"
        }))
        .unwrap();

        assert_eq!(profile.academic_year, AcademicYear::Unknown);
        assert_eq!(profile.study_frequency, StudyFrequency::Unknown);
        assert!(profile.study_goals.is_empty());
    }

    #[test]
    fn test_profile_serializes_goals_as_array() {
        let profile = Profile {
            classes: vec!["COP3502".to_string()],
            study_preference: StudyPreference::Long,
            academic_year: AcademicYear::Senior,
            study_goals: StudyGoals::new([StudyGoal::Homework]),
            study_frequency: StudyFrequency::Daily,
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["studyGoals"], json!(["homework"]));
        assert_eq!(value["academicYear"], json!("senior"));
    }

    #[test]
    fn test_normalize_classes_keeps_first_order() {
        let classes = Profile::normalize_classes([" MAC2311", "CHM2045", "", "MAC2311 "]);
        assert_eq!(classes, vec!["MAC2311", "CHM2045"]);
    }

    #[test]
    fn test_availability_serializes_with_date_keys() {
        let mut availability = Availability::new();
        availability.insert(
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            AvailabilityStatus::Available,
        );

        let value = serde_json::to_value(&availability).unwrap();
        assert_eq!(value, json!({ "2025-03-04": "available" }));
    }

    #[test]
    fn test_common_fields_count() {
        let fields = CommonFields {
            study_preference: true,
            academic_year: false,
            study_goals: true,
            study_frequency: true,
        };
        assert_eq!(fields.count(), 3);
    }
}
