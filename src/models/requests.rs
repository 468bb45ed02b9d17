use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{AcademicYear, Profile, StudyFrequency, StudyGoals, StudyPreference};

/// Signup and login body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthRequest {
    #[validate(length(min = 3, max = 32), custom(function = "validate_username"))]
    #[serde(default)]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    #[serde(default)]
    pub password: String,
}

impl AuthRequest {
    pub fn trimmed(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.username.is_empty() || self.password.is_empty()
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if allowed {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset"))
    }
}

/// Profile create/update body.
///
/// Accepts both the legacy `studyGoal` scalar and the `studyGoals` array.
/// At most 20 classes per profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 20))]
    pub classes: Vec<String>,
    pub study_preference: StudyPreference,
    #[serde(default)]
    pub academic_year: AcademicYear,
    #[serde(default, alias = "studyGoal")]
    pub study_goals: StudyGoals,
    #[serde(default)]
    pub study_frequency: StudyFrequency,
}

impl ProfileRequest {
    /// Build a normalized profile, or `None` when no usable class is left
    pub fn into_profile(self) -> Option<Profile> {
        let profile = Profile {
            classes: self.classes,
            study_preference: self.study_preference,
            academic_year: self.academic_year,
            study_goals: self.study_goals,
            study_frequency: self.study_frequency,
        }
        .normalized();

        if profile.classes.is_empty() {
            None
        } else {
            Some(profile)
        }
    }
}

/// Calendar update body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub date: Option<String>,
    pub status: Option<String>,
}

/// Friend request / accept / deny body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RelationshipRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub from: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub to: String,
}

/// Direct message body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub sender: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_request_trims_and_validates() {
        let req: AuthRequest =
            serde_json::from_value(json!({ "username": "  albert_g ", "password": " pw " })).unwrap();
        let req = req.trimmed();

        assert_eq!(req.username, "albert_g");
        assert_eq!(req.password, "pw");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_auth_request_rejects_bad_charset() {
        let req = AuthRequest {
            username: "al bert".to_string(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_profile_request_requires_a_real_class() {
        let req: ProfileRequest = serde_json::from_value(json!({
            "classes": ["  ", ""],
            "studyPreference": "long"
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert!(req.into_profile().is_none());
    }

    #[test]
    fn test_profile_request_rejects_missing_preference() {
        let result: Result<ProfileRequest, _> =
            serde_json::from_value(json!({ "classes": ["MAC2311"] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_request_rejects_unlisted_values() {
        for body in [
            json!({ "classes": ["MAC2311"], "studyPreference": "long", "academicYear": "phd" }),
            json!({ "classes": ["MAC2311"], "studyPreference": "long", "studyFrequency": "hourly" }),
            json!({ "classes": ["MAC2311"], "studyPreference": "long", "studyGoals": ["party"] }),
        ] {
            assert!(serde_json::from_value::<ProfileRequest>(body).is_err());
        }
    }

    #[test]
    fn test_profile_request_caps_class_count() {
        let classes: Vec<String> = (0..21).map(|i| format!("CLS{}", 1000 + i)).collect();
        let req: ProfileRequest = serde_json::from_value(json!({
            "classes": classes,
            "studyPreference": "long"
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}
