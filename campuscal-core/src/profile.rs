//! The acting user's identity and authorization context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Profile as served by the remote profile endpoint and mirrored in the
/// local cache. The role is the sole authorization signal; what each role
/// may do lives in `lifecycle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_email: Option<String>,
    // Student-specific fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<String>>,
}

/// The closed role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    AcademicAssistant,
    DepartmentAssistant,
    Administrator,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Student,
        Role::AcademicAssistant,
        Role::DepartmentAssistant,
        Role::Administrator,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Role::Student => "student",
            Role::AcademicAssistant => "academic_assistant",
            Role::DepartmentAssistant => "department_assistant",
            Role::Administrator => "administrator",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_snake_case_wire_labels() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn profile_parses_with_and_without_student_fields() {
        let staff: Profile = serde_json::from_str(
            r#"{"username": "daa01", "email": "daa@example.edu", "role": "department_assistant"}"#,
        )
        .unwrap();
        assert_eq!(staff.role, Role::DepartmentAssistant);
        assert!(staff.major.is_none());

        let student: Profile = serde_json::from_str(
            r#"{
                "username": "st01",
                "email": "st@example.edu",
                "role": "student",
                "contactNumber": "555-0100",
                "major": "ICT",
                "className": "B2",
                "courses": ["Advanced databases"]
            }"#,
        )
        .unwrap();
        assert_eq!(student.class_name.as_deref(), Some("B2"));
        assert_eq!(student.courses.as_ref().unwrap().len(), 1);
    }
}
