//! Role types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a session acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Files expense claims.
    Student,
    /// Approves, rejects, and settles claims; owns the budget.
    Treasurer,
}

impl Role {
    /// Returns the string representation persisted in the session store.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Treasurer => "treasurer",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "treasurer" => Some(Self::Treasurer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A session lacked the role an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied {
    /// Role the operation needs; `None` means any logged-in role.
    pub required: Option<Role>,
    /// Role the session held, `None` when nobody is logged in.
    pub actual: Option<Role>,
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.required, self.actual) {
            (Some(required), Some(actual)) => {
                write!(f, "requires the {required} role, session is {actual}")
            }
            (Some(required), None) => {
                write!(f, "requires the {required} role, no one is logged in")
            }
            (None, _) => write!(f, "requires a logged-in session"),
        }
    }
}

impl std::error::Error for AccessDenied {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("student", Some(Role::Student))]
    #[case("Treasurer", Some(Role::Treasurer))]
    #[case(" STUDENT ", Some(Role::Student))]
    #[case("admin", None)]
    #[case("", None)]
    fn test_role_parse(#[case] input: &str, #[case] expected: Option<Role>) {
        assert_eq!(Role::parse(input), expected);
    }

    #[test]
    fn test_role_display_matches_persisted_form() {
        assert_eq!(Role::Student.to_string(), "student");
        assert_eq!(Role::Treasurer.to_string(), "treasurer");
    }

    #[test]
    fn test_access_denied_messages() {
        let wrong_role = AccessDenied {
            required: Some(Role::Treasurer),
            actual: Some(Role::Student),
        };
        assert_eq!(
            wrong_role.to_string(),
            "requires the treasurer role, session is student"
        );

        let logged_out = AccessDenied {
            required: Some(Role::Treasurer),
            actual: None,
        };
        assert_eq!(
            logged_out.to_string(),
            "requires the treasurer role, no one is logged in"
        );

        let anyone = AccessDenied {
            required: None,
            actual: None,
        };
        assert_eq!(anyone.to_string(), "requires a logged-in session");
    }
}
