/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role carried in the JWT and checked by the authorization guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "STUDENT" => Ok(Role::Student),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Term grouping for subjects; the per-student quota is scoped to one course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CourseId {
    K01,
    K02,
    Other,
}

impl CourseId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseId::K01 => "K01",
            CourseId::K02 => "K02",
            CourseId::Other => "OTHER",
        }
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "K01" => Ok(CourseId::K01),
            "K02" => Ok(CourseId::K02),
            "OTHER" => Ok(CourseId::Other),
            other => Err(format!("unknown course id '{}'", other)),
        }
    }
}

/// Authenticated caller resolved by the JWT middleware and passed explicitly
/// into every registration call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub email: String,
    pub role: Role,
}

impl Caller {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    pub fn admin(email: impl Into<String>) -> Self {
        Self::new(email, Role::Admin)
    }

    pub fn student(email: impl Into<String>) -> Self {
        Self::new(email, Role::Student)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"STUDENT\"").unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn course_id_parses_case_insensitively() {
        assert_eq!("k01".parse::<CourseId>().unwrap(), CourseId::K01);
        assert_eq!("OTHER".parse::<CourseId>().unwrap(), CourseId::Other);
        assert!("K03".parse::<CourseId>().is_err());
    }
}
