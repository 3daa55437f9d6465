use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::DomainError;

/// Fixed role set referenced by accounts.
///
/// Read-only reference data; modeled as a closed enum rather than a seeded
/// lookup table. The wire carries role names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Management,
    Auditor,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Management, Role::Auditor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Management => "Management",
            Role::Auditor => "Auditor",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Management" => Ok(Role::Management),
            "Auditor" => Ok(Role::Auditor),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "Operator".parse::<Role>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn serializes_as_role_name() {
        let json = serde_json::to_value(Role::Management).unwrap();
        assert_eq!(json, serde_json::json!("Management"));
    }
}
