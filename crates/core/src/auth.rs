use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TimeError, TimeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Doctor => "doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "doctor" => Ok(Role::Doctor),
            other => Err(TimeError::Authentication(format!("Unknown role: {}", other))),
        }
    }
}

/// The caller's identity, resolved by the auth provider and passed in explicitly.
///
/// Doctor accounts are keyed by their doctor id, so for [`Role::Doctor`]
/// `current_user_id` is also the doctor whose schedules they own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub role: Role,
    pub current_user_id: Uuid,
}

impl AuthContext {
    pub fn new(role: Role, current_user_id: Uuid) -> Self {
        Self {
            role,
            current_user_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Restricts list queries for doctors to their own schedules.
    pub fn scoped_doctor_id(&self) -> Option<Uuid> {
        match self.role {
            Role::Doctor => Some(self.current_user_id),
            Role::Admin | Role::Staff => None,
        }
    }

    pub fn can_view_schedules_of(&self, doctor_id: Uuid) -> bool {
        match self.role {
            Role::Admin | Role::Staff => true,
            Role::Doctor => self.current_user_id == doctor_id,
        }
    }

    pub fn can_manage_schedules_of(&self, doctor_id: Uuid) -> bool {
        match self.role {
            Role::Admin | Role::Staff => true,
            Role::Doctor => self.current_user_id == doctor_id,
        }
    }

    pub fn can_manage_staff(&self) -> bool {
        self.is_admin()
    }

    pub fn ensure_can_view_schedules_of(&self, doctor_id: Uuid) -> TimeResult<()> {
        if self.can_view_schedules_of(doctor_id) {
            Ok(())
        } else {
            Err(TimeError::Authorization(format!(
                "{} {} may not view schedules of doctor {}",
                self.role, self.current_user_id, doctor_id
            )))
        }
    }

    pub fn ensure_can_manage_schedules_of(&self, doctor_id: Uuid) -> TimeResult<()> {
        if self.can_manage_schedules_of(doctor_id) {
            Ok(())
        } else {
            Err(TimeError::Authorization(format!(
                "{} {} may not manage schedules of doctor {}",
                self.role, self.current_user_id, doctor_id
            )))
        }
    }

    pub fn ensure_can_manage_staff(&self) -> TimeResult<()> {
        if self.can_manage_staff() {
            Ok(())
        } else {
            Err(TimeError::Authorization(
                "Only administrators may manage staff users".to_string(),
            ))
        }
    }
}
