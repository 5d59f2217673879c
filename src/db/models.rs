use serde::{Deserialize, Serialize};

/// Placeholder stored in `roll_no` and `sem` when the field does not apply.
pub const NOT_APPLICABLE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }

    /// Subtitle shown under the greeting on the home page.
    pub fn portal_title(&self) -> &'static str {
        match self {
            Role::Student => "Student Portal",
            Role::Teacher => "Faculty Portal",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            _ => Err(format!("{:?} is not a valid role", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: Role,
    pub name: String,
    pub roll_no: String,
    pub department: String,
    pub sem: String,
    pub year: String,
    pub photo: String,
}

impl User {
    /// Roll number, or `None` when the sentinel marks it as not applicable.
    pub fn roll_no(&self) -> Option<&str> {
        applicable(&self.roll_no)
    }

    /// Semester, or `None` when the sentinel marks it as not applicable.
    pub fn sem(&self) -> Option<&str> {
        applicable(&self.sem)
    }
}

fn applicable(value: &str) -> Option<&str> {
    if value == NOT_APPLICABLE {
        None
    } else {
        Some(value)
    }
}
