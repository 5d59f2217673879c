//! What the home page shows for a given user.

use crate::db::models::{Role, User};

pub struct InfoCard {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Buttons on the home page. They have no behaviour yet.
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub tone: &'static str,
}

const STUDENT_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        title: "View Assignments",
        description: "Check pending assignments and submissions",
        tone: "blue",
    },
    QuickAction {
        title: "Course Materials",
        description: "Access lecture notes and resources",
        tone: "teal",
    },
    QuickAction {
        title: "Attendance Record",
        description: "Theory and Practical",
        tone: "purple",
    },
];

const TEACHER_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        title: "Manage Courses",
        description: "Create and edit course content",
        tone: "blue",
    },
    QuickAction {
        title: "Student Records",
        description: "View and manage student information",
        tone: "teal",
    },
    QuickAction {
        title: "Grade Assignments",
        description: "Review and grade student submissions",
        tone: "purple",
    },
];

pub fn quick_actions(role: Role) -> &'static [QuickAction] {
    match role {
        Role::Student => &STUDENT_ACTIONS,
        Role::Teacher => &TEACHER_ACTIONS,
    }
}

/// Semester, year and program cards. Only students enrolled in a
/// semester get them.
pub fn academic_cards(user: &User, program: &str) -> Vec<InfoCard> {
    let sem = match user.role {
        Role::Student => user.sem(),
        Role::Teacher => None,
    };

    match sem {
        Some(sem) => vec![
            InfoCard {
                icon: "book-open",
                label: "Current Semester",
                value: sem.to_string(),
            },
            InfoCard {
                icon: "calendar",
                label: "Academic Year",
                value: user.year.clone(),
            },
            InfoCard {
                icon: "graduation-cap",
                label: "Program",
                value: program.to_string(),
            },
        ],
        None => Vec::new(),
    }
}
