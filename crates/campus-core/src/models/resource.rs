//! Resource families exposed by the school management API

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A family of records served under one REST collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Teachers,
    Classes,
    Students,
    Subjects,
    LeaveAllocations,
    Holidays,
    OrganizationPreferences,
}

impl ResourceKind {
    pub const ALL: [Self; 7] = [
        Self::Teachers,
        Self::Classes,
        Self::Students,
        Self::Subjects,
        Self::LeaveAllocations,
        Self::Holidays,
        Self::OrganizationPreferences,
    ];

    /// Collection path segment used by the REST API
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Teachers => "teachers",
            Self::Classes => "classes",
            Self::Students => "students",
            Self::Subjects => "subjects",
            Self::LeaveAllocations => "leave-allocations",
            Self::Holidays => "holidays",
            Self::OrganizationPreferences => "organization-preferences",
        }
    }

    /// Human-readable label for headings and messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Teachers => "Teachers",
            Self::Classes => "Classes",
            Self::Students => "Students",
            Self::Subjects => "Subjects",
            Self::LeaveAllocations => "Leave allocations",
            Self::Holidays => "Holidays",
            Self::OrganizationPreferences => "Organization preferences",
        }
    }

    /// Whether the server soft-deletes records of this family, which is what
    /// makes a deleted-duplicate conflict possible on create.
    #[must_use]
    pub const fn supports_reactivation(self) -> bool {
        !matches!(self, Self::OrganizationPreferences)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.path_segment() == normalized
                    || kind.path_segment().trim_end_matches('s') == normalized
            })
            .or_else(|| (normalized == "class").then_some(Self::Classes))
            .ok_or_else(|| Error::UnknownResource(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plural_singular_and_snake_case_names() {
        assert_eq!("teachers".parse::<ResourceKind>().unwrap(), ResourceKind::Teachers);
        assert_eq!("Teacher".parse::<ResourceKind>().unwrap(), ResourceKind::Teachers);
        assert_eq!("class".parse::<ResourceKind>().unwrap(), ResourceKind::Classes);
        assert_eq!(
            "leave_allocations".parse::<ResourceKind>().unwrap(),
            ResourceKind::LeaveAllocations
        );
        assert_eq!(
            "organization-preference".parse::<ResourceKind>().unwrap(),
            ResourceKind::OrganizationPreferences
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let error = "parents".parse::<ResourceKind>().unwrap_err();
        assert!(error.to_string().contains("parents"));
    }

    #[test]
    fn display_matches_path_segment() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.to_string(), kind.path_segment());
        }
    }
}
