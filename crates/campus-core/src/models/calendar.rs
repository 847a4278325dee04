//! Holiday and leave allocation payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::payload::{require_text, ResourcePayload};
use super::ResourceKind;
use crate::error::{Error, Result};

/// Body for `POST /holidays/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHoliday {
    pub name: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

impl NewHoliday {
    /// Inclusive length in days
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.ends_on - self.starts_on).num_days() + 1
    }
}

impl ResourcePayload for NewHoliday {
    const KIND: ResourceKind = ResourceKind::Holidays;

    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        if self.ends_on < self.starts_on {
            return Err(Error::InvalidInput(
                "ends_on must not be before starts_on".to_string(),
            ));
        }
        Ok(())
    }
}

/// Yearly leave budget for one teacher and leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeaveAllocation {
    pub teacher_id: String,
    pub leave_type: String,
    pub days: u16,
    pub academic_year: String,
}

impl ResourcePayload for NewLeaveAllocation {
    const KIND: ResourceKind = ResourceKind::LeaveAllocations;

    fn validate(&self) -> Result<()> {
        require_text("teacher_id", &self.teacher_id)?;
        require_text("leave_type", &self.leave_type)?;
        require_text("academic_year", &self.academic_year)?;
        if self.days == 0 {
            return Err(Error::InvalidInput(
                "days must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
