use chrono::{DateTime, NaiveDate, Utc};

use super::{is_on_holiday, Member, MemberId, MemberRecord};

/// Result of asking to move a member onto a project. A rejection is an
/// expected outcome, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOutcome {
    Assigned(Member),
    Rejected(AssignmentRejection),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRejection {
    pub member_id: MemberId,
    pub on_holidays_till: NaiveDate,
}

impl AssignmentRejection {
    pub fn reason(&self) -> String {
        format!(
            "Member is on holiday until {} and cannot be assigned to a project now",
            self.on_holidays_till
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentDecision {
    Assign,
    Reject(AssignmentRejection),
}

/// The assignment gate. Stores call this while holding whatever lock makes
/// the subsequent write atomic with the read of `member`.
pub fn decide_assignment(
    member: &MemberRecord,
    now: DateTime<Utc>,
) -> AssignmentDecision {
    match member.on_holidays_till {
        Some(until) if is_on_holiday(now.date_naive(), Some(until)) => {
            AssignmentDecision::Reject(AssignmentRejection {
                member_id: member.id,
                on_holidays_till: until,
            })
        }
        _ => AssignmentDecision::Assign,
    }
}
