//! Required-field gate for ingested rows.

use super::normalize::IngestionRow;
use crate::club::{ClubField, ClubFields};

/// Why a row was turned away before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingRequiredField(ClubField),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredField(field) => write!(f, "missing required field '{field}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowVerdict {
    Valid(IngestionRow),
    Rejected {
        row: IngestionRow,
        reason: RejectReason,
    },
}

/// First required field that is empty (after trimming), if any.
pub fn missing_required_field(fields: &ClubFields) -> Option<ClubField> {
    ClubField::ALL
        .into_iter()
        .find(|field| field.is_required() && fields.get(*field).trim().is_empty())
}

/// Classify a row. Pure: never consults the store.
pub fn validate_row(row: IngestionRow) -> RowVerdict {
    match missing_required_field(&row.fields) {
        Some(field) => RowVerdict::Rejected {
            row,
            reason: RejectReason::MissingRequiredField(field),
        },
        None => RowVerdict::Valid(row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn row(college: &str, club: &str) -> IngestionRow {
        IngestionRow {
            line: 2,
            fields: ClubFields {
                college_name: college.into(),
                club_name: club.into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn both_required_fields_present_is_valid() {
        assert_matches!(validate_row(row("MIT-WPU", "Coding Club")), RowVerdict::Valid(_));
    }

    #[test]
    fn missing_college_is_rejected() {
        assert_matches!(
            validate_row(row("", "Chess Club")),
            RowVerdict::Rejected {
                reason: RejectReason::MissingRequiredField(ClubField::CollegeName),
                ..
            }
        );
    }

    #[test]
    fn missing_club_is_rejected() {
        assert_matches!(
            validate_row(row("COEP", "")),
            RowVerdict::Rejected {
                reason: RejectReason::MissingRequiredField(ClubField::ClubName),
                ..
            }
        );
    }

    #[test]
    fn first_missing_field_follows_column_order() {
        assert_eq!(
            missing_required_field(&row("", "").fields),
            Some(ClubField::CollegeName)
        );
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        assert_eq!(
            missing_required_field(&row("  ", "Chess").fields),
            Some(ClubField::CollegeName)
        );
    }

    #[test]
    fn optional_fields_may_all_be_empty() {
        let fields = row("A", "B").fields;
        assert_eq!(fields.website, "");
        assert_eq!(missing_required_field(&fields), None);
    }

    #[test]
    fn reason_names_the_field() {
        let reason = RejectReason::MissingRequiredField(ClubField::ClubName);
        assert_eq!(reason.to_string(), "missing required field 'Club Name'");
    }
}
