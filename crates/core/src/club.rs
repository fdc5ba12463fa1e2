//! Club record types and the upload schema's field catalogue.
//!
//! The eleven club fields travel under the column names of the bulk-upload
//! spreadsheet ("College Name", "Club Meeting Location", ...). The same
//! names are used as JSON keys, so a duplicate reported by an upload can be
//! written back out as a CSV with the exact header an operator uploaded.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Field catalogue
// ---------------------------------------------------------------------------

/// One of the eleven user-editable club fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClubField {
    CollegeName,
    ClubName,
    BriefDescription,
    ClubAdvisor,
    MeetingSchedule,
    MeetingLocation,
    MeetingTime,
    Website,
    ContactEmail,
    PhoneNumber,
    SocialMediaLinks,
}

/// Fields that must be non-empty for a club to be stored.
pub const REQUIRED_FIELDS: &[ClubField] = &[ClubField::CollegeName, ClubField::ClubName];

impl ClubField {
    /// All fields in upload-schema column order.
    pub const ALL: [ClubField; 11] = [
        Self::CollegeName,
        Self::ClubName,
        Self::BriefDescription,
        Self::ClubAdvisor,
        Self::MeetingSchedule,
        Self::MeetingLocation,
        Self::MeetingTime,
        Self::Website,
        Self::ContactEmail,
        Self::PhoneNumber,
        Self::SocialMediaLinks,
    ];

    /// Canonical column header (and JSON key) for this field.
    pub fn header(&self) -> &'static str {
        match self {
            Self::CollegeName => "College Name",
            Self::ClubName => "Club Name",
            Self::BriefDescription => "Brief Description",
            Self::ClubAdvisor => "Club Advisor",
            Self::MeetingSchedule => "Meeting Schedule",
            Self::MeetingLocation => "Club Meeting Location",
            Self::MeetingTime => "Club Meeting Time",
            Self::Website => "Club Website",
            Self::ContactEmail => "Contact Email of Club Coordinator/Leader",
            Self::PhoneNumber => "Phone Number of Club Coordinator/Leader",
            Self::SocialMediaLinks => "Social Media Links",
        }
    }

    /// Resolve an upload column header to a field.
    ///
    /// Accepts the canonical header and the short form of the five long
    /// headers (e.g. "Website" for "Club Website"). Matching is exact and
    /// case-sensitive. Returns `None` for columns the directory does not store.
    pub fn from_header(header: &str) -> Option<Self> {
        let field = match header {
            "Meeting Location" => Self::MeetingLocation,
            "Meeting Time" => Self::MeetingTime,
            "Website" => Self::Website,
            "Contact Email" => Self::ContactEmail,
            "Phone Number" => Self::PhoneNumber,
            other => return Self::ALL.into_iter().find(|f| f.header() == other),
        };
        Some(field)
    }

    pub fn is_required(&self) -> bool {
        REQUIRED_FIELDS.contains(self)
    }
}

impl std::fmt::Display for ClubField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// The eleven field values of a club, keyed by upload-schema column name.
///
/// Absent keys deserialize to empty strings, and every key is always
/// serialized, so this is also the `RowObject` shape of upload reports.
/// The short header forms are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubFields {
    #[serde(rename = "College Name")]
    pub college_name: String,
    #[serde(rename = "Club Name")]
    pub club_name: String,
    #[serde(rename = "Brief Description")]
    pub brief_description: String,
    #[serde(rename = "Club Advisor")]
    pub club_advisor: String,
    #[serde(rename = "Meeting Schedule")]
    pub meeting_schedule: String,
    #[serde(rename = "Club Meeting Location", alias = "Meeting Location")]
    pub meeting_location: String,
    #[serde(rename = "Club Meeting Time", alias = "Meeting Time")]
    pub meeting_time: String,
    #[serde(rename = "Club Website", alias = "Website")]
    pub website: String,
    #[serde(rename = "Contact Email of Club Coordinator/Leader", alias = "Contact Email")]
    pub contact_email: String,
    #[serde(rename = "Phone Number of Club Coordinator/Leader", alias = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Social Media Links")]
    pub social_media_links: String,
}

impl ClubFields {
    pub fn get(&self, field: ClubField) -> &str {
        match field {
            ClubField::CollegeName => &self.college_name,
            ClubField::ClubName => &self.club_name,
            ClubField::BriefDescription => &self.brief_description,
            ClubField::ClubAdvisor => &self.club_advisor,
            ClubField::MeetingSchedule => &self.meeting_schedule,
            ClubField::MeetingLocation => &self.meeting_location,
            ClubField::MeetingTime => &self.meeting_time,
            ClubField::Website => &self.website,
            ClubField::ContactEmail => &self.contact_email,
            ClubField::PhoneNumber => &self.phone_number,
            ClubField::SocialMediaLinks => &self.social_media_links,
        }
    }

    pub fn set(&mut self, field: ClubField, value: String) {
        let slot = match field {
            ClubField::CollegeName => &mut self.college_name,
            ClubField::ClubName => &mut self.club_name,
            ClubField::BriefDescription => &mut self.brief_description,
            ClubField::ClubAdvisor => &mut self.club_advisor,
            ClubField::MeetingSchedule => &mut self.meeting_schedule,
            ClubField::MeetingLocation => &mut self.meeting_location,
            ClubField::MeetingTime => &mut self.meeting_time,
            ClubField::Website => &mut self.website,
            ClubField::ContactEmail => &mut self.contact_email,
            ClubField::PhoneNumber => &mut self.phone_number,
            ClubField::SocialMediaLinks => &mut self.social_media_links,
        };
        *slot = value;
    }

    /// The (College Name, Club Name) pair identifying the real-world club.
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(self.college_name.clone(), self.club_name.clone())
    }
}

/// The dedup key of a club. Compared exactly: no case folding and no
/// whitespace normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    pub college_name: String,
    pub club_name: String,
}

impl NaturalKey {
    pub fn new(college_name: impl Into<String>, club_name: impl Into<String>) -> Self {
        Self {
            college_name: college_name.into(),
            club_name: club_name.into(),
        }
    }
}

impl std::fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.college_name, self.club_name)
    }
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// A club as stored, with its store-assigned id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubRecord {
    pub id: DbId,
    #[serde(flatten)]
    pub fields: ClubFields,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}
