//! Club entity model and DTOs.

use clubdir_core::club::{ClubFields, ClubRecord};
use clubdir_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `clubs` table.
#[derive(Debug, Clone, FromRow)]
pub struct Club {
    pub id: DbId,
    pub college_name: String,
    pub club_name: String,
    pub brief_description: String,
    pub club_advisor: String,
    pub meeting_schedule: String,
    pub meeting_location: String,
    pub meeting_time: String,
    pub website: String,
    pub contact_email: String,
    pub phone_number: String,
    pub social_media_links: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Club> for ClubRecord {
    fn from(row: Club) -> Self {
        ClubRecord {
            id: row.id,
            fields: ClubFields {
                college_name: row.college_name,
                club_name: row.club_name,
                brief_description: row.brief_description,
                club_advisor: row.club_advisor,
                meeting_schedule: row.meeting_schedule,
                meeting_location: row.meeting_location,
                meeting_time: row.meeting_time,
                website: row.website,
                contact_email: row.contact_email,
                phone_number: row.phone_number,
                social_media_links: row.social_media_links,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for a partial club update. Only provided keys are changed.
///
/// Keys use the same column names as [`ClubFields`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClub {
    #[serde(rename = "College Name")]
    pub college_name: Option<String>,
    #[serde(rename = "Club Name")]
    pub club_name: Option<String>,
    #[serde(rename = "Brief Description")]
    pub brief_description: Option<String>,
    #[serde(rename = "Club Advisor")]
    pub club_advisor: Option<String>,
    #[serde(rename = "Meeting Schedule")]
    pub meeting_schedule: Option<String>,
    #[serde(rename = "Club Meeting Location", alias = "Meeting Location")]
    pub meeting_location: Option<String>,
    #[serde(rename = "Club Meeting Time", alias = "Meeting Time")]
    pub meeting_time: Option<String>,
    #[serde(rename = "Club Website", alias = "Website")]
    pub website: Option<String>,
    #[serde(rename = "Contact Email of Club Coordinator/Leader", alias = "Contact Email")]
    pub contact_email: Option<String>,
    #[serde(rename = "Phone Number of Club Coordinator/Leader", alias = "Phone Number")]
    pub phone_number: Option<String>,
    #[serde(rename = "Social Media Links")]
    pub social_media_links: Option<String>,
}
