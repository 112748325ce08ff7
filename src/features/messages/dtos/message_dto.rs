use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::profiles::dtos::ProfileSummaryDto;

/// Summary of the conversation with one counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ThreadDto {
    pub counterpart_id: Uuid,
    pub counterpart_name: String,
    pub counterpart_handle: String,
    pub last_message_body: String,
    pub last_message_time: DateTime<Utc>,
    /// Every message ever received from the counterpart; there is no read
    /// state
    pub unread_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Counterpart plus the full history, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThreadDetailDto {
    pub counterpart: ProfileSummaryDto,
    pub messages: Vec<MessageDto>,
}

/// Request body for sending a message.
///
/// The body is validated after trimming, in the service.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendMessageDto {
    pub recipient_id: Uuid,
    pub body: String,
}
