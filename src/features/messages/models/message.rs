use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::messages::dtos::MessageDto;

/// Database model for a direct message
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// The other participant from `user_id`'s point of view, or `None`
    /// when the message does not involve `user_id`
    pub fn counterpart_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.sender_id == user_id {
            Some(self.recipient_id)
        } else if self.recipient_id == user_id {
            Some(self.sender_id)
        } else {
            None
        }
    }

    pub fn is_incoming_for(&self, user_id: Uuid) -> bool {
        self.recipient_id == user_id && self.sender_id != user_id
    }
}

impl From<Message> for MessageDto {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            sender_id: m.sender_id,
            recipient_id: m.recipient_id,
            body: m.body,
            created_at: m.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender_id: Uuid, recipient_id: Uuid) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id,
            recipient_id,
            body: "hi".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_counterpart_of() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let m = message(a, b);

        assert_eq!(m.counterpart_of(a), Some(b));
        assert_eq!(m.counterpart_of(b), Some(a));
        assert_eq!(m.counterpart_of(c), None);
    }

    #[test]
    fn test_is_incoming_for() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let m = message(a, b);

        assert!(m.is_incoming_for(b));
        assert!(!m.is_incoming_for(a));
        assert!(!message(a, a).is_incoming_for(a));
    }
}
