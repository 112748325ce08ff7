use std::sync::Arc;

use uuid::Uuid;

use super::send_validator::validate_message_body;
use super::thread_aggregator::aggregate_threads;
use crate::core::error::{swallow_backend_error, AppError, Result};
use crate::features::auth::session::Session;
use crate::features::messages::dtos::{MessageDto, SendMessageDto, ThreadDetailDto, ThreadDto};
use crate::features::messages::repositories::MessageRepository;
use crate::features::profiles::ProfileRepository;
use crate::modules::invalidation::ViewInvalidator;
use crate::shared::constants::MESSAGES_VIEW;

/// Service for direct messaging
pub struct MessageService {
    messages: Arc<dyn MessageRepository>,
    profiles: Arc<dyn ProfileRepository>,
    invalidator: Arc<ViewInvalidator>,
}

impl MessageService {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        profiles: Arc<dyn ProfileRepository>,
        invalidator: Arc<ViewInvalidator>,
    ) -> Self {
        Self {
            messages,
            profiles,
            invalidator,
        }
    }

    /// Thread summaries for the current user, most recent first.
    ///
    /// Anonymous sessions and an unreachable message store both yield an
    /// empty list.
    pub async fn list_threads(&self, session: &Session) -> Result<Vec<ThreadDto>> {
        let Some(user_id) = session.user_id() else {
            return Ok(Vec::new());
        };

        let messages = swallow_backend_error(
            self.messages.list_involving(user_id).await,
            "Failed to load message threads",
        )?;
        if messages.is_empty() {
            return Ok(Vec::new());
        }

        let mut counterpart_ids: Vec<Uuid> = messages
            .iter()
            .filter_map(|m| m.counterpart_of(user_id))
            .collect();
        counterpart_ids.sort_unstable();
        counterpart_ids.dedup();

        let profiles = self.profiles.summaries_by_id(&counterpart_ids).await;

        Ok(aggregate_threads(user_id, &messages, &profiles))
    }

    /// The counterpart's display profile and every message exchanged with
    /// them, oldest first.
    ///
    /// An unreachable profile store reads as an unknown counterpart, and an
    /// unreachable message store as an empty history.
    pub async fn get_thread_with(
        &self,
        session: &Session,
        counterpart_id: Uuid,
    ) -> Result<ThreadDetailDto> {
        let user = session.require_user()?;

        let counterpart = swallow_backend_error(
            self.profiles.find_summary(counterpart_id).await,
            "Failed to load thread counterpart",
        )?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let messages = swallow_backend_error(
            self.messages.list_between(user.user_id, counterpart_id).await,
            "Failed to load thread history",
        )?;

        Ok(ThreadDetailDto {
            counterpart: counterpart.into(),
            messages: messages.into_iter().map(Into::into).collect(),
        })
    }

    /// Validates and stores a message from the current user, then
    /// invalidates the messages view for both participants
    pub async fn send_message(&self, session: &Session, dto: &SendMessageDto) -> Result<MessageDto> {
        let user = session.require_user()?;
        let body = validate_message_body(&dto.body)?;

        if dto.recipient_id == user.user_id {
            return Err(AppError::Validation(
                "You cannot send a message to yourself".to_string(),
            ));
        }

        if self.profiles.find_summary(dto.recipient_id).await?.is_none() {
            return Err(AppError::NotFound("Recipient not found".to_string()));
        }

        let message = self
            .messages
            .insert(user.user_id, dto.recipient_id, body)
            .await?;

        tracing::info!(
            "Message {} sent from {} to {}",
            message.id,
            message.sender_id,
            message.recipient_id
        );
        self.invalidator
            .invalidate(MESSAGES_VIEW, vec![message.sender_id, message.recipient_id]);

        Ok(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::constants::MAX_MESSAGE_LENGTH;
    use crate::shared::test_helpers::{seed_profile, InMemoryStore};
    use chrono::{Duration, Utc};

    fn service(store: &Arc<InMemoryStore>) -> MessageService {
        MessageService::new(
            store.clone(),
            store.clone(),
            Arc::new(ViewInvalidator::default()),
        )
    }

    fn session(user_id: Uuid) -> Session {
        Session::from(AuthenticatedUser::new(user_id))
    }

    fn send(recipient_id: Uuid, body: &str) -> SendMessageDto {
        SendMessageDto {
            recipient_id,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_threads_scenario() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        let t = Utc::now();
        store.push_message(a, b, "hi", t);
        store.push_message(b, a, "hey", t + Duration::seconds(1));
        store.push_message(a, b, "yo", t + Duration::seconds(2));

        let threads = service(&store).list_threads(&session(a)).await.unwrap();

        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].counterpart_id, b);
        assert_eq!(threads[0].counterpart_name, "Ben Ortiz");
        assert_eq!(threads[0].last_message_body, "yo");
        assert_eq!(threads[0].last_message_time, t + Duration::seconds(2));
        assert_eq!(threads[0].unread_count, 1);
    }

    #[tokio::test]
    async fn test_list_threads_empty_cases() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let service = service(&store);

        assert!(service.list_threads(&Session::anonymous()).await.unwrap().is_empty());
        assert!(service.list_threads(&session(a)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_threads_swallows_backend_failure() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        store.push_message(a, b, "hi", Utc::now());
        store.set_unavailable(true);

        let threads = service(&store).list_threads(&session(a)).await.unwrap();
        assert!(threads.is_empty());
    }

    #[tokio::test]
    async fn test_send_message_stores_trimmed_body_and_invalidates() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        let invalidator = Arc::new(ViewInvalidator::default());
        let mut rx = invalidator.subscribe();
        let service = MessageService::new(store.clone(), store.clone(), invalidator.clone());

        let message = service
            .send_message(&session(a), &send(b, "  call time is 6am  "))
            .await
            .unwrap();

        assert_eq!(message.body, "call time is 6am");
        assert_eq!(message.sender_id, a);
        assert_eq!(message.recipient_id, b);
        assert_eq!(store.message_count(), 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, MESSAGES_VIEW);
        assert!(event.concerns(a) && event.concerns(b));
    }

    #[tokio::test]
    async fn test_send_message_validation_order() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        let service = service(&store);

        let err = service
            .send_message(&Session::anonymous(), &send(b, "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Authentication required");

        let err = service
            .send_message(&session(a), &send(b, "   "))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Message cannot be empty.");

        let err = service
            .send_message(&session(a), &send(b, &"x".repeat(MAX_MESSAGE_LENGTH + 1)))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Message too long (max 1000 characters)");

        service
            .send_message(&session(a), &send(b, &"x".repeat(MAX_MESSAGE_LENGTH)))
            .await
            .unwrap();

        let err = service
            .send_message(&session(a), &send(a, "note to self"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(store.message_count(), 1);
    }

    #[tokio::test]
    async fn test_send_to_unknown_recipient_inserts_nothing() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");

        let err = service(&store)
            .send_message(&session(a), &send(Uuid::new_v4(), "hello?"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.user_message(), "Recipient not found");
        assert_eq!(store.message_count(), 0);
    }

    #[tokio::test]
    async fn test_get_thread_with_returns_ascending_history() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        let c = seed_profile(&store, "Cal Diaz", "cal_d");
        let t = Utc::now();
        store.push_message(b, a, "second", t + Duration::seconds(5));
        store.push_message(a, b, "first", t);
        store.push_message(a, c, "elsewhere", t + Duration::seconds(1));

        let detail = service(&store).get_thread_with(&session(a), b).await.unwrap();

        assert_eq!(detail.counterpart.id, b);
        assert_eq!(detail.counterpart.handle, "ben_o");
        let bodies: Vec<&str> = detail.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_list_threads_uses_placeholders_when_profiles_unreachable() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        let t = Utc::now();
        store.push_message(b, a, "wrap party?", t);
        store.push_message(a, b, "sure", t + Duration::seconds(1));
        store.set_profiles_unavailable(true);

        let threads = service(&store).list_threads(&session(a)).await.unwrap();

        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].counterpart_id, b);
        assert_eq!(threads[0].counterpart_name, "Unknown User");
        assert_eq!(threads[0].counterpart_handle, "unknown");
        assert_eq!(threads[0].last_message_body, "sure");
        assert_eq!(threads[0].unread_count, 1);
    }

    #[tokio::test]
    async fn test_get_thread_with_degrades_when_backend_unavailable() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let b = seed_profile(&store, "Ben Ortiz", "ben_o");
        store.push_message(a, b, "hi", Utc::now());
        let service = service(&store);

        store.set_profiles_unavailable(true);
        let err = service.get_thread_with(&session(a), b).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        store.set_profiles_unavailable(false);
        store.set_messages_unavailable(true);
        let detail = service.get_thread_with(&session(a), b).await.unwrap();
        assert_eq!(detail.counterpart.handle, "ben_o");
        assert!(detail.messages.is_empty());

        store.set_messages_unavailable(false);
        store.set_unavailable(true);
        let err = service.get_thread_with(&session(a), b).await.unwrap_err();
        assert!(!err.is_backend_unavailable());
    }

    #[tokio::test]
    async fn test_get_thread_with_errors() {
        let store = Arc::new(InMemoryStore::default());
        let a = seed_profile(&store, "Ana Ruiz", "ana_r");
        let service = service(&store);

        let err = service
            .get_thread_with(&session(a), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service
            .get_thread_with(&Session::anonymous(), a)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
