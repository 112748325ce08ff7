use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::session::Session;
use crate::features::follows::dtos::{FollowCountsDto, FollowResultDto, FollowStatusDto};
use crate::features::follows::repositories::FollowRepository;
use crate::features::profiles::ProfileRepository;
use crate::modules::invalidation::ViewInvalidator;

/// Service for follow / unfollow and follow lookups
pub struct FollowService {
    follows: Arc<dyn FollowRepository>,
    profiles: Arc<dyn ProfileRepository>,
    invalidator: Arc<ViewInvalidator>,
}

impl FollowService {
    pub fn new(
        follows: Arc<dyn FollowRepository>,
        profiles: Arc<dyn ProfileRepository>,
        invalidator: Arc<ViewInvalidator>,
    ) -> Self {
        Self {
            follows,
            profiles,
            invalidator,
        }
    }

    /// Follows `target`; following someone twice is not an error
    pub async fn follow(&self, session: &Session, target: Uuid) -> Result<FollowResultDto> {
        let user = session.require_user()?;

        if user.user_id == target {
            return Err(AppError::Validation("You cannot follow yourself".to_string()));
        }

        if self.profiles.find_summary(target).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let created = self.follows.insert(user.user_id, target).await?;
        if created {
            tracing::info!("User {} now follows {}", user.user_id, target);
            self.invalidate_profile_views(user.user_id, target);
        }

        Ok(FollowResultDto {
            followee_id: target,
            already_following: !created,
        })
    }

    pub async fn unfollow(&self, session: &Session, target: Uuid) -> Result<()> {
        let user = session.require_user()?;

        if self.follows.delete(user.user_id, target).await? {
            tracing::info!("User {} unfollowed {}", user.user_id, target);
            self.invalidate_profile_views(user.user_id, target);
        }

        Ok(())
    }

    /// Anonymous callers follow nobody
    pub async fn is_following(&self, session: &Session, target: Uuid) -> Result<FollowStatusDto> {
        let following = match session.user_id() {
            Some(user_id) => self.follows.exists(user_id, target).await?,
            None => false,
        };

        Ok(FollowStatusDto {
            followee_id: target,
            following,
        })
    }

    pub async fn counts(&self, user_id: Uuid) -> Result<FollowCountsDto> {
        Ok(self.follows.counts(user_id).await?.into())
    }

    fn invalidate_profile_views(&self, follower: Uuid, followee: Uuid) {
        self.invalidator
            .invalidate(format!("/u/{}", followee), vec![follower, followee]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{seed_profile, InMemoryStore};

    fn service(store: &Arc<InMemoryStore>) -> FollowService {
        FollowService::new(
            store.clone(),
            store.clone(),
            Arc::new(ViewInvalidator::default()),
        )
    }

    #[tokio::test]
    async fn test_follow_twice_reports_already_following() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana", "ana_r");
        let target = seed_profile(&store, "Ben", "ben_o");
        let session = Session::from(AuthenticatedUser::new(me));
        let service = service(&store);

        let first = service.follow(&session, target).await.unwrap();
        assert!(!first.already_following);

        let second = service.follow(&session, target).await.unwrap();
        assert!(second.already_following);

        let counts = service.counts(target).await.unwrap();
        assert_eq!(counts.followers, 1);
        assert_eq!(counts.following, 0);
    }

    #[tokio::test]
    async fn test_follow_rejects_self_and_unknown_users() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana", "ana_r");
        let session = Session::from(AuthenticatedUser::new(me));
        let service = service(&store);

        let err = service.follow(&session, me).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service.follow(&session, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unfollow_and_status() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana", "ana_r");
        let target = seed_profile(&store, "Ben", "ben_o");
        let session = Session::from(AuthenticatedUser::new(me));
        let service = service(&store);

        service.follow(&session, target).await.unwrap();
        assert!(service.is_following(&session, target).await.unwrap().following);

        service.unfollow(&session, target).await.unwrap();
        assert!(!service.is_following(&session, target).await.unwrap().following);

        // Unfollowing again is harmless
        service.unfollow(&session, target).await.unwrap();
    }

    #[tokio::test]
    async fn test_anonymous_follow_status_is_false() {
        let store = Arc::new(InMemoryStore::default());
        let target = seed_profile(&store, "Ben", "ben_o");
        let status = service(&store)
            .is_following(&Session::anonymous(), target)
            .await
            .unwrap();
        assert!(!status.following);

        let err = service(&store)
            .follow(&Session::anonymous(), target)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
