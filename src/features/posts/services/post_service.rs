use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{swallow_backend_error, AppError, Result};
use crate::features::auth::session::Session;
use crate::features::follows::FollowRepository;
use crate::features::posts::dtos::{FeedItemDto, PostResponseDto};
use crate::features::posts::repositories::PostRepository;
use crate::features::profiles::dtos::ProfileSummaryDto;
use crate::features::profiles::ProfileRepository;
use crate::modules::invalidation::ViewInvalidator;
use crate::shared::constants::{FEED_LIMIT, HOME_VIEW, MAX_POST_LENGTH};
use crate::shared::validation::char_len;

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    follows: Arc<dyn FollowRepository>,
    profiles: Arc<dyn ProfileRepository>,
    invalidator: Arc<ViewInvalidator>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        follows: Arc<dyn FollowRepository>,
        profiles: Arc<dyn ProfileRepository>,
        invalidator: Arc<ViewInvalidator>,
    ) -> Self {
        Self {
            posts,
            follows,
            profiles,
            invalidator,
        }
    }

    pub async fn create_post(&self, session: &Session, body: &str) -> Result<PostResponseDto> {
        let user = session.require_user()?;

        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::Validation("Post cannot be empty".to_string()));
        }
        if char_len(body) > MAX_POST_LENGTH {
            return Err(AppError::Validation(format!(
                "Post cannot exceed {} characters",
                MAX_POST_LENGTH
            )));
        }

        let post = self.posts.insert(user.user_id, body).await?;
        tracing::info!("Post {} created by {}", post.id, user.user_id);

        let mut audience = swallow_backend_error(
            self.follows.follower_ids(user.user_id).await,
            "Failed to load followers for feed invalidation",
        )?;
        audience.push(user.user_id);
        self.invalidator.invalidate(HOME_VIEW, audience);

        Ok(post.into())
    }

    /// Latest posts of one author; an unreachable backend yields an empty list
    pub async fn list_user_posts(&self, author_id: Uuid) -> Result<Vec<PostResponseDto>> {
        let posts = swallow_backend_error(
            self.posts.list_by_author(author_id, FEED_LIMIT).await,
            "Failed to load user posts",
        )?;

        Ok(posts.into_iter().map(Into::into).collect())
    }

    /// Latest posts by everyone the current user follows.
    ///
    /// Anonymous sessions and users following nobody get an empty feed.
    pub async fn followers_feed(&self, session: &Session) -> Result<Vec<FeedItemDto>> {
        let Some(user_id) = session.user_id() else {
            return Ok(Vec::new());
        };

        let followee_ids = swallow_backend_error(
            self.follows.followee_ids(user_id).await,
            "Failed to load followees",
        )?;
        if followee_ids.is_empty() {
            return Ok(Vec::new());
        }

        let posts = swallow_backend_error(
            self.posts.list_by_authors(&followee_ids, FEED_LIMIT).await,
            "Failed to load feed posts",
        )?;

        let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self.profiles.summaries_by_id(&author_ids).await;

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = authors
                    .get(&post.author_id)
                    .cloned()
                    .map(ProfileSummaryDto::from)
                    .unwrap_or_else(|| ProfileSummaryDto::placeholder(post.author_id));
                post.into_feed_item(author)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{seed_profile, InMemoryStore};
    use chrono::{Duration, Utc};

    fn service(store: &Arc<InMemoryStore>) -> PostService {
        PostService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(ViewInvalidator::default()),
        )
    }

    #[tokio::test]
    async fn test_create_post_trims_and_validates() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let session = Session::from(AuthenticatedUser::new(me));
        let service = service(&store);

        let post = service.create_post(&session, "  wrapped day 12  ").await.unwrap();
        assert_eq!(post.body, "wrapped day 12");
        assert_eq!(post.author_id, me);

        let err = service.create_post(&session, " \n ").await.unwrap_err();
        assert_eq!(err.user_message(), "Post cannot be empty");

        let err = service
            .create_post(&session, &"x".repeat(MAX_POST_LENGTH + 1))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Post cannot exceed 1000 characters");

        let err = service
            .create_post(&Session::anonymous(), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_create_post_invalidates_home_for_followers() {
        let store = Arc::new(InMemoryStore::default());
        let author = seed_profile(&store, "Ana Ruiz", "ana_r");
        let fan = seed_profile(&store, "Ben Ortiz", "ben_o");
        store.push_follow(fan, author);

        let invalidator = Arc::new(ViewInvalidator::default());
        let mut rx = invalidator.subscribe();
        let service = PostService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            invalidator.clone(),
        );

        service
            .create_post(&Session::from(AuthenticatedUser::new(author)), "casting now")
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, HOME_VIEW);
        assert!(event.concerns(fan));
        assert!(event.concerns(author));
    }

    #[tokio::test]
    async fn test_feed_is_newest_first_and_only_followees() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let followed = seed_profile(&store, "Ben Ortiz", "ben_o");
        let stranger = seed_profile(&store, "Cal Diaz", "cal_d");
        store.push_follow(me, followed);

        let now = Utc::now();
        store.push_post(followed, "older", now - Duration::minutes(10));
        store.push_post(followed, "newer", now);
        store.push_post(stranger, "not for me", now);

        let feed = service(&store)
            .followers_feed(&Session::from(AuthenticatedUser::new(me)))
            .await
            .unwrap();

        let bodies: Vec<&str> = feed.iter().map(|item| item.body.as_str()).collect();
        assert_eq!(bodies, vec!["newer", "older"]);
        assert_eq!(feed[0].author.handle, "ben_o");
    }

    #[tokio::test]
    async fn test_feed_empty_for_anonymous_and_lonely_users() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let service = service(&store);

        assert!(service
            .followers_feed(&Session::anonymous())
            .await
            .unwrap()
            .is_empty());
        assert!(service
            .followers_feed(&Session::from(AuthenticatedUser::new(me)))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_feed_uses_placeholder_for_unknown_author() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let ghost = Uuid::new_v4();
        store.push_follow(me, ghost);
        store.push_post(ghost, "from beyond", Utc::now());

        let feed = service(&store)
            .followers_feed(&Session::from(AuthenticatedUser::new(me)))
            .await
            .unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].author, ProfileSummaryDto::placeholder(ghost));
    }

    #[tokio::test]
    async fn test_user_posts_swallow_backend_failure() {
        let store = Arc::new(InMemoryStore::default());
        let author = seed_profile(&store, "Ana Ruiz", "ana_r");
        store.push_post(author, "hello", Utc::now());
        store.set_unavailable(true);

        let posts = service(&store).list_user_posts(author).await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_user_posts_capped_at_feed_limit() {
        let store = Arc::new(InMemoryStore::default());
        let author = seed_profile(&store, "Ana Ruiz", "ana_r");
        let now = Utc::now();
        for i in 0..(FEED_LIMIT + 5) {
            store.push_post(author, &format!("post {}", i), now + Duration::seconds(i));
        }

        let posts = service(&store).list_user_posts(author).await.unwrap();
        assert_eq!(posts.len() as i64, FEED_LIMIT);
        assert_eq!(posts[0].body, format!("post {}", FEED_LIMIT + 4));
    }
}
