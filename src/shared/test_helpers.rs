#![cfg(test)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::follows::models::FollowCounts;
use crate::features::follows::FollowRepository;
use crate::features::marketplace::models::{Listing, ListingCategory, NewListing};
use crate::features::marketplace::ListingRepository;
use crate::features::messages::models::Message;
use crate::features::messages::MessageRepository;
use crate::features::posts::models::Post;
use crate::features::posts::PostRepository;
use crate::features::profiles::models::{Profile, ProfileSummary, ProfileUpdate, TopFilm};
use crate::features::profiles::repositories::ProfileFilter;
use crate::features::profiles::ProfileRepository;
use crate::features::projects::models::{NewProject, Project, ProjectFilter};
use crate::features::projects::ProjectRepository;

/// In-memory stand-in for every repository, for service and route tests.
///
/// `set_unavailable(true)` makes every call fail like a dropped database
/// connection. `set_profiles_unavailable` and `set_messages_unavailable`
/// do so for one table only.
#[derive(Default)]
pub struct InMemoryStore {
    profiles: Mutex<Vec<Profile>>,
    follows: Mutex<Vec<(Uuid, Uuid)>>,
    posts: Mutex<Vec<Post>>,
    messages: Mutex<Vec<Message>>,
    projects: Mutex<Vec<Project>>,
    listings: Mutex<Vec<Listing>>,
    unavailable: AtomicBool,
    profiles_unavailable: AtomicBool,
    messages_unavailable: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

fn contains_ci(haystack: &str, needle: &Option<String>) -> bool {
    match needle.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
        None => true,
    }
}

fn summary_of(profile: &Profile) -> ProfileSummary {
    ProfileSummary {
        id: profile.id,
        full_name: profile.full_name.clone(),
        handle: profile.handle.clone(),
    }
}

impl InMemoryStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_profiles_unavailable(&self, unavailable: bool) {
        self.profiles_unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_messages_unavailable(&self, unavailable: bool) {
        self.messages_unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn check_table(&self, table_unavailable: &AtomicBool) -> Result<()> {
        self.check()?;
        if table_unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub fn push_follow(&self, follower_id: Uuid, followee_id: Uuid) {
        lock(&self.follows).push((follower_id, followee_id));
    }

    pub fn push_post(&self, author_id: Uuid, body: &str, created_at: DateTime<Utc>) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            body: body.to_string(),
            created_at,
        };
        lock(&self.posts).push(post.clone());
        post
    }

    pub fn push_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Message {
        let message = Message {
            id: Uuid::new_v4(),
            sender_id,
            recipient_id,
            body: body.to_string(),
            created_at,
        };
        lock(&self.messages).push(message.clone());
        message
    }

    pub fn message_count(&self) -> usize {
        lock(&self.messages).len()
    }

    /// Stores a minimal project posting
    pub fn push_project(
        &self,
        created_by: Uuid,
        title: &str,
        role_needed: &str,
        created_at: DateTime<Utc>,
    ) -> Project {
        let project = Project {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("{} needs crew", title),
            role_needed: role_needed.to_string(),
            location: "Los Angeles, CA".to_string(),
            pay_status: None,
            min_day_rate: None,
            max_day_rate: None,
            start_date: None,
            end_date: None,
            project_type: None,
            genre: None,
            budget_range: None,
            crew_size: None,
            requirements: Vec::new(),
            created_by,
            created_at,
            updated_at: created_at,
        };
        lock(&self.projects).push(project.clone());
        project
    }

    pub fn projects(&self) -> Vec<Project> {
        lock(&self.projects).clone()
    }

    pub fn push_listing(
        &self,
        created_by: Uuid,
        category: ListingCategory,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> Listing {
        let listing = Listing {
            id: Uuid::new_v4(),
            category,
            title: title.to_string(),
            description: format!("{} for rent", title),
            rate: "$100/day".to_string(),
            location: "Atlanta, GA".to_string(),
            photos: Vec::new(),
            created_by,
            created_at,
            updated_at: created_at,
        };
        lock(&self.listings).push(listing.clone());
        listing
    }
}

fn contains_opt(haystack: Option<&str>, needle: &Option<String>) -> bool {
    match needle {
        Some(_) => haystack.is_some_and(|h| contains_ci(h, needle)),
        None => true,
    }
}

/// Mirrors the WHERE clause of the Postgres project query
fn project_matches(filter: &ProjectFilter, project: &Project) -> bool {
    let query_matches = filter.query.is_none()
        || contains_ci(&project.title, &filter.query)
        || contains_ci(&project.description, &filter.query)
        || contains_opt(project.genre.as_deref(), &filter.query);

    query_matches
        && contains_ci(&project.location, &filter.location)
        && filter
            .role_needed
            .as_ref()
            .map_or(true, |r| *r == project.role_needed)
        && filter
            .pay_status
            .as_ref()
            .map_or(true, |p| project.pay_status.as_ref() == Some(p))
        && filter
            .project_type
            .as_ref()
            .map_or(true, |t| project.project_type.as_ref() == Some(t))
        && filter
            .min_day_rate
            .map_or(true, |min| project.min_day_rate.is_some_and(|rate| rate >= min))
}

/// Inserts a profile with the given name and handle, returning its id
pub fn seed_profile(store: &Arc<InMemoryStore>, full_name: &str, handle: &str) -> Uuid {
    let now = Utc::now();
    let id = Uuid::new_v4();
    lock(&store.profiles).push(Profile {
        id,
        full_name: full_name.to_string(),
        handle: Some(handle.to_string()),
        role: "Crew".to_string(),
        bio: None,
        location: None,
        skills: Vec::new(),
        top_films: Json(Vec::new()),
        rating: None,
        ratings_count: 0,
        created_at: now,
        updated_at: now,
    });
    id
}

/// Wraps `router` so every request is authenticated as `user_id`
pub fn with_user(router: Router, user_id: Uuid) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| async move {
            request
                .extensions_mut()
                .insert(AuthenticatedUser::new(user_id));
            next.run(request).await
        },
    ))
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        self.check_table(&self.profiles_unavailable)?;
        Ok(lock(&self.profiles).iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>> {
        self.check_table(&self.profiles_unavailable)?;
        Ok(lock(&self.profiles)
            .iter()
            .find(|p| p.handle.as_deref() == Some(handle))
            .cloned())
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<ProfileSummary>> {
        self.check_table(&self.profiles_unavailable)?;
        Ok(lock(&self.profiles)
            .iter()
            .find(|p| p.id == id)
            .map(summary_of))
    }

    async fn find_summaries(&self, ids: &[Uuid]) -> Result<Vec<ProfileSummary>> {
        self.check_table(&self.profiles_unavailable)?;
        Ok(lock(&self.profiles)
            .iter()
            .filter(|p| ids.contains(&p.id))
            .map(summary_of)
            .collect())
    }

    async fn is_handle_taken(&self, handle: &str, exclude_id: Uuid) -> Result<bool> {
        self.check_table(&self.profiles_unavailable)?;
        Ok(lock(&self.profiles)
            .iter()
            .any(|p| p.id != exclude_id && p.handle.as_deref() == Some(handle)))
    }

    async fn upsert(&self, id: Uuid, update: &ProfileUpdate) -> Result<Profile> {
        self.check_table(&self.profiles_unavailable)?;
        let mut profiles = lock(&self.profiles);

        if profiles
            .iter()
            .any(|p| p.id != id && p.handle.as_deref() == Some(update.handle.as_str()))
        {
            return Err(AppError::Conflict("Handle is already taken".to_string()));
        }

        let now = Utc::now();
        let index = match profiles.iter().position(|p| p.id == id) {
            Some(index) => index,
            None => {
                profiles.push(Profile {
                    id,
                    full_name: String::new(),
                    handle: None,
                    role: String::new(),
                    bio: None,
                    location: None,
                    skills: Vec::new(),
                    top_films: Json(Vec::new()),
                    rating: None,
                    ratings_count: 0,
                    created_at: now,
                    updated_at: now,
                });
                profiles.len() - 1
            }
        };

        let profile = &mut profiles[index];
        profile.full_name = update.full_name.clone();
        profile.handle = Some(update.handle.clone());
        profile.role = update.role.clone();
        profile.bio = update.bio.clone();
        profile.location = update.location.clone();
        profile.skills = update.skills.clone();
        profile.updated_at = now;
        Ok(profile.clone())
    }

    async fn update_top_films(&self, id: Uuid, films: &[TopFilm]) -> Result<Option<Profile>> {
        self.check_table(&self.profiles_unavailable)?;
        let mut profiles = lock(&self.profiles);
        Ok(profiles.iter_mut().find(|p| p.id == id).map(|profile| {
            profile.top_films = Json(films.to_vec());
            profile.updated_at = Utc::now();
            profile.clone()
        }))
    }

    async fn search(
        &self,
        filter: &ProfileFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Profile>, i64)> {
        self.check_table(&self.profiles_unavailable)?;
        let mut matches: Vec<Profile> = lock(&self.profiles)
            .iter()
            .filter(|p| {
                (contains_ci(&p.full_name, &filter.query)
                    || contains_ci(p.handle.as_deref().unwrap_or(""), &filter.query))
                    && contains_ci(&p.role, &filter.role)
                    && contains_ci(p.location.as_deref().unwrap_or(""), &filter.location)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));

        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn insert(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        self.check()?;
        let mut follows = lock(&self.follows);
        if follows.contains(&(follower_id, followee_id)) {
            return Ok(false);
        }
        follows.push((follower_id, followee_id));
        Ok(true)
    }

    async fn delete(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        self.check()?;
        let mut follows = lock(&self.follows);
        let before = follows.len();
        follows.retain(|edge| *edge != (follower_id, followee_id));
        Ok(follows.len() < before)
    }

    async fn exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        self.check()?;
        Ok(lock(&self.follows).contains(&(follower_id, followee_id)))
    }

    async fn followee_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>> {
        self.check()?;
        Ok(lock(&self.follows)
            .iter()
            .filter(|(follower, _)| *follower == follower_id)
            .map(|(_, followee)| *followee)
            .collect())
    }

    async fn follower_ids(&self, followee_id: Uuid) -> Result<Vec<Uuid>> {
        self.check()?;
        Ok(lock(&self.follows)
            .iter()
            .filter(|(_, followee)| *followee == followee_id)
            .map(|(follower, _)| *follower)
            .collect())
    }

    async fn counts(&self, user_id: Uuid) -> Result<FollowCounts> {
        self.check()?;
        let follows = lock(&self.follows);
        Ok(FollowCounts {
            followers: follows.iter().filter(|(_, f)| *f == user_id).count() as i64,
            following: follows.iter().filter(|(f, _)| *f == user_id).count() as i64,
        })
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, author_id: Uuid, body: &str) -> Result<Post> {
        self.check()?;
        Ok(self.push_post(author_id, body, Utc::now()))
    }

    async fn list_by_author(&self, author_id: Uuid, limit: i64) -> Result<Vec<Post>> {
        self.list_by_authors(&[author_id], limit).await
    }

    async fn list_by_authors(&self, author_ids: &[Uuid], limit: i64) -> Result<Vec<Post>> {
        self.check()?;
        let mut posts: Vec<Post> = lock(&self.posts)
            .iter()
            .filter(|p| author_ids.contains(&p.author_id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit.max(0) as usize);
        Ok(posts)
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn list_involving(&self, user_id: Uuid) -> Result<Vec<Message>> {
        self.check_table(&self.messages_unavailable)?;
        let mut messages: Vec<Message> = lock(&self.messages)
            .iter()
            .filter(|m| m.sender_id == user_id || m.recipient_id == user_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }

    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>> {
        self.check_table(&self.messages_unavailable)?;
        let mut messages: Vec<Message> = lock(&self.messages)
            .iter()
            .filter(|m| {
                (m.sender_id == a && m.recipient_id == b)
                    || (m.sender_id == b && m.recipient_id == a)
            })
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn insert(&self, sender_id: Uuid, recipient_id: Uuid, body: &str) -> Result<Message> {
        self.check_table(&self.messages_unavailable)?;
        Ok(self.push_message(sender_id, recipient_id, body, Utc::now()))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn insert(&self, created_by: Uuid, project: &NewProject) -> Result<Project> {
        self.check()?;
        let now = Utc::now();
        let stored = Project {
            id: Uuid::new_v4(),
            title: project.title.clone(),
            description: project.description.clone(),
            role_needed: project.role_needed.clone(),
            location: project.location.clone(),
            pay_status: project.pay_status.clone(),
            min_day_rate: project.min_day_rate,
            max_day_rate: project.max_day_rate,
            start_date: project.start_date,
            end_date: project.end_date,
            project_type: project.project_type.clone(),
            genre: project.genre.clone(),
            budget_range: project.budget_range.clone(),
            crew_size: project.crew_size,
            requirements: project.requirements.clone(),
            created_by,
            created_at: now,
            updated_at: now,
        };
        lock(&self.projects).push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        self.check()?;
        Ok(lock(&self.projects).iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, filter: &ProjectFilter, limit: i64) -> Result<Vec<Project>> {
        self.check()?;
        let mut projects: Vec<Project> = lock(&self.projects)
            .iter()
            .filter(|p| project_matches(filter, p))
            .cloned()
            .collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        projects.truncate(limit.max(0) as usize);
        Ok(projects)
    }
}

#[async_trait]
impl ListingRepository for InMemoryStore {
    async fn insert(&self, created_by: Uuid, listing: &NewListing) -> Result<Listing> {
        self.check()?;
        let now = Utc::now();
        let stored = Listing {
            id: Uuid::new_v4(),
            category: listing.category,
            title: listing.title.clone(),
            description: listing.description.clone(),
            rate: listing.rate.clone(),
            location: listing.location.clone(),
            photos: listing.photos.clone(),
            created_by,
            created_at: now,
            updated_at: now,
        };
        lock(&self.listings).push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>> {
        self.check()?;
        Ok(lock(&self.listings).iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self, category: Option<ListingCategory>, limit: i64) -> Result<Vec<Listing>> {
        self.check()?;
        let mut listings: Vec<Listing> = lock(&self.listings)
            .iter()
            .filter(|l| category.map_or(true, |c| l.category == c))
            .cloned()
            .collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listings.truncate(limit.max(0) as usize);
        Ok(listings)
    }
}
