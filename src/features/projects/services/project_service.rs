use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{swallow_backend_error, AppError, Result};
use crate::features::auth::session::Session;
use crate::features::projects::dtos::{CreateProjectDto, ProjectResponseDto};
use crate::features::projects::models::{NewProject, ProjectFilter};
use crate::features::projects::repositories::ProjectRepository;
use crate::modules::invalidation::ViewInvalidator;
use crate::shared::constants::{LISTING_LIMIT, PROJECTS_VIEW};
use crate::shared::validation::non_blank;

pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    invalidator: Arc<ViewInvalidator>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>, invalidator: Arc<ViewInvalidator>) -> Self {
        Self {
            projects,
            invalidator,
        }
    }

    /// The newest postings matching `filter`; an unreachable backend yields
    /// an empty board
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectResponseDto>> {
        let projects = swallow_backend_error(
            self.projects.list(filter, LISTING_LIMIT).await,
            "Failed to load projects",
        )?;

        Ok(projects.into_iter().map(Into::into).collect())
    }

    pub async fn get_project(&self, id: Uuid) -> Result<ProjectResponseDto> {
        swallow_backend_error(self.projects.find_by_id(id).await, "Failed to load project")?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    pub async fn create_project(
        &self,
        session: &Session,
        dto: CreateProjectDto,
    ) -> Result<ProjectResponseDto> {
        let user = session.require_user()?;
        let project = sanitize_new_project(dto)?;

        let project = self.projects.insert(user.user_id, &project).await?;
        tracing::info!("Project {} posted by {}", project.id, user.user_id);

        self.invalidator.invalidate_all(PROJECTS_VIEW);

        Ok(project.into())
    }
}

/// Applies the required-field rules in order, then trims values
fn sanitize_new_project(dto: CreateProjectDto) -> Result<NewProject> {
    if dto.title.trim().is_empty() {
        return Err(AppError::Validation("Project title is required".to_string()));
    }
    if dto.description.trim().is_empty() {
        return Err(AppError::Validation(
            "Project description is required".to_string(),
        ));
    }
    if dto.role_needed.trim().is_empty() {
        return Err(AppError::Validation("Role needed is required".to_string()));
    }
    if dto.location.trim().is_empty() {
        return Err(AppError::Validation("Location is required".to_string()));
    }

    if let (Some(min), Some(max)) = (dto.min_day_rate, dto.max_day_rate) {
        if min > max {
            return Err(AppError::Validation(
                "Minimum day rate cannot exceed maximum day rate".to_string(),
            ));
        }
    }
    if let (Some(start), Some(end)) = (dto.start_date, dto.end_date) {
        if end < start {
            return Err(AppError::Validation(
                "End date cannot be before start date".to_string(),
            ));
        }
    }

    let requirements = dto
        .requirements
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    Ok(NewProject {
        title: dto.title.trim().to_string(),
        description: dto.description.trim().to_string(),
        role_needed: dto.role_needed.trim().to_string(),
        location: dto.location.trim().to_string(),
        pay_status: non_blank(dto.pay_status),
        min_day_rate: dto.min_day_rate,
        max_day_rate: dto.max_day_rate,
        start_date: dto.start_date,
        end_date: dto.end_date,
        project_type: non_blank(dto.project_type),
        genre: non_blank(dto.genre),
        budget_range: non_blank(dto.budget_range),
        crew_size: dto.crew_size,
        requirements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{seed_profile, InMemoryStore};
    use chrono::{Duration, NaiveDate, Utc};

    fn dto(title: &str, description: &str, role: &str, location: &str) -> CreateProjectDto {
        CreateProjectDto {
            title: title.to_string(),
            description: description.to_string(),
            role_needed: role.to_string(),
            location: location.to_string(),
            pay_status: None,
            min_day_rate: None,
            max_day_rate: None,
            start_date: None,
            end_date: None,
            project_type: None,
            genre: None,
            budget_range: None,
            crew_size: None,
            requirements: None,
        }
    }

    fn service(store: &Arc<InMemoryStore>) -> ProjectService {
        ProjectService::new(store.clone(), Arc::new(ViewInvalidator::default()))
    }

    #[test]
    fn test_sanitize_rejects_missing_fields_in_order() {
        let cases = [
            (dto(" ", "", "", ""), "Project title is required"),
            (dto("Night Shoot", "", "", ""), "Project description is required"),
            (dto("Night Shoot", "Indie short", " ", ""), "Role needed is required"),
            (dto("Night Shoot", "Indie short", "Gaffer", ""), "Location is required"),
        ];

        for (dto, expected) in cases {
            let err = sanitize_new_project(dto).unwrap_err();
            assert_eq!(err.user_message(), expected);
        }
    }

    #[test]
    fn test_sanitize_trims_and_defaults() {
        let mut input = dto("  Night Shoot ", " Indie short ", " Gaffer ", " Austin, TX ");
        input.genre = Some("   ".to_string());
        input.pay_status = Some(" paid ".to_string());
        input.requirements = Some(vec![" Own truck ".to_string(), "  ".to_string()]);

        let project = sanitize_new_project(input).unwrap();
        assert_eq!(project.title, "Night Shoot");
        assert_eq!(project.description, "Indie short");
        assert_eq!(project.role_needed, "Gaffer");
        assert_eq!(project.location, "Austin, TX");
        assert_eq!(project.genre, None);
        assert_eq!(project.pay_status.as_deref(), Some("paid"));
        assert_eq!(project.requirements, vec!["Own truck".to_string()]);

        let project = sanitize_new_project(dto("a", "b", "c", "d")).unwrap();
        assert!(project.requirements.is_empty());
    }

    #[test]
    fn test_sanitize_checks_rate_and_date_ranges() {
        let mut input = dto("a", "b", "c", "d");
        input.min_day_rate = Some(900);
        input.max_day_rate = Some(500);
        let err = sanitize_new_project(input).unwrap_err();
        assert_eq!(
            err.user_message(),
            "Minimum day rate cannot exceed maximum day rate"
        );

        let mut input = dto("a", "b", "c", "d");
        input.start_date = NaiveDate::from_ymd_opt(2025, 6, 10);
        input.end_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        let err = sanitize_new_project(input).unwrap_err();
        assert_eq!(err.user_message(), "End date cannot be before start date");
    }

    #[tokio::test]
    async fn test_create_project_requires_session() {
        let store = Arc::new(InMemoryStore::default());
        let err = service(&store)
            .create_project(&Session::anonymous(), dto("a", "b", "c", "d"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(store.projects().is_empty());
    }

    #[tokio::test]
    async fn test_create_project_invalidates_board_for_everyone() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let invalidator = Arc::new(ViewInvalidator::default());
        let mut rx = invalidator.subscribe();
        let service = ProjectService::new(store.clone(), invalidator.clone());

        let project = service
            .create_project(
                &Session::from(AuthenticatedUser::new(me)),
                dto("Night Shoot", "Indie short", "Gaffer", "Austin"),
            )
            .await
            .unwrap();
        assert_eq!(project.created_by, me);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, PROJECTS_VIEW);
        assert!(event.concerns(Uuid::new_v4()));
    }

    #[tokio::test]
    async fn test_list_projects_newest_first_and_capped() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let now = Utc::now();
        for i in 0..(LISTING_LIMIT + 3) {
            store.push_project(me, &format!("project {}", i), "Gaffer", now + Duration::seconds(i));
        }

        let projects = service(&store)
            .list_projects(&ProjectFilter::default())
            .await
            .unwrap();

        assert_eq!(projects.len() as i64, LISTING_LIMIT);
        assert_eq!(projects[0].title, format!("project {}", LISTING_LIMIT + 2));
    }

    #[tokio::test]
    async fn test_list_projects_applies_filters() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let now = Utc::now();
        store.push_project(me, "Desert Western", "Gaffer", now);
        store.push_project(me, "Harbor Noir", "Sound Mixer", now);

        let filter = ProjectFilter {
            query: Some("western".to_string()),
            ..ProjectFilter::default()
        };
        let projects = service(&store).list_projects(&filter).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Desert Western");

        let filter = ProjectFilter {
            role_needed: Some("Sound Mixer".to_string()),
            ..ProjectFilter::default()
        };
        let projects = service(&store).list_projects(&filter).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Harbor Noir");
    }

    #[tokio::test]
    async fn test_reads_degrade_when_backend_unavailable() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let project = store.push_project(me, "Night Shoot", "Gaffer", Utc::now());
        store.set_unavailable(true);
        let service = service(&store);

        let projects = service.list_projects(&ProjectFilter::default()).await.unwrap();
        assert!(projects.is_empty());

        let err = service.get_project(project.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_project() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let project = store.push_project(me, "Night Shoot", "Gaffer", Utc::now());
        let service = service(&store);

        let found = service.get_project(project.id).await.unwrap();
        assert_eq!(found.title, "Night Shoot");

        let err = service.get_project(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.user_message(), "Project not found");
    }
}
