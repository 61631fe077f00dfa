use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::blog::adapter::outgoing::blog_repository_postgres::BlogRepositoryPostgres;
use crate::blog::application::domain::BlogRepository;
use crate::contact::adapter::outgoing::contact_repository_postgres::ContactRepositoryPostgres;
use crate::contact::application::domain::ContactRepository;
use crate::education::adapter::outgoing::education_repository_postgres::EducationRepositoryPostgres;
use crate::education::application::domain::EducationRepository;
use crate::experience::adapter::outgoing::experience_repository_postgres::ExperienceRepositoryPostgres;
use crate::experience::application::domain::ExperienceRepository;
use crate::project::adapter::outgoing::ProjectRepositoryPostgres;
use crate::project::application::domain::ProjectRepository;
use crate::skill::adapter::outgoing::skill_repository_postgres::SkillRepositoryPostgres;
use crate::skill::application::domain::SkillRepository;

/// Repositories behind the portfolio content endpoints.
#[derive(Clone)]
pub struct ContentRepositories {
    pub projects: Arc<ProjectRepository>,
    pub skills: Arc<SkillRepository>,
    pub experience: Arc<ExperienceRepository>,
    pub education: Arc<EducationRepository>,
    pub blog: Arc<BlogRepository>,
    pub contact: Arc<ContactRepository>,
}

impl ContentRepositories {
    pub fn postgres(db: Arc<DatabaseConnection>) -> Self {
        Self {
            projects: Arc::new(ProjectRepositoryPostgres::new(db.clone())),
            skills: Arc::new(SkillRepositoryPostgres::new(db.clone())),
            experience: Arc::new(ExperienceRepositoryPostgres::new(db.clone())),
            education: Arc::new(EducationRepositoryPostgres::new(db.clone())),
            blog: Arc::new(BlogRepositoryPostgres::new(db.clone())),
            contact: Arc::new(ContactRepositoryPostgres::new(db)),
        }
    }
}

/// Registers every content route on the API scope.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    crate::project::adapter::incoming::web::routes::configure(cfg);
    crate::skill::adapter::incoming::web::routes::configure(cfg);
    crate::experience::adapter::incoming::web::routes::configure(cfg);
    crate::education::adapter::incoming::web::routes::configure(cfg);
    crate::blog::adapter::incoming::web::routes::configure(cfg);
    crate::contact::adapter::incoming::web::routes::configure(cfg);
}
