use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserId};
use crate::blog::application::domain::{BlogPost, BlogStats};
use crate::contact::application::domain::ContactStats;
use crate::education::application::domain::Education;
use crate::experience::application::domain::Experience;
use crate::project::application::domain::{Project, ProjectStatus};
use crate::shared::monthly::{bucket_by_month, MonthlyCount};
use crate::skill::application::domain::Skill;

/// Cards shown in the overview lists.
pub const HIGHLIGHT_COUNT: usize = 3;

// ============================================================
// Overview
// ============================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerCard {
    #[schema(value_type = String)]
    pub id: UserId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
}

impl From<&User> for OwnerCard {
    fn from(user: &User) -> Self {
        let p = &user.profile;
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            bio: p.bio.clone(),
            avatar_url: p.avatar_url.clone(),
            github_url: p.github_url.clone(),
            linkedin_url: p.linkedin_url.clone(),
            twitter_url: p.twitter_url.clone(),
            website_url: p.website_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProjectCard {
    pub id: Uuid,
    pub title: String,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub status: ProjectStatus,
    pub featured: bool,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            short_description: project.short_description.clone(),
            image_url: project.image_url.clone(),
            status: project.status,
            featured: project.featured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SkillCard {
    pub id: Uuid,
    pub name: String,
    pub proficiency_level: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BlogCard {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<&BlogPost> for BlogCard {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            published_at: post.published_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct OverviewStatistics {
    pub total_projects: u64,
    pub completed_projects: u64,
    pub total_skills: u64,
    pub total_experience: u64,
    pub total_education: u64,
    /// Published posts only
    pub total_blogs: u64,
    pub total_contact_messages: u64,
    pub unread_messages: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PortfolioOverview {
    pub profile: OwnerCard,
    pub statistics: OverviewStatistics,
    pub recent_projects: Vec<ProjectCard>,
    pub featured_projects: Vec<ProjectCard>,
    pub skills_by_category: BTreeMap<String, Vec<SkillCard>>,
    pub recent_blogs: Vec<BlogCard>,
    pub monthly_project_stats: Vec<MonthlyCount>,
}

/// Everything the overview needs, already loaded.
pub struct OverviewSources<'a> {
    pub owner: &'a User,
    pub projects: &'a [Project],
    pub skills: &'a [Skill],
    pub experience_count: u64,
    pub education_count: u64,
    /// Newest published first
    pub recent_blogs: &'a [BlogPost],
    pub blogs: &'a BlogStats,
    pub contacts: &'a ContactStats,
    pub since: DateTime<Utc>,
}

fn newest_first(projects: &[Project]) -> Vec<&Project> {
    let mut sorted: Vec<&Project> = projects.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

fn projects_created_since(projects: &[Project], since: DateTime<Utc>) -> Vec<MonthlyCount> {
    bucket_by_month(
        projects
            .iter()
            .map(|p| p.created_at)
            .filter(|created| *created >= since),
    )
}

fn count_where<T>(items: &[T], pred: impl Fn(&T) -> bool) -> u64 {
    items.iter().filter(|item| pred(*item)).count() as u64
}

pub fn build_overview(src: OverviewSources<'_>) -> PortfolioOverview {
    let recent_projects = newest_first(src.projects)
        .into_iter()
        .take(HIGHLIGHT_COUNT)
        .map(ProjectCard::from)
        .collect();
    let featured_projects = newest_first(src.projects)
        .into_iter()
        .filter(|p| p.featured)
        .take(HIGHLIGHT_COUNT)
        .map(ProjectCard::from)
        .collect();

    let mut skills_by_category: BTreeMap<String, Vec<SkillCard>> = BTreeMap::new();
    for skill in src.skills {
        skills_by_category
            .entry(skill.category.to_string())
            .or_default()
            .push(SkillCard {
                id: skill.id,
                name: skill.name.clone(),
                proficiency_level: skill.proficiency_level.clone(),
                icon_url: skill.icon_url.clone(),
            });
    }

    PortfolioOverview {
        profile: OwnerCard::from(src.owner),
        statistics: OverviewStatistics {
            total_projects: src.projects.len() as u64,
            completed_projects: count_where(src.projects, |p| {
                p.status == ProjectStatus::Completed
            }),
            total_skills: src.skills.len() as u64,
            total_experience: src.experience_count,
            total_education: src.education_count,
            total_blogs: src.blogs.published,
            total_contact_messages: src.contacts.total_messages,
            unread_messages: src.contacts.unread_messages,
        },
        recent_projects,
        featured_projects,
        skills_by_category,
        recent_blogs: src
            .recent_blogs
            .iter()
            .take(HIGHLIGHT_COUNT)
            .map(BlogCard::from)
            .collect(),
        monthly_project_stats: projects_created_since(src.projects, src.since),
    }
}

// ============================================================
// Detailed statistics
// ============================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProjectCounts {
    pub total: u64,
    pub completed: u64,
    pub in_progress: u64,
    pub planned: u64,
    pub featured: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SkillCounts {
    pub total: u64,
    /// Only categories with at least one skill
    pub by_category: BTreeMap<String, u64>,
}

/// Experience and education entries, and how many are ongoing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimelineCounts {
    pub total: u64,
    pub current: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct BlogCounts {
    pub total: u64,
    pub published: u64,
    pub drafts: u64,
    pub total_views: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ContactCounts {
    pub total: u64,
    pub read: u64,
    pub unread: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyActivity {
    pub projects: Vec<MonthlyCount>,
    pub blogs: Vec<MonthlyCount>,
    pub contacts: Vec<MonthlyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PortfolioStats {
    pub projects: ProjectCounts,
    pub skills: SkillCounts,
    pub experience: TimelineCounts,
    pub education: TimelineCounts,
    pub blogs: BlogCounts,
    pub contacts: ContactCounts,
    pub monthly_stats: MonthlyActivity,
}

pub struct StatsSources<'a> {
    pub projects: &'a [Project],
    pub skills: &'a [Skill],
    pub experience: &'a [Experience],
    pub education: &'a [Education],
    pub blogs: BlogStats,
    pub contacts: ContactStats,
    pub since: DateTime<Utc>,
}

pub fn build_stats(src: StatsSources<'_>) -> PortfolioStats {
    let mut by_category: BTreeMap<String, u64> = BTreeMap::new();
    for skill in src.skills {
        *by_category.entry(skill.category.to_string()).or_default() += 1;
    }

    PortfolioStats {
        projects: ProjectCounts {
            total: src.projects.len() as u64,
            completed: count_where(src.projects, |p| p.status == ProjectStatus::Completed),
            in_progress: count_where(src.projects, |p| p.status == ProjectStatus::InProgress),
            planned: count_where(src.projects, |p| p.status == ProjectStatus::Planned),
            featured: count_where(src.projects, |p| p.featured),
        },
        skills: SkillCounts {
            total: src.skills.len() as u64,
            by_category,
        },
        experience: TimelineCounts {
            total: src.experience.len() as u64,
            current: count_where(src.experience, |e| e.current),
        },
        education: TimelineCounts {
            total: src.education.len() as u64,
            current: count_where(src.education, |e| e.current),
        },
        blogs: BlogCounts {
            total: src.blogs.total,
            published: src.blogs.published,
            drafts: src.blogs.drafts,
            total_views: src.blogs.total_views,
        },
        contacts: ContactCounts {
            total: src.contacts.total_messages,
            read: src.contacts.read_messages,
            unread: src.contacts.unread_messages,
        },
        monthly_stats: MonthlyActivity {
            projects: projects_created_since(src.projects, src.since),
            blogs: src.blogs.published_per_month,
            contacts: src.contacts.monthly_stats,
        },
    }
}

// ============================================================
// Sitemap
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SitemapEntry {
    #[schema(example = "/blog/hello-world")]
    pub url: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl SitemapEntry {
    fn page(url: &str, title: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            last_modified: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Sitemap {
    pub static_pages: Vec<SitemapEntry>,
    pub projects: Vec<SitemapEntry>,
    pub blogs: Vec<SitemapEntry>,
    pub skills: Vec<SitemapEntry>,
    pub last_updated: DateTime<Utc>,
}

const STATIC_PAGES: [(&str, &str); 8] = [
    ("/", "Home"),
    ("/about", "About"),
    ("/projects", "Projects"),
    ("/skills", "Skills"),
    ("/experience", "Experience"),
    ("/education", "Education"),
    ("/blog", "Blog"),
    ("/contact", "Contact"),
];

/// `published_blogs` must already exclude drafts.
pub fn build_sitemap(
    projects: &[Project],
    published_blogs: &[BlogPost],
    skills: &[Skill],
    now: DateTime<Utc>,
) -> Sitemap {
    Sitemap {
        static_pages: STATIC_PAGES
            .iter()
            .map(|(url, title)| SitemapEntry::page(url, title))
            .collect(),
        projects: projects
            .iter()
            .map(|p| SitemapEntry {
                url: format!("/projects/{}", p.id),
                title: p.title.clone(),
                last_modified: Some(p.updated_at),
            })
            .collect(),
        blogs: published_blogs
            .iter()
            .map(|b| SitemapEntry {
                url: format!("/blog/{}", b.slug),
                title: b.title.clone(),
                last_modified: Some(b.updated_at),
            })
            .collect(),
        skills: skills
            .iter()
            .map(|s| SitemapEntry {
                url: format!("/skills/{}", s.id),
                title: s.name.clone(),
                last_modified: Some(s.updated_at),
            })
            .collect(),
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::application::domain::SkillCategory;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn project(title: &str, status: ProjectStatus, featured: bool, created: DateTime<Utc>) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            short_description: None,
            image_url: None,
            github_url: None,
            live_url: None,
            status,
            featured,
            technologies: Vec::new(),
            created_at: created,
            updated_at: created,
        }
    }

    fn skill(name: &str, category: SkillCategory) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            proficiency_level: "Advanced".to_string(),
            icon_url: None,
            created_at: at(2025, 1, 1),
            updated_at: at(2025, 1, 1),
        }
    }

    fn owner() -> User {
        User {
            id: UserId::new(),
            username: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: "h".into(),
            is_admin: true,
            profile: Default::default(),
            created_at: at(2024, 1, 1),
            updated_at: at(2024, 1, 1),
        }
    }

    fn contacts(total: u64, read: u64) -> ContactStats {
        ContactStats {
            total_messages: total,
            unread_messages: total - read,
            read_messages: read,
            monthly_stats: Vec::new(),
        }
    }

    #[test]
    fn overview_picks_newest_and_featured_projects() {
        let projects = vec![
            project("old", ProjectStatus::Completed, true, at(2024, 1, 1)),
            project("mid", ProjectStatus::InProgress, false, at(2025, 2, 1)),
            project("new", ProjectStatus::Completed, true, at(2025, 5, 1)),
            project("newest", ProjectStatus::Planned, false, at(2025, 6, 1)),
        ];
        let skills = vec![
            skill("Rust", SkillCategory::Language),
            skill("Go", SkillCategory::Language),
            skill("Figma", SkillCategory::Design),
        ];
        let user = owner();

        let overview = build_overview(OverviewSources {
            owner: &user,
            projects: &projects,
            skills: &skills,
            experience_count: 2,
            education_count: 1,
            recent_blogs: &[],
            blogs: &BlogStats {
                published: 4,
                ..Default::default()
            },
            contacts: &contacts(5, 2),
            since: at(2025, 1, 1),
        });

        let titles = |cards: &[ProjectCard]| cards.iter().map(|c| c.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&overview.recent_projects), ["newest", "new", "mid"]);
        assert_eq!(titles(&overview.featured_projects), ["new", "old"]);
        assert_eq!(overview.statistics.completed_projects, 2);
        assert_eq!(overview.statistics.total_blogs, 4);
        assert_eq!(overview.statistics.unread_messages, 3);
        assert_eq!(overview.skills_by_category["language"].len(), 2);
        assert!(!overview.skills_by_category.contains_key("tool"));
        assert_eq!(
            overview.monthly_project_stats,
            vec![
                MonthlyCount { month: "2025-02".into(), count: 1 },
                MonthlyCount { month: "2025-05".into(), count: 1 },
                MonthlyCount { month: "2025-06".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn stats_count_statuses_and_categories() {
        let now = at(2025, 6, 15);
        let projects = vec![
            project("a", ProjectStatus::Completed, true, now - Duration::days(400)),
            project("b", ProjectStatus::InProgress, false, now - Duration::days(10)),
            project("c", ProjectStatus::Planned, true, now - Duration::days(5)),
        ];
        let skills = vec![skill("Rust", SkillCategory::Language), skill("Vim", SkillCategory::Tool)];

        let stats = build_stats(StatsSources {
            projects: &projects,
            skills: &skills,
            experience: &[],
            education: &[],
            blogs: BlogStats {
                total: 3,
                published: 2,
                drafts: 1,
                total_views: 42,
                published_per_month: vec![MonthlyCount { month: "2025-06".into(), count: 2 }],
            },
            contacts: contacts(1, 1),
            since: now - Duration::days(365),
        });

        assert_eq!(
            stats.projects,
            ProjectCounts { total: 3, completed: 1, in_progress: 1, planned: 1, featured: 2 }
        );
        assert_eq!(stats.skills.by_category.get("tool"), Some(&1));
        assert_eq!(stats.blogs.total_views, 42);
        assert_eq!(stats.contacts, ContactCounts { total: 1, read: 1, unread: 0 });
        assert_eq!(stats.monthly_stats.projects.iter().map(|m| m.count).sum::<u64>(), 2);
        assert_eq!(stats.monthly_stats.blogs[0].count, 2);
    }

    #[test]
    fn sitemap_links_every_public_page() {
        let projects = vec![project("Site", ProjectStatus::Completed, false, at(2025, 1, 1))];
        let skills = vec![skill("Rust", SkillCategory::Language)];

        let sitemap = build_sitemap(&projects, &[], &skills, at(2025, 6, 1));

        assert_eq!(sitemap.static_pages.len(), 8);
        assert_eq!(sitemap.static_pages[0].url, "/");
        assert_eq!(sitemap.projects[0].url, format!("/projects/{}", projects[0].id));
        assert_eq!(sitemap.skills[0].title, "Rust");
        assert!(sitemap.blogs.is_empty());

        let json = serde_json::to_value(&sitemap).unwrap();
        assert!(json["static_pages"][0].get("last_modified").is_none());
        assert!(json["projects"][0].get("last_modified").is_some());
    }
}
