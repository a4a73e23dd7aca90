//! In-memory repository fakes for service tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use doi_common::{hash_password, ActivityConfig, JwtService};
use doi_core::entities::{
    ActivityLog, ActivityRecord, Affiliation, Article, ArticleStatus, Author, Member,
    Publication, PublicationType, Sponsor, User, UserRole,
};
use doi_core::traits::{
    ActionCount, ActivityLogRepository, ActivityQuery, ArticleMutation, ArticleRepository,
    AuthorRepository, IpFilter, MemberQuery, MemberRepository, MemberStats, PublicationQuery,
    PublicationRepository, PublicationStats, RepoResult, SponsorRepository, UserRepository,
};
use doi_core::DomainError;

use super::context::{ServiceContext, ServiceContextBuilder};
use super::request_context::RequestContext;

pub const SPONSOR_NAME: &str = "Test Sponsor";
pub const OPERATOR_ID: i64 = 1;
pub const ADMIN_ID: i64 = 2;
pub const PASSWORD: &str = "secret1";

pub fn operator_request() -> RequestContext {
    RequestContext::new("10.0.0.1").with_user(OPERATOR_ID, UserRole::Operator)
}

pub fn admin_request() -> RequestContext {
    RequestContext::new("10.0.0.2").with_user(ADMIN_ID, UserRole::Admin)
}

/// Unsaved member of the seeded sponsor
pub fn member(id: i64, name: &str) -> Member {
    let mut member = Member::new(
        1,
        name.to_string(),
        "Institute".to_string(),
        &format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "Main Street 1".to_string(),
        "100123456".to_string(),
        "07001234".to_string(),
    );
    member.id = id;
    member
}

/// Unsaved journal of `member_id`
pub fn publication(id: i64, member_id: i64, title: &str) -> Publication {
    let mut publication = Publication::new(member_id, PublicationType::Journal, title.to_string());
    publication.id = id;
    publication
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn page<T>(rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    rows.into_iter()
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect()
}

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<(User, String)>>,
}

impl InMemoryUserRepository {
    pub fn insert(&self, mut user: User, password_hash: &str) -> User {
        let mut rows = self.rows.lock().unwrap();
        user.id = rows.iter().map(|(u, _)| u.id).max().unwrap_or(0) + 1;
        rows.push((user.clone(), password_hash.to_string()));
        user
    }

    fn name_of(&self, id: i64) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.full_name.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.rows.lock().unwrap().iter().map(|(u, _)| u.clone()).collect();
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(page(users, limit, offset))
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<User> {
        if self.email_exists(&user.email).await? {
            return Err(DomainError::EmailAlreadyExists);
        }
        Ok(self.insert(user.clone(), password_hash))
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        row.0 = user.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(u, _)| u.id != id);
        if rows.len() == before {
            return Err(DomainError::UserNotFound(id));
        }
        Ok(())
    }

    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        Ok(self.rows.lock().unwrap().iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        row.1 = password_hash.to_string();
        Ok(())
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some((user, _)) = rows.iter_mut().find(|(u, _)| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}

// ============================================================================
// Sponsor
// ============================================================================

#[derive(Default)]
pub struct InMemorySponsorRepository {
    row: Mutex<Option<Sponsor>>,
}

#[async_trait]
impl SponsorRepository for InMemorySponsorRepository {
    async fn get(&self) -> RepoResult<Option<Sponsor>> {
        Ok(self.row.lock().unwrap().clone())
    }

    async fn upsert(&self, sponsor: &Sponsor) -> RepoResult<Sponsor> {
        let mut row = self.row.lock().unwrap();
        let mut saved = sponsor.clone();
        saved.id = row.as_ref().map_or(1, |s| s.id);
        *row = Some(saved.clone());
        Ok(saved)
    }
}

// ============================================================================
// Publications
// ============================================================================

#[derive(Default)]
pub struct InMemoryPublicationRepository {
    rows: Mutex<Vec<Publication>>,
}

impl InMemoryPublicationRepository {
    fn matching(&self, query: &PublicationQuery) -> Vec<Publication> {
        let mut rows: Vec<Publication> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| query.member_id.is_none_or(|id| p.member_id == id))
            .filter(|p| query.publication_type.is_none_or(|t| p.publication_type == t))
            .filter(|p| query.is_active.is_none_or(|a| p.is_active == a))
            .filter(|p| {
                query.search.as_deref().is_none_or(|s| {
                    contains_ci(&p.title, s) || p.subtitle.as_deref().is_some_and(|t| contains_ci(t, s))
                })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        rows
    }

    fn remove_for_member(&self, member_id: i64) {
        self.rows.lock().unwrap().retain(|p| p.member_id != member_id);
    }

    fn has_member(&self, member_id: i64) -> bool {
        self.rows.lock().unwrap().iter().any(|p| p.member_id == member_id)
    }
}

#[async_trait]
impl PublicationRepository for InMemoryPublicationRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Publication>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_many(&self, query: &PublicationQuery) -> RepoResult<Vec<Publication>> {
        Ok(page(self.matching(query), query.limit, query.offset))
    }

    async fn count(&self, query: &PublicationQuery) -> RepoResult<i64> {
        Ok(self.matching(query).len() as i64)
    }

    async fn create(&self, publication: &Publication) -> RepoResult<Publication> {
        let mut rows = self.rows.lock().unwrap();
        let mut saved = publication.clone();
        saved.id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, publication: &Publication) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == publication.id)
            .ok_or(DomainError::PublicationNotFound(publication.id))?;
        *row = publication.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(DomainError::PublicationNotFound(id));
        }
        Ok(())
    }

    async fn stats(&self, member_id: Option<i64>) -> RepoResult<PublicationStats> {
        let rows = self.matching(&PublicationQuery {
            member_id,
            ..Default::default()
        });
        Ok(PublicationStats {
            total: rows.len() as i64,
            active: rows.iter().filter(|p| p.is_active).count() as i64,
            by_type: PublicationType::ALL
                .iter()
                .map(|t| (*t, rows.iter().filter(|p| p.publication_type == *t).count() as i64))
                .collect(),
        })
    }
}

// ============================================================================
// Members
// ============================================================================

pub struct InMemoryMemberRepository {
    rows: Mutex<Vec<Member>>,
    publications: Arc<InMemoryPublicationRepository>,
}

impl InMemoryMemberRepository {
    fn new(publications: Arc<InMemoryPublicationRepository>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            publications,
        }
    }

    fn matching(&self, query: &MemberQuery) -> Vec<Member> {
        let mut rows: Vec<Member> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| query.is_active.is_none_or(|a| m.is_active == a))
            .filter(|m| {
                query.search.as_deref().is_none_or(|s| {
                    contains_ci(&m.name, s)
                        || contains_ci(&m.institution, s)
                        || contains_ci(&m.contact_email, s)
                })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn find_many(&self, query: &MemberQuery) -> RepoResult<Vec<Member>> {
        Ok(page(self.matching(query), query.limit, query.offset))
    }

    async fn count(&self, query: &MemberQuery) -> RepoResult<i64> {
        Ok(self.matching(query).len() as i64)
    }

    async fn contact_email_exists(
        &self,
        sponsor_id: i64,
        email: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<bool> {
        let email = email.to_lowercase();
        Ok(self.rows.lock().unwrap().iter().any(|m| {
            m.sponsor_id == sponsor_id && m.contact_email == email && Some(m.id) != exclude_id
        }))
    }

    async fn create(&self, member: &Member) -> RepoResult<Member> {
        let mut rows = self.rows.lock().unwrap();
        let mut saved = member.clone();
        saved.id = rows.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or(DomainError::MemberNotFound(member.id))?;
        *row = member.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|m| m.id != id);
            if rows.len() == before {
                return Err(DomainError::MemberNotFound(id));
            }
        }
        self.publications.remove_for_member(id);
        Ok(())
    }

    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Member>> {
        let rows: Vec<Member> = self
            .matching(&MemberQuery::default())
            .into_iter()
            .filter(|m| m.is_active && (contains_ci(&m.name, term) || contains_ci(&m.institution, term)))
            .collect();
        Ok(page(rows, limit, 0))
    }

    async fn stats(&self) -> RepoResult<MemberStats> {
        let rows = self.rows.lock().unwrap().clone();
        let total = rows.len() as i64;
        let active = rows.iter().filter(|m| m.is_active).count() as i64;
        Ok(MemberStats {
            total,
            active,
            inactive: total - active,
            with_publications: rows
                .iter()
                .filter(|m| self.publications.has_member(m.id))
                .count() as i64,
        })
    }
}

// ============================================================================
// Activity log
// ============================================================================

pub struct InMemoryActivityRepository {
    rows: Mutex<Vec<ActivityLog>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryActivityRepository {
    fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            users,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }

    pub fn all(&self) -> Vec<ActivityLog> {
        self.rows.lock().unwrap().clone()
    }

    pub fn with_action(&self, action: &str) -> Vec<ActivityLog> {
        self.all().into_iter().filter(|a| a.action == action).collect()
    }

    /// Matching rows, newest first, ignoring limit/offset
    pub fn query(&self, query: &ActivityQuery) -> Vec<ActivityRecord> {
        let mut rows: Vec<ActivityLog> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| query.created_from.is_none_or(|from| a.created_at >= from))
            .filter(|a| query.created_before.is_none_or(|before| a.created_at < before))
            .filter(|a| query.user_id.is_none_or(|id| a.user_id == id))
            .filter(|a| query.action_prefix.as_deref().is_none_or(|p| a.action.starts_with(p)))
            .filter(|a| query.search.as_deref().is_none_or(|s| contains_ci(&a.description, s)))
            .filter(|a| match &query.ip {
                Some(IpFilter::Exact(ip)) => a.ip_address == *ip,
                Some(IpFilter::Contains(ip)) => a.ip_address.contains(ip.as_str()),
                None => true,
            })
            .filter(|a| query.member_id.is_none_or(|id| a.member_id == Some(id)))
            .filter(|a| query.publication_id.is_none_or(|id| a.publication_id == Some(id)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.into_iter()
            .map(|entry| ActivityRecord {
                user_name: self.users.name_of(entry.user_id),
                entry,
            })
            .collect()
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityRepository {
    async fn append(&self, entry: &ActivityLog) -> RepoResult<ActivityLog> {
        entry.ensure_writable()?;
        let mut rows = self.rows.lock().unwrap();
        let mut saved = entry.clone();
        saved.id = Some(rows.iter().filter_map(|a| a.id).max().unwrap_or(0) + 1);
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn find_many(&self, query: &ActivityQuery) -> RepoResult<Vec<ActivityRecord>> {
        Ok(page(self.query(query), query.limit, query.offset))
    }

    async fn count(&self, query: &ActivityQuery) -> RepoResult<i64> {
        Ok(self.query(query).len() as i64)
    }

    async fn count_by_action(
        &self,
        since: DateTime<Utc>,
        user_id: Option<i64>,
    ) -> RepoResult<Vec<ActionCount>> {
        let mut counts: Vec<ActionCount> = Vec::new();
        for row in self.rows.lock().unwrap().iter() {
            if row.created_at < since || user_id.is_some_and(|id| row.user_id != id) {
                continue;
            }
            match counts.iter_mut().find(|c| c.action == row.action) {
                Some(count) => count.count += 1,
                None => counts.push(ActionCount {
                    action: row.action.clone(),
                    count: 1,
                }),
            }
        }
        Ok(counts)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.created_at >= cutoff);
        Ok((before - rows.len()) as u64)
    }
}

/// Activity repository whose every call fails
pub struct FailingActivityRepository;

#[async_trait]
impl ActivityLogRepository for FailingActivityRepository {
    async fn append(&self, _entry: &ActivityLog) -> RepoResult<ActivityLog> {
        Err(DomainError::DatabaseError("connection refused".into()))
    }

    async fn find_many(&self, _query: &ActivityQuery) -> RepoResult<Vec<ActivityRecord>> {
        Err(DomainError::DatabaseError("connection refused".into()))
    }

    async fn count(&self, _query: &ActivityQuery) -> RepoResult<i64> {
        Err(DomainError::DatabaseError("connection refused".into()))
    }

    async fn count_by_action(
        &self,
        _since: DateTime<Utc>,
        _user_id: Option<i64>,
    ) -> RepoResult<Vec<ActionCount>> {
        Err(DomainError::DatabaseError("connection refused".into()))
    }

    async fn delete_older_than(&self, _cutoff: DateTime<Utc>) -> RepoResult<u64> {
        Err(DomainError::DatabaseError("connection refused".into()))
    }
}

// ============================================================================
// Articles and authors
// ============================================================================

#[derive(Default)]
pub struct InMemoryArticleRepository {
    rows: Mutex<Vec<Article>>,
}

impl InMemoryArticleRepository {
    /// Stored state of an article
    pub fn get(&self, id: i64) -> Option<Article> {
        self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Article>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, article: &Article) -> RepoResult<Article> {
        let mut rows = self.rows.lock().unwrap();
        let mut saved = article.clone();
        saved.id = rows.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn update_locked(&self, id: i64, mutation: ArticleMutation) -> RepoResult<Article> {
        // The mutex plays the part of the row lock
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DomainError::ArticleNotFound(id))?;
        let mut article = row.clone();
        mutation(&mut article)?;
        *row = article.clone();
        Ok(article)
    }

    async fn count_by_status(&self) -> RepoResult<Vec<(ArticleStatus, i64)>> {
        let rows = self.rows.lock().unwrap();
        Ok(ArticleStatus::ALL
            .iter()
            .map(|s| (*s, rows.iter().filter(|a| a.status == *s).count() as i64))
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryAuthorRepository {
    rows: Mutex<Vec<Author>>,
    affiliations: Mutex<Vec<Affiliation>>,
}

impl InMemoryAuthorRepository {
    /// Every stored author, in insertion order
    pub fn all(&self) -> Vec<Author> {
        self.rows.lock().unwrap().clone()
    }

    /// Every stored affiliation, in insertion order
    pub fn all_affiliations(&self) -> Vec<Affiliation> {
        self.affiliations.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn find_by_article(&self, article_id: i64) -> RepoResult<Vec<Author>> {
        let mut rows: Vec<Author> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.article_id == article_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| (a.order, a.id));
        Ok(rows)
    }

    async fn count_by_article(&self, article_id: i64) -> RepoResult<i64> {
        Ok(self.find_by_article(article_id).await?.len() as i64)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Author>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, author: &Author) -> RepoResult<Author> {
        let mut rows = self.rows.lock().unwrap();
        let mut saved = author.clone();
        saved.id = rows.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        rows.push(saved.clone());
        Ok(saved)
    }

    async fn find_affiliations_by_article(&self, article_id: i64) -> RepoResult<Vec<Affiliation>> {
        let author_ids: Vec<i64> = self
            .find_by_article(article_id)
            .await?
            .iter()
            .map(|a| a.id)
            .collect();
        let mut rows: Vec<Affiliation> = self
            .affiliations
            .lock()
            .unwrap()
            .iter()
            .filter(|af| author_ids.contains(&af.author_id))
            .cloned()
            .collect();
        rows.sort_by_key(|af| (af.author_id, af.order, af.id));
        Ok(rows)
    }

    async fn find_affiliations(&self, author_id: i64) -> RepoResult<Vec<Affiliation>> {
        let mut rows: Vec<Affiliation> = self
            .affiliations
            .lock()
            .unwrap()
            .iter()
            .filter(|af| af.author_id == author_id)
            .cloned()
            .collect();
        rows.sort_by_key(|af| (af.order, af.id));
        Ok(rows)
    }

    async fn create_affiliation(&self, affiliation: &Affiliation) -> RepoResult<Affiliation> {
        if !self.rows.lock().unwrap().iter().any(|a| a.id == affiliation.author_id) {
            return Err(DomainError::AuthorNotFound(affiliation.author_id));
        }
        let mut rows = self.affiliations.lock().unwrap();
        let mut saved = affiliation.clone();
        saved.id = rows.iter().map(|af| af.id).max().unwrap_or(0) + 1;
        rows.push(saved.clone());
        Ok(saved)
    }
}

// ============================================================================
// Harness
// ============================================================================

/// A service context over in-memory fakes, seeded with a sponsor, an
/// operator (id 1) and an admin (id 2), both using [`PASSWORD`]
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUserRepository>,
    pub members: Arc<InMemoryMemberRepository>,
    pub publications: Arc<InMemoryPublicationRepository>,
    pub activities: Arc<InMemoryActivityRepository>,
    pub articles: Arc<InMemoryArticleRepository>,
    pub authors: Arc<InMemoryAuthorRepository>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Same seed data, but activity writes and reads always fail
    pub fn with_failing_activity_repo() -> Self {
        Self::build(true)
    }

    fn build(failing_activity: bool) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let password_hash = hash_password(PASSWORD).unwrap();
        users.insert(
            User::new("operator@example.com", "Olga Operator".to_string(), UserRole::Operator),
            &password_hash,
        );
        users.insert(
            User::new("admin@example.com", "Ana Admin".to_string(), UserRole::Admin),
            &password_hash,
        );

        let sponsor = Arc::new(InMemorySponsorRepository::default());
        *sponsor.row.lock().unwrap() = Some(Sponsor {
            id: 1,
            ..Sponsor::new(SPONSOR_NAME.to_string(), "sponsor@example.com", "sp1".to_string())
        });

        let publications = Arc::new(InMemoryPublicationRepository::default());
        let members = Arc::new(InMemoryMemberRepository::new(publications.clone()));
        let activities = Arc::new(InMemoryActivityRepository::new(users.clone()));
        let articles = Arc::new(InMemoryArticleRepository::default());
        let authors = Arc::new(InMemoryAuthorRepository::default());

        let activity_repo: Arc<dyn ActivityLogRepository> = if failing_activity {
            Arc::new(FailingActivityRepository)
        } else {
            activities.clone()
        };

        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .sponsor_repo(sponsor)
            .member_repo(members.clone())
            .publication_repo(publications.clone())
            .activity_repo(activity_repo)
            .article_repo(articles.clone())
            .author_repo(authors.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 900, 86_400)))
            .activity_config(ActivityConfig::default())
            .build()
            .unwrap();

        Self {
            ctx,
            users,
            members,
            publications,
            activities,
            articles,
            authors,
        }
    }
}
