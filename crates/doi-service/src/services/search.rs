//! Unified search across members and publications
//!
//! Candidates come from the repositories' substring filters. Ranking happens
//! here so both entity kinds share one relevance scale.

use std::cmp::Reverse;
use std::collections::HashMap;

use doi_core::entities::{Member, Publication, PublicationType};
use doi_core::traits::{MemberQuery, PublicationQuery};
use tracing::{debug, instrument};

use crate::dto::{
    GlobalSearchQuery, GlobalSearchResponse, PageRequest, PaginationMeta, SearchHit,
    SearchSuggestion,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::member::MIN_SEARCH_LENGTH;

/// Upper bound on candidates fetched per entity kind before ranking
pub const SEARCH_CANDIDATE_LIMIT: i64 = 500;
pub const DEFAULT_SUGGESTION_LIMIT: i64 = 8;
pub const MAX_SUGGESTION_LIMIT: i64 = 20;

const SUGGESTION_LABEL_CHARS: usize = 50;
const ACTIVE_BONUS: i32 = 10;

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ranked, paginated hits over members and publications.
    ///
    /// A blank query returns an empty page without touching the repositories.
    #[instrument(skip(self, query), fields(q = %query.q, scope = ?query.scope))]
    pub async fn search_all(&self, query: GlobalSearchQuery) -> ServiceResult<GlobalSearchResponse> {
        let page = PageRequest::new(query.page, query.per_page);
        let term = query.q.trim().to_string();
        if term.is_empty() {
            return Ok(GlobalSearchResponse {
                query: term,
                members_count: 0,
                publications_count: 0,
                results: Vec::new(),
                pagination: PaginationMeta::new(page.page, page.per_page, 0),
            });
        }

        let mut hits = Vec::new();

        let members = if query.scope.includes_members() {
            self.member_candidates(&term).await?
        } else {
            Vec::new()
        };
        let members_count = len_i64(members.len());
        hits.extend(members.into_iter().map(|member| {
            let relevance = member_relevance(&member, &term);
            member_hit(member, relevance)
        }));

        let publications = if query.scope.includes_publications() {
            self.publication_candidates(&term).await?
        } else {
            Vec::new()
        };
        let publications_count = len_i64(publications.len());
        let member_names = self.member_names(&publications).await?;
        hits.extend(publications.into_iter().map(|publication| {
            let member_name = member_names.get(&publication.member_id).cloned();
            let relevance = publication_relevance(&publication, member_name.as_deref(), &term);
            publication_hit(publication, member_name, relevance)
        }));

        rank(&mut hits);
        let total = len_i64(hits.len());
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.per_page).unwrap_or_default();
        let results: Vec<SearchHit> = hits.into_iter().skip(skip).take(take).collect();

        debug!(total, members_count, publications_count, "Search completed");
        Ok(GlobalSearchResponse {
            query: term,
            members_count,
            publications_count,
            results,
            pagination: PaginationMeta::new(page.page, page.per_page, total),
        })
    }

    /// Member names first, then publication titles, at most `limit` in total.
    /// Terms shorter than two characters return nothing.
    #[instrument(skip(self))]
    pub async fn search_suggestions(
        &self,
        q: &str,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<SearchSuggestion>> {
        let term = q.trim();
        if term.chars().count() < MIN_SEARCH_LENGTH {
            return Ok(Vec::new());
        }
        let limit = limit
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
            .clamp(1, MAX_SUGGESTION_LIMIT);
        let limit = usize::try_from(limit).unwrap_or_default();
        let needle = term.to_lowercase();

        let mut suggestions: Vec<SearchSuggestion> = self
            .member_candidates(term)
            .await?
            .into_iter()
            .filter(|member| member.name.to_lowercase().contains(&needle))
            .take(limit)
            .map(|member| suggestion("member", "Member", member.name))
            .collect();

        let remaining = limit - suggestions.len();
        if remaining > 0 {
            suggestions.extend(
                self.publication_candidates(term)
                    .await?
                    .into_iter()
                    .filter(|publication| publication.title.to_lowercase().contains(&needle))
                    .take(remaining)
                    .map(|publication| suggestion("publication", "Publication", publication.title)),
            );
        }

        Ok(suggestions)
    }

    async fn member_candidates(&self, term: &str) -> ServiceResult<Vec<Member>> {
        let query = MemberQuery {
            search: Some(term.to_string()),
            limit: SEARCH_CANDIDATE_LIMIT,
            ..Default::default()
        };
        Ok(self.ctx.member_repo().find_many(&query).await?)
    }

    async fn publication_candidates(&self, term: &str) -> ServiceResult<Vec<Publication>> {
        let query = PublicationQuery {
            search: Some(term.to_string()),
            limit: SEARCH_CANDIDATE_LIMIT,
            ..Default::default()
        };
        Ok(self.ctx.publication_repo().find_many(&query).await?)
    }

    async fn member_names(&self, publications: &[Publication]) -> ServiceResult<HashMap<i64, String>> {
        let mut names = HashMap::new();
        for publication in publications {
            if names.contains_key(&publication.member_id) {
                continue;
            }
            if let Some(member) = self.ctx.member_repo().find_by_id(publication.member_id).await? {
                names.insert(member.id, member.name);
            }
        }
        Ok(names)
    }
}

fn len_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Points for `field` matching `needle` (already lowercased) exactly, as a
/// prefix, or anywhere
fn match_score(field: &str, needle: &str, exact: i32, prefix: i32, contains: i32) -> i32 {
    let field = field.trim().to_lowercase();
    if field.is_empty() || needle.is_empty() {
        0
    } else if field == needle {
        exact
    } else if field.starts_with(needle) {
        prefix
    } else if field.contains(needle) {
        contains
    } else {
        0
    }
}

/// Relevance of a member for `term`; the name weighs most
pub fn member_relevance(member: &Member, term: &str) -> i32 {
    let needle = term.trim().to_lowercase();
    let mut score = match_score(&member.name, &needle, 100, 70, 50)
        + match_score(&member.institution, &needle, 80, 40, 30)
        + match_score(&member.contact_email, &needle, 20, 20, 20);
    if member.is_active {
        score += ACTIVE_BONUS;
    }
    score
}

/// Relevance of a publication for `term`; the title weighs most
pub fn publication_relevance(publication: &Publication, member_name: Option<&str>, term: &str) -> i32 {
    let needle = term.trim().to_lowercase();
    let mut score = match_score(&publication.title, &needle, 100, 80, 60)
        + match_score(publication.subtitle.as_deref().unwrap_or_default(), &needle, 40, 30, 25)
        + match_score(publication.primary_identifier().unwrap_or_default(), &needle, 40, 40, 40)
        + match_score(member_name.unwrap_or_default(), &needle, 15, 15, 15);
    if publication.is_active {
        score += ACTIVE_BONUS;
    }
    score
        + match publication.publication_type {
            PublicationType::Journal => 5,
            PublicationType::Book => 3,
            PublicationType::BookSeries | PublicationType::BookSet => 2,
        }
}

/// Best first; ties go to the newer entity, then the lower id
fn rank(hits: &mut [SearchHit]) {
    hits.sort_by_key(|hit| (Reverse(hit.relevance), Reverse(hit.created_at), hit.id));
}

fn member_hit(member: Member, relevance: i32) -> SearchHit {
    SearchHit {
        entity_type: "member".to_string(),
        id: member.id,
        url: format!("/members/{}", member.id),
        title: member.name,
        subtitle: member.institution,
        is_active: member.is_active,
        member_name: None,
        relevance,
        created_at: member.created_at,
    }
}

fn publication_hit(publication: Publication, member_name: Option<String>, relevance: i32) -> SearchHit {
    let subtitle = match member_name.as_deref() {
        Some(member) => format!("{} - {member}", publication.publication_type),
        None => publication.publication_type.to_string(),
    };
    SearchHit {
        entity_type: "publication".to_string(),
        id: publication.id,
        url: format!("/publications/{}", publication.id),
        title: publication.title,
        subtitle,
        is_active: publication.is_active,
        member_name,
        relevance,
        created_at: publication.created_at,
    }
}

fn suggestion(entity_type: &str, label: &str, text: String) -> SearchSuggestion {
    let shown = if text.chars().count() > SUGGESTION_LABEL_CHARS {
        let cut: String = text.chars().take(SUGGESTION_LABEL_CHARS).collect();
        format!("{cut}...")
    } else {
        text.clone()
    };
    SearchSuggestion {
        entity_type: entity_type.to_string(),
        label: format!("{label}: {shown}"),
        text,
    }
}
