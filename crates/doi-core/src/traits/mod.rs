//! Repository traits

mod repositories;

pub use repositories::{
    ActionCount, ActivityLogRepository, ActivityQuery, ArticleMutation, ArticleRepository,
    AuthorRepository, IpFilter, MemberQuery, MemberRepository, MemberStats, PublicationQuery,
    PublicationRepository, PublicationStats, RepoResult, SponsorRepository, UserRepository,
};
