//! # doi-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services are constructed per call over a shared [`ServiceContext`] and
//! receive the caller's [`RequestContext`] explicitly.

pub mod dto;
pub mod services;

pub use services::{
    ActivityLogger, ActivityService, ArticleService, AuthService, DashboardService,
    MemberService, PublicationService, RequestContext, SearchService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SponsorService, UserService,
};
