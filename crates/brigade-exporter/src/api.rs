//! Capability traits the scrape engine consumes.
//!
//! The engine only needs the four paginated list operations, split along
//! the API's own facet boundary. `brigade-sdk`'s client facets implement
//! them; tests substitute scripted mocks.

use std::future::Future;

use brigade_sdk::{
    ApiError, AuthnClient, CoreClient, Event, EventsSelector, List, ListOptions, Project,
    ProjectsSelector, ServiceAccount, ServiceAccountsSelector, User, UsersSelector,
};

/// The core facet: projects and events.
pub trait CoreApi: Send + Sync + 'static {
    fn list_projects(
        &self,
        selector: &ProjectsSelector,
        opts: &ListOptions,
    ) -> impl Future<Output = Result<List<Project>, ApiError>> + Send;

    fn list_events(
        &self,
        selector: &EventsSelector,
        opts: &ListOptions,
    ) -> impl Future<Output = Result<List<Event>, ApiError>> + Send;
}

/// The authn facet: users and service accounts.
pub trait AuthnApi: Send + Sync + 'static {
    fn list_users(
        &self,
        selector: &UsersSelector,
        opts: &ListOptions,
    ) -> impl Future<Output = Result<List<User>, ApiError>> + Send;

    fn list_service_accounts(
        &self,
        selector: &ServiceAccountsSelector,
        opts: &ListOptions,
    ) -> impl Future<Output = Result<List<ServiceAccount>, ApiError>> + Send;
}

impl CoreApi for CoreClient {
    fn list_projects(
        &self,
        selector: &ProjectsSelector,
        opts: &ListOptions,
    ) -> impl Future<Output = Result<List<Project>, ApiError>> + Send {
        CoreClient::list_projects(self, selector, opts)
    }

    fn list_events(
        &self,
        selector: &EventsSelector,
        opts: &ListOptions,
    ) -> impl Future<Output = Result<List<Event>, ApiError>> + Send {
        CoreClient::list_events(self, selector, opts)
    }
}

impl AuthnApi for AuthnClient {
    fn list_users(
        &self,
        selector: &UsersSelector,
        opts: &ListOptions,
    ) -> impl Future<Output = Result<List<User>, ApiError>> + Send {
        AuthnClient::list_users(self, selector, opts)
    }

    fn list_service_accounts(
        &self,
        selector: &ServiceAccountsSelector,
        opts: &ListOptions,
    ) -> impl Future<Output = Result<List<ServiceAccount>, ApiError>> + Send {
        AuthnClient::list_service_accounts(self, selector, opts)
    }
}
