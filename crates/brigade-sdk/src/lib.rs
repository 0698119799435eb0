//! brigade-sdk — client for the Brigade v2 API.
//!
//! Mirrors the facet structure of the upstream API: an [`ApiClient`] hands
//! out a [`CoreClient`] (projects, events) and an [`AuthnClient`] (users,
//! service accounts). All list operations accept a selector plus
//! [`ListOptions`] and return a paginated [`List`] envelope.
//!
//! ```no_run
//! use brigade_sdk::{ApiClient, EventsSelector, ListOptions, WorkerPhase};
//!
//! # async fn example() -> Result<(), brigade_sdk::ApiError> {
//! let client = ApiClient::new("http://brigade-apiserver:8080", "token");
//! let events = client
//!     .core()
//!     .list_events(
//!         &EventsSelector {
//!             worker_phases: vec![WorkerPhase::Running],
//!         },
//!         &ListOptions::default(),
//!     )
//!     .await?;
//! println!("{} running workers", events.total());
//! # Ok(())
//! # }
//! ```

pub mod authn;
pub mod client;
pub mod core;
pub mod error;
pub mod meta;

pub use authn::{ServiceAccount, ServiceAccountsSelector, User, UsersSelector};
pub use client::{ApiClient, AuthnClient, CoreClient};
pub use core::{
    Event, EventsSelector, Job, JobPhase, JobStatus, Project, ProjectsSelector, Worker,
    WorkerPhase, WorkerStatus,
};
pub use error::ApiError;
pub use meta::{List, ListMeta, ListOptions, ObjectMeta};
