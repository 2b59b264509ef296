//! Meeting repository contract and the meeting service.
//!
//! - [`MeetingRepository`] - Storage/transport for wire meetings
//! - [`InMemoryRepository`] - Process-local repository, also the test fake
//! - [`MeetingService`] - Fetch → decode → classify, and draft → encode → create
//! - [`RepositoryError`] - Error types for repository operations
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use convene_core::{MeetingTimeCodec, SystemClock};
//! use convene_repository::{FetchOptions, InMemoryRepository, MeetingService};
//!
//! let service = MeetingService::new(
//!     Arc::new(InMemoryRepository::new()),
//!     MeetingTimeCodec::local(SystemClock::shared()),
//! );
//! let buckets = service.meetings_by_status(FetchOptions::new().with_group("g-1")).await?;
//! ```

pub mod error;
pub mod memory;
pub mod repository;
pub mod service;

pub use error::{RepositoryError, RepositoryErrorCode, RepositoryResult};
pub use memory::InMemoryRepository;
pub use repository::{BoxFuture, ErrorRepository, FetchOptions, MeetingRepository, decode_meetings};
pub use service::{MeetingService, ServiceError};
