//! Worker request and response types.
//!
//! The dispatcher never awaits the network itself. It emits a
//! [`WorkerMessage`], the runtime hands it to the worker on a spawned task,
//! and the outcome comes back as a [`WorkerResponse`] event. Every message
//! names its listing so that responses for a tab the user has already left
//! can be recognised and dropped.

use crate::app::filter::FilterState;
use crate::app::form::FormSubmission;
use crate::app::loader::PageResult;
use crate::domain::{ApiError, LoadError, Record, ResourceKind};

/// Requests handled by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    /// Load one page of a listing.
    LoadPage {
        /// Request token; only the latest token is displayed.
        token: u64,
        /// Filter snapshot taken when the load started.
        filter: FilterState,
    },

    /// Fetch one full record for the edit form.
    FetchRecord { resource: ResourceKind, id: String },

    /// Delete a record after the user confirmed.
    DeleteRecord { resource: ResourceKind, id: String },

    /// Create or update a record.
    SaveRecord {
        resource: ResourceKind,
        submission: FormSubmission,
    },

    /// Add a product to, or remove it from, the wishlist.
    SetWishlist {
        resource: ResourceKind,
        id: String,
        wishlisted: bool,
    },
}

impl WorkerMessage {
    #[must_use]
    pub fn load_page(token: u64, filter: FilterState) -> Self {
        Self::LoadPage { token, filter }
    }

    #[must_use]
    pub fn fetch_record(resource: ResourceKind, id: impl Into<String>) -> Self {
        Self::FetchRecord {
            resource,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn delete_record(resource: ResourceKind, id: impl Into<String>) -> Self {
        Self::DeleteRecord {
            resource,
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn save_record(resource: ResourceKind, submission: FormSubmission) -> Self {
        Self::SaveRecord {
            resource,
            submission,
        }
    }

    #[must_use]
    pub fn set_wishlist(resource: ResourceKind, id: impl Into<String>, wishlisted: bool) -> Self {
        Self::SetWishlist {
            resource,
            id: id.into(),
            wishlisted,
        }
    }

    /// Listing the message belongs to.
    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        match self {
            Self::LoadPage { filter, .. } => filter.resource,
            Self::FetchRecord { resource, .. }
            | Self::DeleteRecord { resource, .. }
            | Self::SaveRecord { resource, .. }
            | Self::SetWishlist { resource, .. } => *resource,
        }
    }
}

/// Outcomes reported back by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// A list load finished.
    PageLoaded {
        resource: ResourceKind,
        token: u64,
        result: Result<PageResult, LoadError>,
    },

    /// A single-record fetch finished.
    RecordFetched {
        resource: ResourceKind,
        id: String,
        result: Result<Record, ApiError>,
    },

    /// A delete finished.
    RecordDeleted {
        resource: ResourceKind,
        id: String,
        result: Result<(), ApiError>,
    },

    /// A create or update finished.
    RecordSaved {
        resource: ResourceKind,
        created: bool,
        result: Result<(), ApiError>,
    },

    /// A wishlist change finished.
    WishlistUpdated {
        resource: ResourceKind,
        id: String,
        wishlisted: bool,
        result: Result<(), ApiError>,
    },
}

impl WorkerResponse {
    /// Listing the response belongs to.
    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        match self {
            Self::PageLoaded { resource, .. }
            | Self::RecordFetched { resource, .. }
            | Self::RecordDeleted { resource, .. }
            | Self::RecordSaved { resource, .. }
            | Self::WishlistUpdated { resource, .. } => *resource,
        }
    }

    /// Returns `true` if the call failed with HTTP 401.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::PageLoaded { result, .. } => result
                .as_ref()
                .err()
                .is_some_and(|e| e.source.is_unauthorized()),
            Self::RecordFetched { result, .. } => {
                result.as_ref().err().is_some_and(ApiError::is_unauthorized)
            }
            Self::RecordDeleted { result, .. }
            | Self::RecordSaved { result, .. }
            | Self::WishlistUpdated { result, .. } => {
                result.as_ref().err().is_some_and(ApiError::is_unauthorized)
            }
        }
    }
}
