//! Driving port for tender mutations.
//!
//! Status and service type arrive as raw text so the domain decides which
//! error kind a bad literal earns.

use async_trait::async_trait;

use crate::domain::{Error, OrganizationId, Tender, TenderId, Username};

/// Request to open a new tender for an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTenderRequest {
    pub username: Username,
    pub organization_id: OrganizationId,
    pub name: String,
    pub description: String,
    pub service_type: String,
    /// Must spell `Created`; any other initial status is refused.
    pub status: String,
}

/// Request to move a tender to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTenderRequest {
    pub tender_id: TenderId,
    pub username: Username,
    pub status: String,
}

/// Request to edit a tender's descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTenderRequest {
    pub tender_id: TenderId,
    pub username: Username,
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<String>,
}

/// Driving port for tender mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderCommand: Send + Sync {
    /// Create a tender in status `Created` with version 1.
    async fn create(&self, request: CreateTenderRequest) -> Result<Tender, Error>;

    /// Set a tender's status. Any responsible user may choose any status.
    async fn transition_status(&self, request: TransitionTenderRequest) -> Result<Tender, Error>;

    /// Apply non-empty fields and bump the version.
    async fn update(&self, request: UpdateTenderRequest) -> Result<Tender, Error>;
}

