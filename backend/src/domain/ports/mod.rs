//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters.
//! Driving ports (`*Command`, `*Query`) are implemented by domain services
//! and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod bid_command;
mod bid_query;
mod bid_repository;
mod organization_command;
mod organization_query;
mod organization_repository;
mod tender_command;
mod tender_query;
mod tender_repository;
mod user_command;
mod user_query;
mod user_repository;

#[cfg(test)]
pub use bid_command::MockBidCommand;
pub use bid_command::{
    BidCommand, CreateBidRequest, SubmitDecisionRequest, TransitionBidRequest, UpdateBidRequest,
};
#[cfg(test)]
pub use bid_query::MockBidQuery;
pub use bid_query::{BidQuery, BidStatusRequest, ListMyBidsRequest, ListTenderBidsRequest};
#[cfg(test)]
pub use bid_repository::MockBidRepository;
pub use bid_repository::{BidRepository, BidRepositoryError};
#[cfg(test)]
pub use organization_command::MockOrganizationCommand;
pub use organization_command::{
    CreateOrganizationRequest, MakeResponsibleRequest, OrganizationCommand,
    UpdateOrganizationRequest,
};
#[cfg(test)]
pub use organization_query::MockOrganizationQuery;
pub use organization_query::{ListOrganizationsRequest, OrganizationQuery};
#[cfg(test)]
pub use organization_repository::MockOrganizationRepository;
pub use organization_repository::{OrganizationRepository, OrganizationRepositoryError};
#[cfg(test)]
pub use tender_command::MockTenderCommand;
pub use tender_command::{
    CreateTenderRequest, TenderCommand, TransitionTenderRequest, UpdateTenderRequest,
};
#[cfg(test)]
pub use tender_query::MockTenderQuery;
pub use tender_query::{ListMyTendersRequest, ListTendersRequest, TenderQuery, TenderStatusRequest};
#[cfg(test)]
pub use tender_repository::MockTenderRepository;
pub use tender_repository::{TenderRepository, TenderRepositoryError};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::{RegisterUserRequest, UserCommand};
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
