//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and the integration suites under `tests/`.
//! Compiled for `cfg(test)` and behind the `test-support` feature.

pub mod clock {
    //! A clock the test controls.

    use std::sync::{Mutex, MutexGuard};

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Clock returning a stored instant until told otherwise.
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Clock fixed at 2024-01-01T00:00:00Z.
        pub fn at_epoch() -> Self {
            let start = match Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single() {
                Some(start) => start,
                None => panic!("fixed clock start is unambiguous"),
            };
            Self::new(start)
        }

        pub fn advance_seconds(&self, seconds: i64) {
            *self.lock_clock() += TimeDelta::seconds(seconds);
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod memory {
    //! In-memory driven adapters.
    //!
    //! [`InMemoryStore`] implements all four repository ports over one set of
    //! tables so that responsibility grants recorded through the organization
    //! port are visible to the user port. Identifiers are assigned per table
    //! starting at 1, and listings follow the same ordering and filtering as
    //! the PostgreSQL adapters.

    use std::sync::{Arc, Mutex, MutexGuard};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use pagination::Page;

    use crate::domain::ports::{
        BidRepository, BidRepositoryError, OrganizationRepository, OrganizationRepositoryError,
        TenderRepository, TenderRepositoryError, UserRepository, UserRepositoryError,
    };
    use crate::domain::{
        Bid, BidChanges, BidId, BidOrigin, BidStatus, NewBid, NewTender, NewUser, Organization,
        OrganizationDraft, OrganizationId, OrganizationType, ServiceType, Tender, TenderChanges,
        TenderId, TenderStatus, User, UserId, Username,
    };
    use crate::inbound::http::state::HttpStatePorts;

    use super::clock::MutableClock;

    #[derive(Debug, Clone, Copy)]
    struct Grant {
        organization_id: OrganizationId,
        user_id: UserId,
    }

    #[derive(Default)]
    struct Tables {
        users: Vec<User>,
        organizations: Vec<Organization>,
        grants: Vec<Grant>,
        tenders: Vec<Tender>,
        bids: Vec<Bid>,
    }

    const POISONED: &str = "in-memory store lock poisoned";

    /// Shared tables behind every repository port.
    #[derive(Clone, Default)]
    pub struct InMemoryStore {
        tables: Arc<Mutex<Tables>>,
    }

    impl InMemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Build driving ports over this store with the given clock.
        pub fn ports(&self, clock: Arc<MutableClock>) -> HttpStatePorts {
            let store = Arc::new(self.clone());
            HttpStatePorts::from_repositories(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                store,
                clock,
            )
        }

        fn lock(&self) -> Option<MutexGuard<'_, Tables>> {
            self.tables.lock().ok()
        }
    }

    fn next_id(len: usize) -> i32 {
        i32::try_from(len).map_or(i32::MAX, |n| n.saturating_add(1))
    }

    fn tender_key(tender: &Tender) -> (String, i32) {
        (tender.name.clone(), tender.id.get())
    }

    fn bid_key(bid: &Bid) -> (String, i32) {
        (bid.name.clone(), bid.id.get())
    }

    #[async_trait]
    impl UserRepository for InMemoryStore {
        async fn find_by_username(
            &self,
            username: &Username,
        ) -> Result<Option<User>, UserRepositoryError> {
            let tables = self.lock().ok_or_else(|| UserRepositoryError::connection(POISONED))?;
            Ok(tables.users.iter().find(|u| &u.username == username).cloned())
        }

        async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
            let mut tables = self.lock().ok_or_else(|| UserRepositoryError::connection(POISONED))?;
            if tables.users.iter().any(|u| u.username == user.username) {
                return Err(UserRepositoryError::duplicate_username(
                    user.username.to_string(),
                ));
            }
            let created = User {
                id: UserId::new(next_id(tables.users.len())),
                username: user.username.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                created_at: user.created_at,
            };
            tables.users.push(created.clone());
            Ok(created)
        }

        async fn responsible_organization_ids(
            &self,
            user_id: UserId,
        ) -> Result<Vec<OrganizationId>, UserRepositoryError> {
            let tables = self.lock().ok_or_else(|| UserRepositoryError::connection(POISONED))?;
            Ok(tables
                .grants
                .iter()
                .filter(|g| g.user_id == user_id)
                .map(|g| g.organization_id)
                .collect())
        }
    }

    #[async_trait]
    impl OrganizationRepository for InMemoryStore {
        async fn find_by_id(
            &self,
            id: OrganizationId,
        ) -> Result<Option<Organization>, OrganizationRepositoryError> {
            let tables = self
                .lock()
                .ok_or_else(|| OrganizationRepositoryError::connection(POISONED))?;
            Ok(tables.organizations.iter().find(|o| o.id == id).cloned())
        }

        async fn create(
            &self,
            draft: &OrganizationDraft,
            created_at: DateTime<Utc>,
        ) -> Result<Organization, OrganizationRepositoryError> {
            let mut tables = self
                .lock()
                .ok_or_else(|| OrganizationRepositoryError::connection(POISONED))?;
            let created = Organization {
                id: OrganizationId::new(next_id(tables.organizations.len())),
                name: draft.name.clone(),
                description: draft.description.clone(),
                organization_type: draft.organization_type,
                created_at,
            };
            tables.organizations.push(created.clone());
            Ok(created)
        }

        async fn update(
            &self,
            id: OrganizationId,
            draft: &OrganizationDraft,
        ) -> Result<Option<Organization>, OrganizationRepositoryError> {
            let mut tables = self
                .lock()
                .ok_or_else(|| OrganizationRepositoryError::connection(POISONED))?;
            Ok(tables.organizations.iter_mut().find(|o| o.id == id).map(|org| {
                org.name.clone_from(&draft.name);
                org.description.clone_from(&draft.description);
                org.organization_type = draft.organization_type;
                org.clone()
            }))
        }

        async fn list(
            &self,
            organization_type: Option<OrganizationType>,
            page: Page,
        ) -> Result<Vec<Organization>, OrganizationRepositoryError> {
            let tables = self
                .lock()
                .ok_or_else(|| OrganizationRepositoryError::connection(POISONED))?;
            let mut matching: Vec<Organization> = tables
                .organizations
                .iter()
                .filter(|o| organization_type.is_none_or(|kind| o.organization_type == kind))
                .cloned()
                .collect();
            matching.sort_by_key(|o| (o.name.clone(), o.id.get()));
            Ok(page.window(matching))
        }

        async fn is_responsible(
            &self,
            organization_id: OrganizationId,
            user_id: UserId,
        ) -> Result<bool, OrganizationRepositoryError> {
            let tables = self
                .lock()
                .ok_or_else(|| OrganizationRepositoryError::connection(POISONED))?;
            Ok(tables
                .grants
                .iter()
                .any(|g| g.organization_id == organization_id && g.user_id == user_id))
        }

        async fn make_responsible(
            &self,
            organization_id: OrganizationId,
            user_id: UserId,
        ) -> Result<(), OrganizationRepositoryError> {
            let mut tables = self
                .lock()
                .ok_or_else(|| OrganizationRepositoryError::connection(POISONED))?;
            if tables
                .grants
                .iter()
                .any(|g| g.organization_id == organization_id && g.user_id == user_id)
            {
                return Err(OrganizationRepositoryError::already_responsible(
                    organization_id.get(),
                    user_id.get(),
                ));
            }
            tables.grants.push(Grant {
                organization_id,
                user_id,
            });
            Ok(())
        }
    }

    #[async_trait]
    impl TenderRepository for InMemoryStore {
        async fn create(&self, tender: &NewTender) -> Result<Tender, TenderRepositoryError> {
            let mut tables = self
                .lock()
                .ok_or_else(|| TenderRepositoryError::connection(POISONED))?;
            let created = Tender {
                id: TenderId::new(next_id(tables.tenders.len())),
                name: tender.name.clone(),
                description: tender.description.clone(),
                service_type: tender.service_type,
                status: TenderStatus::Created,
                version: 1,
                organization_id: tender.organization_id,
                creator_id: tender.creator_id,
                created_at: tender.created_at,
            };
            tables.tenders.push(created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, id: TenderId) -> Result<Option<Tender>, TenderRepositoryError> {
            let tables = self
                .lock()
                .ok_or_else(|| TenderRepositoryError::connection(POISONED))?;
            Ok(tables.tenders.iter().find(|t| t.id == id).cloned())
        }

        async fn list_published(
            &self,
            service_type: Option<ServiceType>,
            page: Page,
        ) -> Result<Vec<Tender>, TenderRepositoryError> {
            let tables = self
                .lock()
                .ok_or_else(|| TenderRepositoryError::connection(POISONED))?;
            let mut matching: Vec<Tender> = tables
                .tenders
                .iter()
                .filter(|t| t.status == TenderStatus::Published)
                .filter(|t| service_type.is_none_or(|kind| t.service_type == kind))
                .cloned()
                .collect();
            matching.sort_by_key(tender_key);
            Ok(page.window(matching))
        }

        async fn list_for_organization(
            &self,
            organization_id: OrganizationId,
        ) -> Result<Vec<Tender>, TenderRepositoryError> {
            let tables = self
                .lock()
                .ok_or_else(|| TenderRepositoryError::connection(POISONED))?;
            let mut matching: Vec<Tender> = tables
                .tenders
                .iter()
                .filter(|t| t.organization_id == organization_id)
                .cloned()
                .collect();
            matching.sort_by_key(tender_key);
            Ok(matching)
        }

        async fn list_for_creator(
            &self,
            creator_id: UserId,
        ) -> Result<Vec<Tender>, TenderRepositoryError> {
            let tables = self
                .lock()
                .ok_or_else(|| TenderRepositoryError::connection(POISONED))?;
            let mut matching: Vec<Tender> = tables
                .tenders
                .iter()
                .filter(|t| t.creator_id == creator_id)
                .cloned()
                .collect();
            matching.sort_by_key(tender_key);
            Ok(matching)
        }

        async fn update_status(
            &self,
            id: TenderId,
            status: TenderStatus,
        ) -> Result<Option<Tender>, TenderRepositoryError> {
            let mut tables = self
                .lock()
                .ok_or_else(|| TenderRepositoryError::connection(POISONED))?;
            Ok(tables.tenders.iter_mut().find(|t| t.id == id).map(|tender| {
                tender.status = status;
                tender.version += 1;
                tender.clone()
            }))
        }

        async fn update_fields(
            &self,
            id: TenderId,
            changes: &TenderChanges,
        ) -> Result<Option<Tender>, TenderRepositoryError> {
            let mut tables = self
                .lock()
                .ok_or_else(|| TenderRepositoryError::connection(POISONED))?;
            Ok(tables.tenders.iter_mut().find(|t| t.id == id).map(|tender| {
                changes.apply_to(tender);
                tender.version += 1;
                tender.clone()
            }))
        }
    }

    #[async_trait]
    impl BidRepository for InMemoryStore {
        async fn create(&self, bid: &NewBid) -> Result<Bid, BidRepositoryError> {
            let mut tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            let created = Bid {
                id: BidId::new(next_id(tables.bids.len())),
                name: bid.name.clone(),
                description: bid.description.clone(),
                status: BidStatus::Created,
                version: 1,
                tender_id: bid.tender_id,
                creator_id: bid.creator_id,
                origin: bid.origin,
                created_at: bid.created_at,
            };
            tables.bids.push(created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, id: BidId) -> Result<Option<Bid>, BidRepositoryError> {
            let tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            Ok(tables.bids.iter().find(|b| b.id == id).cloned())
        }

        async fn list_published_for_tender(
            &self,
            tender_id: TenderId,
            page: Page,
        ) -> Result<Vec<Bid>, BidRepositoryError> {
            let tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            let mut matching: Vec<Bid> = tables
                .bids
                .iter()
                .filter(|b| b.tender_id == tender_id && b.status == BidStatus::Published)
                .cloned()
                .collect();
            matching.sort_by_key(bid_key);
            Ok(page.window(matching))
        }

        async fn list_for_organization(
            &self,
            organization_id: OrganizationId,
        ) -> Result<Vec<Bid>, BidRepositoryError> {
            let tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            let mut matching: Vec<Bid> = tables
                .bids
                .iter()
                .filter(|b| b.origin.organization_id() == Some(organization_id))
                .cloned()
                .collect();
            matching.sort_by_key(bid_key);
            Ok(matching)
        }

        async fn list_personal_for_creator(
            &self,
            creator_id: UserId,
        ) -> Result<Vec<Bid>, BidRepositoryError> {
            let tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            let mut matching: Vec<Bid> = tables
                .bids
                .iter()
                .filter(|b| b.creator_id == creator_id && b.origin == BidOrigin::Personal)
                .cloned()
                .collect();
            matching.sort_by_key(bid_key);
            Ok(matching)
        }

        async fn user_has_bid(
            &self,
            tender_id: TenderId,
            creator_id: UserId,
        ) -> Result<bool, BidRepositoryError> {
            let tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            Ok(tables.bids.iter().any(|b| {
                b.tender_id == tender_id
                    && b.creator_id == creator_id
                    && b.origin == BidOrigin::Personal
                    && b.is_active()
            }))
        }

        async fn organization_has_bid(
            &self,
            tender_id: TenderId,
            organization_id: OrganizationId,
        ) -> Result<bool, BidRepositoryError> {
            let tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            Ok(tables.bids.iter().any(|b| {
                b.tender_id == tender_id
                    && b.origin.organization_id() == Some(organization_id)
                    && b.is_active()
            }))
        }

        async fn update_status(
            &self,
            id: BidId,
            status: BidStatus,
        ) -> Result<Option<Bid>, BidRepositoryError> {
            let mut tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            Ok(tables.bids.iter_mut().find(|b| b.id == id).map(|bid| {
                bid.status = status;
                bid.version += 1;
                bid.clone()
            }))
        }

        async fn update_fields(
            &self,
            id: BidId,
            changes: &BidChanges,
        ) -> Result<Option<Bid>, BidRepositoryError> {
            let mut tables = self.lock().ok_or_else(|| BidRepositoryError::connection(POISONED))?;
            Ok(tables.bids.iter_mut().find(|b| b.id == id).map(|bid| {
                changes.apply_to(bid);
                bid.version += 1;
                bid.clone()
            }))
        }
    }
}

pub mod openapi {
    //! OpenAPI schema traversal helpers.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Extract an `Object` schema, panicking with the schema name otherwise.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => panic!(
                "schema '{name}' is a $ref to '{}'",
                reference.ref_location
            ),
            _ => panic!("schema '{name}' is not an object"),
        }
    }

    /// Property names of a registered component schema.
    pub fn component_fields(doc: &utoipa::openapi::OpenApi, name: &str) -> Vec<String> {
        let Some(components) = doc.components.as_ref() else {
            panic!("document has no components");
        };
        let Some(schema) = components.schemas.get(name) else {
            panic!("schema '{name}' is not registered");
        };
        unwrap_object_schema(schema, name)
            .properties
            .keys()
            .cloned()
            .collect()
    }
}
