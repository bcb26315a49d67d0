//! Scenario world shared by the brokerage behaviour suites.
//!
//! Each scenario gets a fresh [`InMemoryStore`] wired through the real
//! services, so steps exercise the same rules the HTTP adapter reaches. The
//! world owns a Tokio runtime and blocks on each port call.

use std::future::Future;
use std::sync::Arc;

use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tender_backend::domain::ports::{
    CreateOrganizationRequest, CreateTenderRequest, MakeResponsibleRequest, RegisterUserRequest,
    TransitionTenderRequest,
};
use tender_backend::domain::{BidId, Error, OrganizationId, TenderId, Username};
use tender_backend::inbound::http::state::HttpStatePorts;
use tender_backend::test_support::clock::MutableClock;
use tender_backend::test_support::memory::InMemoryStore;
use tokio::runtime::Runtime;

/// Wrapper so the runtime can live in a `Slot`.
#[derive(Clone)]
pub(crate) struct RuntimeHandle(Arc<Runtime>);

#[derive(Default, ScenarioState)]
pub(crate) struct BrokerageWorld {
    runtime: Slot<RuntimeHandle>,
    ports: Slot<HttpStatePorts>,
    pub(crate) organization: Slot<OrganizationId>,
    pub(crate) tender: Slot<TenderId>,
    pub(crate) bid: Slot<BidId>,
    outcome: Slot<Result<(), Error>>,
}

pub(crate) fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

impl BrokerageWorld {
    fn ensure_started(&self) {
        if self.ports.get().is_some() {
            return;
        }
        let runtime = Runtime::new().expect("create runtime");
        let store = InMemoryStore::new();
        self.ports
            .set(store.ports(Arc::new(MutableClock::at_epoch())));
        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
    }

    pub(crate) fn ports(&self) -> HttpStatePorts {
        self.ensure_started();
        self.ports.get().expect("ports")
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.ensure_started();
        let handle = self.runtime.get().expect("runtime");
        handle.0.block_on(future)
    }

    /// Remember whether the last action succeeded and hand back its value.
    pub(crate) fn record<T>(&self, result: Result<T, Error>) -> Option<T> {
        match result {
            Ok(value) => {
                self.outcome.set(Ok(()));
                Some(value)
            }
            Err(error) => {
                self.outcome.set(Err(error));
                None
            }
        }
    }

    pub(crate) fn assert_succeeded(&self) {
        match self.outcome.get().expect("an action was performed") {
            Ok(()) => {}
            Err(error) => panic!("expected success, got {error:?}"),
        }
    }

    pub(crate) fn assert_failed_with(&self, code: &str) {
        match self.outcome.get().expect("an action was performed") {
            Ok(()) => panic!("expected {code}, but the action succeeded"),
            Err(error) => {
                let actual = serde_json::to_value(error.code()).expect("serialise code");
                assert_eq!(actual, serde_json::Value::from(code), "{error:?}");
            }
        }
    }

    pub(crate) fn register(&self, name: &str) {
        let ports = self.ports();
        self.block_on(ports.users.register(RegisterUserRequest {
            username: username(name),
            first_name: name.to_owned(),
            last_name: "Tester".to_owned(),
        }))
        .expect("register user");
    }

    pub(crate) fn make_responsible(&self, name: &str) {
        let ports = self.ports();
        let organization_id = self.organization.get().expect("organization");
        self.block_on(ports.organizations.make_responsible(MakeResponsibleRequest {
            organization_id,
            username: username(name),
        }))
        .expect("grant responsibility");
    }

    /// Register `user`, create organization `name` and make the user responsible.
    pub(crate) fn organization_with_responsible(&self, name: &str, user: &str) {
        self.register(user);
        let ports = self.ports();
        let organization = self
            .block_on(ports.organizations.create(CreateOrganizationRequest {
                name: name.to_owned(),
                description: format!("{name} holdings"),
                organization_type: "LLC".to_owned(),
            }))
            .expect("create organization");
        self.organization.set(organization.id);
        self.make_responsible(user);
    }

    pub(crate) fn create_tender(&self, user: &str, name: &str, status: &str) {
        let ports = self.ports();
        let organization_id = self.organization.get().expect("organization");
        let result = self.block_on(ports.tenders.create(CreateTenderRequest {
            username: username(user),
            organization_id,
            name: name.to_owned(),
            description: format!("{name} works"),
            service_type: "Construction".to_owned(),
            status: status.to_owned(),
        }));
        if let Some(tender) = self.record(result) {
            self.tender.set(tender.id);
        }
    }

    pub(crate) fn set_tender_status(&self, user: &str, status: &str) {
        let ports = self.ports();
        let tender_id = self.tender.get().expect("tender");
        let result = self.block_on(ports.tenders.transition_status(TransitionTenderRequest {
            tender_id,
            username: username(user),
            status: status.to_owned(),
        }));
        self.record(result);
    }
}
