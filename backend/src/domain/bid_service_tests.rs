//! Tests for the bid lifecycle service.
//!
//! Cast: alice (1) is responsible for org 7 which owns tender 42; bob (2) is
//! responsible for org 9; carol (3) bids personally.

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;
use pagination::Page;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    BidRepositoryError, MockBidRepository, MockOrganizationRepository, MockTenderRepository,
    MockUserRepository,
};
use crate::domain::{
    AuthorType, ErrorCode, Organization, OrganizationType, ServiceType, TenderStatus, Username,
};

const ALICE: i32 = 1;
const BOB: i32 = 2;
const CAROL: i32 = 3;
const TENDER_ORG: i32 = 7;
const BIDDER_ORG: i32 = 9;
const TENDER: i32 = 42;

type Service =
    BidService<MockUserRepository, MockOrganizationRepository, MockTenderRepository, MockBidRepository>;

fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

fn known_user(name: &str) -> Option<User> {
    let id = match name {
        "alice" => ALICE,
        "bob" => BOB,
        "carol" => CAROL,
        _ => return None,
    };
    Some(User {
        id: UserId::new(id),
        username: username(name),
        first_name: name.to_owned(),
        last_name: "Tester".to_owned(),
        created_at: Utc::now(),
    })
}

fn bid(id: i32, status: BidStatus, creator: i32, origin: BidOrigin) -> Bid {
    Bid {
        id: BidId::new(id),
        name: "Offer".to_owned(),
        description: "Cheap and fast".to_owned(),
        status,
        version: 1,
        tender_id: TenderId::new(TENDER),
        creator_id: UserId::new(creator),
        origin,
        created_at: Utc::now(),
    }
}

fn bob_bid(status: BidStatus) -> Bid {
    bid(100, status, BOB, BidOrigin::Organization(OrganizationId::new(BIDDER_ORG)))
}

struct Stores {
    users: MockUserRepository,
    organizations: MockOrganizationRepository,
    tenders: MockTenderRepository,
    bids: MockBidRepository,
}

impl Stores {
    fn into_service(self) -> Service {
        BidService::new(
            Arc::new(self.users),
            Arc::new(self.organizations),
            Arc::new(self.tenders),
            Arc::new(self.bids),
            Arc::new(DefaultClock),
        )
    }

    fn with_bid(mut self, stored: Bid) -> Self {
        self.bids
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        self
    }
}

#[fixture]
fn stores() -> Stores {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .returning(|name| Ok(known_user(name.as_ref())));

    let mut organizations = MockOrganizationRepository::new();
    organizations.expect_find_by_id().returning(|id| {
        Ok(matches!(id.get(), TENDER_ORG | BIDDER_ORG).then(|| Organization {
            id,
            name: format!("org-{id}"),
            description: String::new(),
            organization_type: OrganizationType::Jsc,
            created_at: Utc::now(),
        }))
    });
    organizations
        .expect_is_responsible()
        .returning(|org, user| {
            Ok(matches!(
                (org.get(), user.get()),
                (TENDER_ORG, ALICE) | (BIDDER_ORG, BOB)
            ))
        });

    let mut tenders = MockTenderRepository::new();
    tenders.expect_find_by_id().returning(|id| {
        Ok((id.get() == TENDER).then(|| Tender {
            id,
            name: "Bridge".to_owned(),
            description: String::new(),
            service_type: ServiceType::Construction,
            status: TenderStatus::Published,
            version: 2,
            organization_id: OrganizationId::new(TENDER_ORG),
            creator_id: UserId::new(ALICE),
            created_at: Utc::now(),
        }))
    });

    Stores {
        users,
        organizations,
        tenders,
        bids: MockBidRepository::new(),
    }
}

fn create_request(name: &str, organization: Option<i32>) -> CreateBidRequest {
    CreateBidRequest {
        username: username(name),
        tender_id: TenderId::new(TENDER),
        organization_id: organization.map(OrganizationId::new),
        name: "Offer".to_owned(),
        description: "Cheap and fast".to_owned(),
        status: "Created".to_owned(),
    }
}

fn echo_create(bids: &mut MockBidRepository) {
    bids.expect_create().times(1).return_once(|new| {
        Ok(Bid {
            id: BidId::new(100),
            name: new.name.clone(),
            description: new.description.clone(),
            status: BidStatus::Created,
            version: 1,
            tender_id: new.tender_id,
            creator_id: new.creator_id,
            origin: new.origin,
            created_at: new.created_at,
        })
    });
}

#[rstest]
#[tokio::test]
async fn organization_bid_is_authored_as_responsible(mut stores: Stores) {
    stores
        .bids
        .expect_organization_has_bid()
        .withf(|tender, org| tender.get() == TENDER && org.get() == BIDDER_ORG)
        .return_once(|_, _| Ok(false));
    echo_create(&mut stores.bids);

    let created = stores
        .into_service()
        .create(create_request("bob", Some(BIDDER_ORG)))
        .await
        .expect("bob may bid for org 9");
    assert_eq!(created.author_type(), AuthorType::Responsible);
    assert_eq!(created.status, BidStatus::Created);
    assert_eq!(created.version, 1);
}

#[rstest]
#[tokio::test]
async fn personal_bid_is_authored_as_user(mut stores: Stores) {
    stores.bids.expect_user_has_bid().return_once(|_, _| Ok(false));
    echo_create(&mut stores.bids);

    let created = stores
        .into_service()
        .create(create_request("carol", None))
        .await
        .expect("carol may bid personally");
    assert_eq!(created.author_type(), AuthorType::User);
}

#[rstest]
#[tokio::test]
async fn second_personal_bid_conflicts(mut stores: Stores) {
    stores.bids.expect_user_has_bid().return_once(|_, _| Ok(true));
    stores.bids.expect_create().never();

    let err = stores
        .into_service()
        .create(create_request("carol", None))
        .await
        .expect_err("carol already bid");
    assert_eq!(err.code(), ErrorCode::ConflictingBid);
}

#[rstest]
#[tokio::test]
async fn second_organization_bid_conflicts(mut stores: Stores) {
    stores
        .bids
        .expect_organization_has_bid()
        .return_once(|_, _| Ok(true));

    let err = stores
        .into_service()
        .create(create_request("bob", Some(BIDDER_ORG)))
        .await
        .expect_err("org 9 already bid");
    assert_eq!(err.code(), ErrorCode::ConflictingBid);
}

#[rstest]
#[tokio::test]
async fn bidding_on_own_tender_is_forbidden(stores: Stores) {
    let err = stores
        .into_service()
        .create(create_request("alice", Some(TENDER_ORG)))
        .await
        .expect_err("org 7 owns the tender");
    assert_eq!(err.code(), ErrorCode::SelfBidForbidden);
}

#[rstest]
#[case("carol", Some(BIDDER_ORG), ErrorCode::PermissionDenied)]
#[case("bob", Some(404), ErrorCode::NotFound)]
#[case("mallory", None, ErrorCode::NotAuthenticated)]
#[tokio::test]
async fn create_rejections(
    stores: Stores,
    #[case] name: &str,
    #[case] organization: Option<i32>,
    #[case] expected: ErrorCode,
) {
    let err = stores
        .into_service()
        .create(create_request(name, organization))
        .await
        .expect_err("creation is refused");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn create_on_missing_tender_is_not_found(stores: Stores) {
    let mut request = create_request("carol", None);
    request.tender_id = TenderId::new(404);

    let err = stores
        .into_service()
        .create(request)
        .await
        .expect_err("tender is missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_requires_created_literal(stores: Stores) {
    let mut request = create_request("carol", None);
    request.status = "Approved".to_owned();

    let err = stores
        .into_service()
        .create(request)
        .await
        .expect_err("initial status must be Created");
    assert_eq!(err.code(), ErrorCode::InvalidCreationState);
}

fn transition(name: &str, status: &str) -> TransitionBidRequest {
    TransitionBidRequest {
        bid_id: BidId::new(100),
        username: username(name),
        status: status.to_owned(),
    }
}

#[rstest]
#[case("Published", BidStatus::Published)]
#[case("canceled", BidStatus::Canceled)]
#[case("CREATED", BidStatus::Created)]
#[tokio::test]
async fn creator_set_moves_within_creator_vocabulary(
    stores: Stores,
    #[case] raw: &str,
    #[case] expected: BidStatus,
) {
    let mut stores = stores.with_bid(bob_bid(BidStatus::Created));
    stores
        .bids
        .expect_update_status()
        .withf(move |_, status| *status == expected)
        .return_once(|_, status| {
            let mut updated = bob_bid(status);
            updated.version = 2;
            Ok(Some(updated))
        });

    let updated = stores
        .into_service()
        .transition_status(transition("bob", raw))
        .await
        .expect("creator may move the bid");
    assert_eq!(updated.status, expected);
    assert_eq!(updated.version, 2);
}

#[rstest]
#[case("bob", "Approved")]
#[case("alice", "Canceled")]
#[tokio::test]
async fn actors_cannot_cross_vocabularies(stores: Stores, #[case] name: &str, #[case] raw: &str) {
    let mut stores = stores.with_bid(bob_bid(BidStatus::Published));
    stores.bids.expect_update_status().never();

    let err = stores
        .into_service()
        .transition_status(transition(name, raw))
        .await
        .expect_err("status belongs to the other actor set");
    assert_eq!(err.code(), ErrorCode::InvalidStatusValue);
}

#[rstest]
#[tokio::test]
async fn approver_may_reject_published_bid(stores: Stores) {
    let mut stores = stores.with_bid(bob_bid(BidStatus::Published));
    stores
        .bids
        .expect_update_status()
        .return_once(|_, status| Ok(Some(bob_bid(status))));

    let updated = stores
        .into_service()
        .transition_status(transition("alice", "Rejected"))
        .await
        .expect("alice owns the tender");
    assert_eq!(updated.status, BidStatus::Rejected);
}

#[rstest]
#[tokio::test]
async fn approver_cannot_decide_unpublished_bid(stores: Stores) {
    let stores = stores.with_bid(bob_bid(BidStatus::Created));

    let err = stores
        .into_service()
        .transition_status(transition("alice", "Approved"))
        .await
        .expect_err("bid is not published");
    assert_eq!(err.code(), ErrorCode::InvalidStatusValue);
}

#[rstest]
#[tokio::test]
async fn outsider_transition_is_denied(stores: Stores) {
    let stores = stores.with_bid(bob_bid(BidStatus::Published));

    let err = stores
        .into_service()
        .transition_status(transition("carol", "Canceled"))
        .await
        .expect_err("carol is neither author nor approver");
    assert_eq!(err.code(), ErrorCode::PermissionDenied);
}

#[rstest]
#[tokio::test]
async fn unknown_status_is_invalid(stores: Stores) {
    let stores = stores.with_bid(bob_bid(BidStatus::Created));

    let err = stores
        .into_service()
        .transition_status(transition("bob", "Closed"))
        .await
        .expect_err("Closed is a tender status");
    assert_eq!(err.code(), ErrorCode::InvalidStatusValue);
}

fn decision(name: &str, raw: &str) -> SubmitDecisionRequest {
    SubmitDecisionRequest {
        bid_id: BidId::new(100),
        username: username(name),
        decision: raw.to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn decision_approves_published_bid(stores: Stores) {
    let mut stores = stores.with_bid(bob_bid(BidStatus::Published));
    stores
        .bids
        .expect_update_status()
        .withf(|_, status| *status == BidStatus::Approved)
        .return_once(|_, status| Ok(Some(bob_bid(status))));

    let updated = stores
        .into_service()
        .submit_decision(decision("alice", "approved"))
        .await
        .expect("alice may decide");
    assert_eq!(updated.status, BidStatus::Approved);
}

#[rstest]
#[case("bob", "Approved", ErrorCode::PermissionDenied)]
#[case("alice", "Canceled", ErrorCode::InvalidStatusValue)]
#[tokio::test]
async fn decision_rejections(
    stores: Stores,
    #[case] name: &str,
    #[case] raw: &str,
    #[case] expected: ErrorCode,
) {
    let stores = stores.with_bid(bob_bid(BidStatus::Published));

    let err = stores
        .into_service()
        .submit_decision(decision(name, raw))
        .await
        .expect_err("decision is refused");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[case("bob", BidStatus::Created, true)]
#[case("alice", BidStatus::Created, false)]
#[case("alice", BidStatus::Published, true)]
#[case("alice", BidStatus::Approved, true)]
#[case("alice", BidStatus::Canceled, false)]
#[case("bob", BidStatus::Canceled, true)]
#[case("carol", BidStatus::Published, false)]
#[tokio::test]
async fn status_visibility(
    stores: Stores,
    #[case] name: &str,
    #[case] status: BidStatus,
    #[case] visible: bool,
) {
    let stores = stores.with_bid(bob_bid(status));

    let result = stores
        .into_service()
        .get_status(BidStatusRequest {
            bid_id: BidId::new(100),
            username: username(name),
        })
        .await;
    match result {
        Ok(seen) => {
            assert!(visible, "{name} should not see the bid");
            assert_eq!(seen, status);
        }
        Err(err) => {
            assert!(!visible, "{name} should see the bid");
            assert_eq!(err.code(), ErrorCode::PermissionDenied);
        }
    }
}

#[rstest]
#[tokio::test]
async fn author_edits_descriptive_fields(stores: Stores) {
    let mut stores = stores.with_bid(bob_bid(BidStatus::Created));
    stores
        .bids
        .expect_update_fields()
        .withf(|_, changes| changes.name.as_deref() == Some("Better offer") && changes.description.is_none())
        .return_once(|_, changes| {
            let mut updated = bob_bid(BidStatus::Created);
            changes.apply_to(&mut updated);
            updated.version = 2;
            Ok(Some(updated))
        });

    let updated = stores
        .into_service()
        .update(UpdateBidRequest {
            bid_id: BidId::new(100),
            username: username("bob"),
            name: Some("Better offer".to_owned()),
            description: Some(String::new()),
        })
        .await
        .expect("bob may edit");
    assert_eq!(updated.name, "Better offer");
    assert_eq!(updated.description, "Cheap and fast");
    assert_eq!(updated.status, BidStatus::Created);
    assert_eq!(updated.version, 2);
}

#[rstest]
#[tokio::test]
async fn tender_owner_cannot_edit_bid(stores: Stores) {
    let mut stores = stores.with_bid(bob_bid(BidStatus::Published));
    stores.bids.expect_update_fields().never();

    let err = stores
        .into_service()
        .update(UpdateBidRequest {
            bid_id: BidId::new(100),
            username: username("alice"),
            name: Some("Hijacked".to_owned()),
            description: None,
        })
        .await
        .expect_err("alice is an approver, not an author");
    assert_eq!(err.code(), ErrorCode::PermissionDenied);
}

#[rstest]
#[tokio::test]
async fn tender_bids_are_listed_for_owner_only(mut stores: Stores) {
    stores
        .bids
        .expect_list_published_for_tender()
        .withf(|tender, page| tender.get() == TENDER && *page == Page::default())
        .times(1)
        .return_once(|_, _| Ok(vec![bob_bid(BidStatus::Published)]));
    let service = stores.into_service();

    let listed = service
        .list_for_tender(ListTenderBidsRequest {
            tender_id: TenderId::new(TENDER),
            username: username("alice"),
            page: Page::default(),
        })
        .await
        .expect("alice owns the tender");
    assert_eq!(listed.len(), 1);

    let err = service
        .list_for_tender(ListTenderBidsRequest {
            tender_id: TenderId::new(TENDER),
            username: username("bob"),
            page: Page::default(),
        })
        .await
        .expect_err("bob does not own the tender");
    assert_eq!(err.code(), ErrorCode::PermissionDenied);
}

#[rstest]
#[tokio::test]
async fn list_mine_puts_organization_bids_first(mut stores: Stores) {
    stores
        .users
        .expect_responsible_organization_ids()
        .return_once(|_| Ok(vec![OrganizationId::new(BIDDER_ORG)]));
    stores
        .bids
        .expect_list_for_organization()
        .return_once(|_| Ok(vec![bob_bid(BidStatus::Published)]));
    stores.bids.expect_list_personal_for_creator().return_once(|_| {
        Ok(vec![bid(
            200,
            BidStatus::Created,
            BOB,
            BidOrigin::Personal,
        )])
    });

    let listed = stores
        .into_service()
        .list_mine(ListMyBidsRequest {
            username: username("bob"),
            page: Page::default(),
        })
        .await
        .expect("listing succeeds");
    let ids: Vec<i32> = listed.iter().map(|b| b.id.get()).collect();
    assert_eq!(ids, vec![100, 200]);
}

#[rstest]
#[tokio::test]
async fn bid_store_failure_is_internal(stores: Stores) {
    let mut stores = stores;
    stores
        .bids
        .expect_find_by_id()
        .return_once(|_| Err(BidRepositoryError::query("deadlock detected")));

    let err = stores
        .into_service()
        .get_status(BidStatusRequest {
            bid_id: BidId::new(100),
            username: username("bob"),
        })
        .await
        .expect_err("store failed");
    assert_eq!(err.code(), ErrorCode::InternalFailure);
    assert!(!err.message().contains("deadlock"));
}
