//! Behavioural tests for placing bids and deciding on them.

#[path = "support/brokerage_world.rs"]
mod brokerage_world;

use brokerage_world::{BrokerageWorld, username};
use pagination::Page;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{given, scenario, then, when};
use tender_backend::domain::ports::{
    BidStatusRequest, CreateBidRequest, ListTenderBidsRequest, SubmitDecisionRequest,
    TransitionBidRequest,
};
use tender_backend::domain::{Bid, BidStatus, OrganizationId};

#[derive(Default)]
struct BidWorld {
    brokerage: BrokerageWorld,
    listing: Slot<Vec<Bid>>,
    status: Slot<BidStatus>,
}

impl BidWorld {
    fn place_bid(&self, user: &str, organization_id: Option<OrganizationId>) {
        let ports = self.brokerage.ports();
        let tender_id = self.brokerage.tender.get().expect("tender");
        let result = self.brokerage.block_on(ports.bids.create(CreateBidRequest {
            username: username(user),
            tender_id,
            organization_id,
            name: format!("{user} offer"),
            description: "Fixed price".to_owned(),
            status: "Created".to_owned(),
        }));
        if let Some(bid) = self.brokerage.record(result) {
            self.brokerage.bid.set(bid.id);
        }
    }

    fn read_status(&self, user: &str) {
        let ports = self.brokerage.ports();
        let bid_id = self.brokerage.bid.get().expect("bid");
        let result = self
            .brokerage
            .block_on(ports.bids_query.get_status(BidStatusRequest {
                bid_id,
                username: username(user),
            }));
        if let Some(status) = self.brokerage.record(result) {
            self.status.set(status);
        }
    }
}

#[fixture]
fn world() -> BidWorld {
    BidWorld::default()
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("a published tender from {org} managed by {user}")]
fn a_published_tender(world: &BidWorld, org: String, user: String) {
    world.brokerage.organization_with_responsible(&org, &user);
    world.brokerage.create_tender(&user, "Bridge", "Created");
    world.brokerage.set_tender_status(&user, "Published");
    world.brokerage.assert_succeeded();
}

#[given("a registered user {user}")]
fn a_registered_user(world: &BidWorld, user: String) {
    world.brokerage.register(&user);
}

#[given("{user} has placed a personal bid")]
fn user_has_placed_a_personal_bid(world: &BidWorld, user: String) {
    world.place_bid(&user, None);
    world.brokerage.assert_succeeded();
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("{user} sets the bid status to {status}")]
fn user_sets_the_bid_status(world: &BidWorld, user: String, status: String) {
    let ports = world.brokerage.ports();
    let bid_id = world.brokerage.bid.get().expect("bid");
    let result = world
        .brokerage
        .block_on(ports.bids.transition_status(TransitionBidRequest {
            bid_id,
            username: username(&user),
            status,
        }));
    world.brokerage.record(result);
}

#[when("{user} submits the decision {decision}")]
fn user_submits_the_decision(world: &BidWorld, user: String, decision: String) {
    let ports = world.brokerage.ports();
    let bid_id = world.brokerage.bid.get().expect("bid");
    let result = world
        .brokerage
        .block_on(ports.bids.submit_decision(SubmitDecisionRequest {
            bid_id,
            username: username(&user),
            decision,
        }));
    world.brokerage.record(result);
}

#[when("{user} places a personal bid")]
fn user_places_a_personal_bid(world: &BidWorld, user: String) {
    world.place_bid(&user, None);
}

#[when("{user} places a bid for the tender organization")]
fn user_places_an_organization_bid(world: &BidWorld, user: String) {
    let organization = world.brokerage.organization.get();
    world.place_bid(&user, organization);
}

#[when("{user} reads the bid status")]
fn user_reads_the_bid_status(world: &BidWorld, user: String) {
    world.read_status(&user);
}

#[when("{user} lists the tender bids")]
fn user_lists_the_tender_bids(world: &BidWorld, user: String) {
    let ports = world.brokerage.ports();
    let tender_id = world.brokerage.tender.get().expect("tender");
    let result = world
        .brokerage
        .block_on(ports.bids_query.list_for_tender(ListTenderBidsRequest {
            tender_id,
            username: username(&user),
            page: Page::default(),
        }));
    if let Some(bids) = world.brokerage.record(result) {
        world.listing.set(bids);
    }
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("the request succeeds")]
fn the_request_succeeds(world: &BidWorld) {
    world.brokerage.assert_succeeded();
}

#[then("the request fails with {code}")]
fn the_request_fails_with(world: &BidWorld, code: String) {
    world.brokerage.assert_failed_with(&code);
}

#[then("the bid status is {status}")]
fn the_bid_status_is(world: &BidWorld, status: String) {
    let expected: BidStatus = status.parse().expect("bid status literal");
    world.read_status("alice");
    world.brokerage.assert_succeeded();
    assert_eq!(world.status.get(), Some(expected));
}

#[then("the tender bid listing has {count} entry")]
fn the_tender_bid_listing_has(world: &BidWorld, count: usize) {
    let bids = world.listing.get().expect("bid listing");
    assert_eq!(bids.len(), count);
    assert!(bids.iter().all(|bid| bid.status == BidStatus::Published));
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "The tender owner approves a published bid"
)]
fn the_tender_owner_approves_a_published_bid(world: BidWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "A second active personal bid conflicts"
)]
fn a_second_active_personal_bid_conflicts(world: BidWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "Canceling a bid frees the author to bid again"
)]
fn canceling_a_bid_frees_the_author(world: BidWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "An organization cannot bid on its own tender"
)]
fn an_organization_cannot_bid_on_its_own_tender(world: BidWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "Decisions require a published bid"
)]
fn decisions_require_a_published_bid(world: BidWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "The tender owner cannot read a draft bid status"
)]
fn the_tender_owner_cannot_read_a_draft_bid_status(world: BidWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "A draft canceled before publication stays hidden from the tender owner"
)]
fn a_canceled_draft_stays_hidden(world: BidWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "Authors cannot approve their own bid"
)]
fn authors_cannot_approve_their_own_bid(world: BidWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/bid_lifecycle.feature",
    name = "The tender owner lists only published bids"
)]
fn the_tender_owner_lists_only_published_bids(world: BidWorld) {
    let _ = world;
}
