//! Diesel table definitions for the brokerage schema.
//!
//! These must match `backend/migrations` exactly. Closed vocabularies
//! (statuses, service and organization types) are stored as their canonical
//! spelling in `VARCHAR` columns guarded by `CHECK` constraints.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Int4,
        /// Unique login name, 1 to 50 characters.
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Organizations able to publish tenders and place bids.
    organizations (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
        /// One of `IE`, `LLC`, `JSC`.
        organization_type -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Responsibility relation; `(organization_id, user_id)` is unique.
    organization_responsible (id) {
        id -> Int4,
        organization_id -> Int4,
        user_id -> Int4,
    }
}

diesel::table! {
    tenders (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
        service_type -> Varchar,
        status -> Varchar,
        version -> Int4,
        organization_id -> Int4,
        creator_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    bids (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
        status -> Varchar,
        version -> Int4,
        tender_id -> Int4,
        creator_id -> Int4,
        /// `NULL` for personal bids.
        organization_id -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(organization_responsible -> organizations (organization_id));
diesel::joinable!(organization_responsible -> users (user_id));
diesel::joinable!(tenders -> organizations (organization_id));
diesel::joinable!(tenders -> users (creator_id));
diesel::joinable!(bids -> tenders (tender_id));
diesel::joinable!(bids -> users (creator_id));
diesel::joinable!(bids -> organizations (organization_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    organizations,
    organization_responsible,
    tenders,
    bids,
);
