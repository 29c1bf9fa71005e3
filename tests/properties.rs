//! Property tests for pagedeps.
//!
//! Random catalogs and requirement sequences check the ordering and
//! deduplication guarantees of a page.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/page_ordering.rs"]
mod page_ordering;

#[path = "properties/stylesheet_order.rs"]
mod stylesheet_order;
