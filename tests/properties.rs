//! Property tests for archsecure.
//!
//! Properties use randomized option trees and operation sequences to
//! protect the selection invariants.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/selection_tree.rs"]
mod selection_tree;
