//! Property-based tests for the catalog core
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `pagination_props`: page count, page bounds, window/range agreement
//! - `ledger_props`: toggle undo, exclusive contribution, zero floor
//! - `selection_props`: filter membership, search ordering, page reset
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod ledger_props;
mod pagination_props;
mod selection_props;
