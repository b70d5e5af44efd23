//! Product catalog domain: items, category selection, pagination and the
//! like/dislike ledger, coordinated by [`CatalogSession`].

pub mod error;
pub mod item;
pub mod ledger;
pub mod pagination;
pub mod selection;
pub mod session;
pub mod source;

pub use error::{CatalogError, Result};
pub use item::{Catalog, Category, Item, ItemId};
pub use ledger::{InteractionAction, InteractionLedger, InteractionStatus, Transition};
pub use pagination::{PageRange, PageSize, PaginationState};
pub use selection::SelectionState;
pub use session::{CatalogSession, SessionSnapshot};
pub use source::{parse_catalog, sample_catalog, CatalogSource};
