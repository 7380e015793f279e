//! Local edit buffer for the blog's category tree.
//!
//! The crate is UI-agnostic. It holds a two-level category forest hydrated
//! from the server, records which ids need a create, update or delete, and
//! turns a save into a list of [`SaveRequest`]s. Network calls live in the
//! embedding application; their results come back as
//! [`CategoryCommand::SaveSucceeded`] and [`CategoryCommand::SaveFailed`].
//!
//! # Quick Example
//!
//! ```
//! use homepage_categories::{
//!     CategoryCommand, CategoryEffect, CategoryId, EditorState, reduce,
//! };
//!
//! let mut state = EditorState::default();
//! reduce(&mut state, CategoryCommand::Initialize(Vec::new())).unwrap();
//! reduce(&mut state, CategoryCommand::Add { parent_id: None }).unwrap();
//!
//! let id = CategoryId::new(-1);
//! reduce(
//!     &mut state,
//!     CategoryCommand::CommitRename {
//!         id,
//!         name: String::from("Tech"),
//!         parent_id: None,
//!     },
//! )
//! .unwrap();
//!
//! let effects = reduce(&mut state, CategoryCommand::ApplySave).unwrap();
//! assert!(matches!(effects[0], CategoryEffect::Request(_)));
//! ```

mod command;
mod errors;
mod event;
mod model;
mod reducer;
mod state;

pub use command::CategoryCommand;
pub use errors::CategoryError;
pub use event::{CategoryEffect, SaveRequest};
pub use model::{
    CategoryId, CategoryNode, CategoryRow, CategorySnapshot, CategoryTree,
    MAX_DEPTH,
};
pub use reducer::{Effects, reduce};
pub use state::{
    EditorState, PendingChanges, SaveFailure, SaveKind, SaveTarget,
};
