//! Ordered collection editing: the working copy of a sequence being edited
//! in a dialog, plus the pure reorder operations over it.
//!
//! Positions are 0-based and contiguous after every mutation. The store owns
//! the sequence for the lifetime of one edit session; authoritative server
//! state replaces it on refresh.

mod reorder;
mod store;

pub use reorder::{move_step, move_to_key, renumber, Direction};
pub use store::{OrderedStore, RemoveError, Sequenced};
