//! Terminal UI building blocks: form fields, entity tables, and the modal
//! dialogs. Dialogs are synchronous key-in/outcome-out state machines; all
//! network work happens in the app layer.

pub mod dialogs;
pub mod form_field;
pub mod table;

pub use form_field::{EntityForm, FormField, FormRow};
pub use table::EntityTable;
