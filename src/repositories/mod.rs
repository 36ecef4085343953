mod json_store;
mod traits;

pub use json_store::{ContactDocument, JsonContactStore};
pub use traits::{ContactRepository, ContactSourceRepository};
