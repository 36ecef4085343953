//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and the recompute pipeline. They provide a clean boundary
//! between the stdio front end and the data access layer.

mod contact_list_service;

pub use contact_list_service::{ContactListService, ContactListServiceImpl};
