//! Route modules for the API server
//!
//! - records: read/update/delete of a single expense or income record,
//!   mounted once per resource kind
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and route table
//! - api.rs: JSON and form endpoints
//! - page.rs: HTMX page rendering

pub mod records;
