//! File-backed collaborators of the core: settings, the outcome store, reports.

pub mod load;
pub mod report;
pub mod schema;
pub mod store;

pub use load::*;
pub use report::*;
pub use schema::*;
pub use store::*;
