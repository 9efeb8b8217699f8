//! Service layer providing validated CRUD operations on items.
//! - Separates business logic from storage.
//! - Normalizes storage failures into a closed set of error kinds.
//! - Carries an explicit cancellation/deadline context through every call.

pub mod context;
pub mod errors;
pub mod items;
