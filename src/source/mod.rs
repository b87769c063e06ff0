//! Data source abstraction.
//!
//! - `traits`: the `DataSource` trait views are written against
//! - `mock`: an in-memory implementation for tests

pub mod mock;
pub mod traits;

pub use mock::{Endpoint, MockSource};
pub use traits::DataSource;
