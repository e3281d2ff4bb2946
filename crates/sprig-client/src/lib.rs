pub mod http;
pub mod mock;

pub use http::{ClientConfig, HttpDataService};
pub use mock::MockDataService;
