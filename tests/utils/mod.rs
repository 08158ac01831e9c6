mod sql_endpoint;

#[allow(unused_imports)]
pub use sql_endpoint::{CapturedRequest, FakeSqlEndpoint};
