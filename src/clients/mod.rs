pub mod http;

pub use http::RestClient;
