pub mod http;

pub use http::{FetchConfig, Fetcher, HttpFetcher};
