//! HTTP client utilities

pub mod client;

pub use client::{BufferedResponse, HttpClient, HttpClientBuilder};
