pub mod client;

pub use client::{AwcClient, FetchError, PayloadFormat};
