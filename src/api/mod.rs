//! Access to the backend analytics API

mod client;


pub use client::*;
