#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod app;
pub mod m2;
pub mod search;
pub mod userdat;
pub mod verifier;
pub mod wordlist;

mod error;

pub use crate::{
    error::{Error, Result},
    search::{search, search_parallel, SearchOutcome, Target},
    userdat::{FieldLayout, UserDatabase, UserRecord},
    verifier::{
        derive_public_point, derive_scalar, derive_verifier, password_hash, verifier_x, Verifier,
    },
};
pub use wei25519;
