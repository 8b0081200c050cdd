//! Mathematical primitives.
//!
//! - [`distributions`]: standard normal CDF and error function used by the closed-form references

pub mod distributions;

pub use distributions::{erf, erfc, norm_cdf};
