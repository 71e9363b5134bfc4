//! Async utilities for common async patterns
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::async_utils::timeout::{with_timeout, TimeoutError};
//! use std::time::Duration;
//!
//! let output = with_timeout(
//!     Duration::from_secs(30),
//!     tokio::process::Command::new("termux-battery-status").output(),
//! )
//! .await;
//!
//! match output {
//!     Ok(out) => println!("{}", String::from_utf8_lossy(&out.stdout)),
//!     Err(TimeoutError::Timeout(_)) => println!("Command timed out"),
//!     Err(TimeoutError::OperationFailed(e)) => println!("{}", e),
//! }
//! ```

pub mod timeout;
