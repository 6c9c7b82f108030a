//! Horizon Sourcing - sectioned data providers with batched view updates.
//!
//! This is the main crate; it re-exports the observer primitives of
//! `horizon-sourcing-core`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use horizon_sourcing::prelude::*;
//!
//! fn bind<V: BatchView + 'static>(view: Arc<Mutex<V>>) -> horizon_sourcing::Result<()> {
//!     let provider = Arc::new(ArrayDataProvider::from_rows(vec!["a", "b", "c"]));
//!     let _animator = ChangeAnimator::new(&view, &provider);
//!
//!     // The view receives one batch containing a single move.
//!     provider.move_item(Coordinate::new(0, 0), Coordinate::new(0, 2), false)?;
//!     Ok(())
//! }
//! ```

pub use horizon_sourcing_core::*;

mod error;
pub mod model;
pub mod prelude;
pub mod settings;
pub mod view;

pub use error::{Error, Result};
