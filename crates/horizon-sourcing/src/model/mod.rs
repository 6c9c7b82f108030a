//! Sectioned data providers and their change model.
//!
//! A data provider owns a sectioned collection of elements and is its only
//! writer. Every mutation produces a [`ChangeSet`] describing it, and the
//! provider's [`ChangeEmitter`] publishes that change-set synchronously to
//! every observer.
//!
//! # Core Types
//!
//! - `Coordinate`: `(section, item)` position of an element
//! - `SectionedCollection`: ordered sections of ordered elements
//! - `Edit` / `ChangeSet`: what changed, and whether views should animate it
//! - `ChangeEmitter`: observer registry publishing change-sets
//! - `SectionedSource` / `DataProvider`: the read contract
//! - `DataModifying`: the mutation capability handed to view bindings
//!
//! # Providers
//!
//! - `ArrayDataProvider`: nested-vector provider with move/delete/insert/update
//! - `AnyDataProvider`: cloneable type-erased provider handle
//! - `DataProviderSwitcher`: delegates to a provider chosen by a state value
//! - `DataModifier`: policy-driven `DataModifying` over an array provider
//!
//! # Example
//!
//! ```
//! use horizon_sourcing::model::{ArrayDataProvider, ChangeSet, Coordinate, SectionedSource};
//!
//! let provider = ArrayDataProvider::from_sections(vec![vec!["a", "b"], vec!["c"]]);
//!
//! provider.observable().add_observer(|change| match change {
//!     ChangeSet::FullReload => println!("reload everything"),
//!     ChangeSet::Edits(edits) => println!("animate {} edits", edits.len()),
//!     ChangeSet::SilentEdits(_) => println!("already visible"),
//! });
//!
//! provider
//!     .move_item(Coordinate::new(0, 0), Coordinate::new(1, 1), false)
//!     .unwrap();
//! assert_eq!(provider.content().sections(), &[vec!["b"], vec!["c", "a"]]);
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐  ChangeSet  ┌───────────────┐  batch   ┌──────────┐
//! │ DataProvider │────────────>│ChangeAnimator │─────────>│ BatchView│
//! │  (mutator)   │             │ (BatchApplier)│          │          │
//! └──────────────┘             └───────────────┘          └──────────┘
//!        ^                                                     │
//!        │             DataModifying (user drag/delete)        │
//!        └─────────────────────────────────────────────────────┘
//! ```

mod any_provider;
mod array_provider;
mod change;
mod collection;
mod coordinate;
mod emitter;
mod modifier;
mod switcher;
mod traits;

pub use any_provider::AnyDataProvider;
pub use array_provider::ArrayDataProvider;
pub use change::{ChangeSet, Edit};
pub use collection::SectionedCollection;
pub use coordinate::Coordinate;
pub use emitter::{ChangeEmitter, ObserverGuard, ObserverToken};
pub use modifier::DataModifier;
pub use switcher::DataProviderSwitcher;
pub use traits::{DataModifying, DataProvider, SectionedSource};
