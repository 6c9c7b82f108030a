//! Prelude module for Horizon Sourcing.
//!
//! ```ignore
//! use horizon_sourcing::prelude::*;
//! ```
//!
//! This provides access to:
//! - The change model (`Coordinate`, `Edit`, `ChangeSet`, `ChangeEmitter`)
//! - Provider traits and implementations
//! - The view binding (`BatchView`, `ChangeAnimator`, renderers)

// ============================================================================
// Change Model
// ============================================================================

pub use crate::model::{ChangeEmitter, ChangeSet, Coordinate, Edit, ObserverGuard, ObserverToken};

// ============================================================================
// Providers
// ============================================================================

pub use crate::model::{
    AnyDataProvider, ArrayDataProvider, DataModifier, DataModifying, DataProvider,
    DataProviderSwitcher, SectionedCollection, SectionedSource,
};

// ============================================================================
// View Binding
// ============================================================================

pub use crate::view::{
    BatchState, BatchView, ChangeAnimator, ItemRenderer, RendererRegistry, ViewDataSource,
};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::settings::{AnimatorConfig, ModifierPolicy, SourcingConfig, UpdateStrategy};
pub use crate::{Error, Result};
