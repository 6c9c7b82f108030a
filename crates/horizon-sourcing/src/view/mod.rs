//! The consumer side: applying change-sets to views.
//!
//! A view implements [`BatchView`]. A [`ChangeAnimator`] observes a provider
//! and drives that view, one batch transaction per published change-set.
//! [`ViewDataSource`] answers the view's data queries and routes user edits
//! back to the provider through a [`DataModifying`](crate::model::DataModifying)
//! capability, using a [`RendererRegistry`] to configure visuals.

mod animator;
mod data_source;
mod renderer;
mod traits;

pub use animator::{BatchState, ChangeAnimator, ChangeAnimatorBuilder};
pub use data_source::ViewDataSource;
pub use renderer::{ItemRenderer, RendererRegistry};
pub use traits::BatchView;
