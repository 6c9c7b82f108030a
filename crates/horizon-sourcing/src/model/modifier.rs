//! Mutation capability handed to view bindings.

use std::fmt;
use std::sync::Arc;

use super::array_provider::ArrayDataProvider;
use super::coordinate::Coordinate;
use super::traits::DataModifying;
use crate::error::Result;
use crate::settings::ModifierPolicy;

type Predicate = Box<dyn Fn(Coordinate) -> bool + Send + Sync>;

/// Exposes move and delete on an [`ArrayDataProvider`] to a view binding.
///
/// Capabilities default to a static [`ModifierPolicy`]; a per-coordinate
/// predicate replaces the policy flag for its capability. Capabilities are
/// advisory: they answer the view's "may the user do this?" query and are
/// not re-checked by [`move_item`](DataModifying::move_item) or
/// [`delete_item`](DataModifying::delete_item).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use horizon_sourcing::model::{ArrayDataProvider, Coordinate, DataModifier, DataModifying};
/// use horizon_sourcing::settings::ModifierPolicy;
///
/// let provider = Arc::new(ArrayDataProvider::from_rows(vec!["pinned", "a", "b"]));
/// let modifier = DataModifier::new(provider.clone(), ModifierPolicy::permissive())
///     .with_move_predicate(|at| at.item != 0);
///
/// assert!(!modifier.can_move_item(Coordinate::new(0, 0)));
/// assert!(modifier.can_move_item(Coordinate::new(0, 2)));
///
/// // The view already shows the drag, so it is not animated again.
/// modifier.move_item(Coordinate::new(0, 2), Coordinate::new(0, 1), false).unwrap();
/// assert_eq!(provider.content().sections(), &[vec!["pinned", "b", "a"]]);
/// ```
pub struct DataModifier<T> {
    provider: Arc<ArrayDataProvider<T>>,
    policy: ModifierPolicy,
    move_predicate: Option<Predicate>,
    delete_predicate: Option<Predicate>,
}

impl<T: Clone + Send + Sync + 'static> DataModifier<T> {
    /// Creates a modifier over `provider` answering capabilities from `policy`.
    pub fn new(provider: Arc<ArrayDataProvider<T>>, policy: ModifierPolicy) -> Self {
        Self {
            provider,
            policy,
            move_predicate: None,
            delete_predicate: None,
        }
    }

    /// Decides movability per coordinate instead of from the policy.
    pub fn with_move_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Coordinate) -> bool + Send + Sync + 'static,
    {
        self.move_predicate = Some(Box::new(predicate));
        self
    }

    /// Decides deletability per coordinate instead of from the policy.
    pub fn with_delete_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Coordinate) -> bool + Send + Sync + 'static,
    {
        self.delete_predicate = Some(Box::new(predicate));
        self
    }

    /// The modified provider.
    pub fn provider(&self) -> &Arc<ArrayDataProvider<T>> {
        &self.provider
    }

    /// The static policy.
    pub fn policy(&self) -> ModifierPolicy {
        self.policy
    }

    fn allows(&self, predicate: Option<&Predicate>, flag: bool, at: Coordinate) -> bool {
        let exists = self
            .provider
            .with_content(|content| content.check_coordinate(at).is_ok());
        exists && predicate.map_or(flag, |predicate| predicate(at))
    }
}

impl<T: Clone + Send + Sync + 'static> DataModifying for DataModifier<T> {
    fn can_move_item(&self, at: Coordinate) -> bool {
        self.allows(self.move_predicate.as_ref(), self.policy.can_move_items, at)
    }

    fn can_delete_item(&self, at: Coordinate) -> bool {
        self.allows(
            self.delete_predicate.as_ref(),
            self.policy.can_delete_items,
            at,
        )
    }

    fn move_item(&self, from: Coordinate, to: Coordinate, update_view: bool) -> Result<()> {
        self.provider.move_item(from, to, !update_view)
    }

    fn delete_item(&self, at: Coordinate) -> Result<()> {
        self.provider.delete_item(at, false).map(|_| ())
    }
}

impl<T> fmt::Debug for DataModifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataModifier")
            .field("policy", &self.policy)
            .field("move_predicate", &self.move_predicate.is_some())
            .field("delete_predicate", &self.delete_predicate.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeSet, Edit, SectionedSource};
    use parking_lot::Mutex;

    fn provider() -> Arc<ArrayDataProvider<&'static str>> {
        Arc::new(ArrayDataProvider::from_sections(vec![
            vec!["a", "b"],
            vec!["c"],
        ]))
    }

    #[test]
    fn test_default_policy_denies() {
        let modifier = DataModifier::new(provider(), ModifierPolicy::default());
        assert!(!modifier.can_move_item(Coordinate::new(0, 0)));
        assert!(!modifier.can_delete_item(Coordinate::new(0, 0)));
    }

    #[test]
    fn test_capabilities_require_existing_element() {
        let modifier = DataModifier::new(provider(), ModifierPolicy::permissive());
        assert!(modifier.can_move_item(Coordinate::new(1, 0)));
        assert!(!modifier.can_move_item(Coordinate::new(1, 1)));
        assert!(!modifier.can_delete_item(Coordinate::new(2, 0)));
    }

    #[test]
    fn test_predicate_overrides_policy() {
        let modifier = DataModifier::new(provider(), ModifierPolicy::default())
            .with_delete_predicate(|at| at.section == 1);
        assert!(modifier.can_delete_item(Coordinate::new(1, 0)));
        assert!(!modifier.can_delete_item(Coordinate::new(0, 0)));
        assert!(!modifier.can_move_item(Coordinate::new(1, 0)));
    }

    #[test]
    fn test_update_view_selects_change_kind() {
        let provider = provider();
        let received = Arc::new(Mutex::new(Vec::new()));
        let recv = received.clone();
        provider
            .observable()
            .add_observer(move |change| recv.lock().push(change.clone()));

        let modifier = DataModifier::new(provider.clone(), ModifierPolicy::permissive());
        let from = Coordinate::new(0, 0);
        let to = Coordinate::new(1, 1);
        modifier.move_item(from, to, false).unwrap();
        modifier.delete_item(Coordinate::new(0, 0)).unwrap();

        assert_eq!(
            *received.lock(),
            vec![
                ChangeSet::SilentEdits(vec![Edit::MoveItem { from, to }]),
                ChangeSet::Edits(vec![Edit::DeleteItem(Coordinate::new(0, 0))]),
            ]
        );
        assert_eq!(provider.content().sections(), &[vec![], vec!["c", "a"]]);
    }
}
