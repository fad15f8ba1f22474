//! Error container bookkeeping.
//!
//! Each field group is either `Clean` (no container) or `Erroring` (exactly one
//! container). The presenter is the only component that creates, updates or
//! removes containers, and it keeps a table from [`FieldKey`] to the container
//! it manages so repeated passes never stack duplicates.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use formdom::Selector;

use crate::config::ValidateConfig;
use crate::field::FieldKey;
use crate::host::HostTree;
use crate::placement::ErrorPlacement;

/// Display state of one field group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupState {
    #[default]
    Clean,
    Erroring,
}

/// What a presenter call did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Clean -> Erroring: container created, marker class added.
    Created,
    /// Erroring -> Erroring: message replaced in place.
    Updated,
    /// Erroring -> Clean: container removed, marker class dropped.
    Removed,
    /// Clean -> Clean.
    Unchanged,
}

/// Owns the error containers of one form.
#[derive(Debug)]
pub struct ErrorPresenter<N> {
    error_class: String,
    container_tag: String,
    container_class: String,
    container_selector: Selector,
    placement: ErrorPlacement,
    containers: HashMap<FieldKey, N>,
}

impl<N: Copy + Eq + Hash + Debug> ErrorPresenter<N> {
    pub fn new(config: &ValidateConfig) -> Self {
        Self {
            error_class: config.error_class.clone(),
            container_tag: config.error_container_tag.clone(),
            container_class: config.error_container_class.clone(),
            container_selector: config.container_selector(),
            placement: config.error_placement,
            containers: HashMap::new(),
        }
    }

    /// Show `message` on `group`, creating its container on first failure.
    ///
    /// Only containers created by this presenter are reused; other markup in
    /// the group is left alone. `input` is only used by
    /// [`ErrorPlacement::AfterField`].
    pub fn show_error<H>(
        &mut self,
        host: &mut H,
        group: N,
        key: FieldKey,
        input: Option<N>,
        message: &str,
    ) -> Transition
    where
        H: HostTree<Node = N>,
    {
        if let Some(container) = self.tracked(&*host, &key) {
            host.set_text(container, message);
            log::debug!("updated error container for {key}");
            return Transition::Updated;
        }

        let container = host.create_element(&self.container_tag);
        host.set_attribute(container, "class", &self.container_class);
        host.set_text(container, message);
        host.add_class(group, &self.error_class);
        match (self.placement, input) {
            (ErrorPlacement::Append, _) | (ErrorPlacement::AfterField, None) => {
                host.append_child(group, container)
            }
            (ErrorPlacement::Prepend, _) => host.prepend_child(group, container),
            (ErrorPlacement::AfterField, Some(input)) => host.insert_after(input, container),
        }
        log::debug!("created error container for {key}");
        self.containers.insert(key, container);
        Transition::Created
    }

    /// Remove the tracked container of `group` and drop the marker class.
    ///
    /// No-op when nothing is tracked for `key`.
    pub fn clear_error<H>(&mut self, host: &mut H, group: N, key: &FieldKey) -> Transition
    where
        H: HostTree<Node = N>,
    {
        match self.containers.remove(key) {
            Some(container) => self.detach(host, group, container, key),
            None => Transition::Unchanged,
        }
    }

    /// Like [`ErrorPresenter::show_error`], but first adopts a container
    /// already present in the group's markup.
    pub fn show_error_in_markup<H>(
        &mut self,
        host: &mut H,
        group: N,
        key: FieldKey,
        input: Option<N>,
        message: &str,
    ) -> Transition
    where
        H: HostTree<Node = N>,
    {
        if self.tracked(&*host, &key).is_none() {
            if let Some(container) = host.query_first(group, &self.container_selector) {
                host.set_text(container, message);
                host.add_class(group, &self.error_class);
                log::debug!("adopted existing error container for {key}");
                self.containers.insert(key, container);
                return Transition::Updated;
            }
        }
        self.show_error(host, group, key, input, message)
    }

    /// Like [`ErrorPresenter::clear_error`], but also removes an untracked
    /// container found in the group's markup.
    pub fn clear_error_in_markup<H>(
        &mut self,
        host: &mut H,
        group: N,
        key: &FieldKey,
    ) -> Transition
    where
        H: HostTree<Node = N>,
    {
        let container = match self.containers.remove(key) {
            Some(container) => Some(container),
            None => host.query_first(group, &self.container_selector),
        };
        match container {
            Some(container) => self.detach(host, group, container, key),
            None => Transition::Unchanged,
        }
    }

    fn detach<H>(&self, host: &mut H, group: N, container: N, key: &FieldKey) -> Transition
    where
        H: HostTree<Node = N>,
    {
        host.remove(container);
        host.remove_class(group, &self.error_class);
        log::debug!("removed error container for {key}");
        Transition::Removed
    }

    pub fn state(&self, key: &FieldKey) -> GroupState {
        if self.containers.contains_key(key) {
            GroupState::Erroring
        } else {
            GroupState::Clean
        }
    }

    /// The container currently shown for `key`.
    pub fn container(&self, key: &FieldKey) -> Option<N> {
        self.containers.get(key).copied()
    }

    /// Number of groups currently showing an error.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// The tracked container for `key`, forgetting it if the host dropped it.
    fn tracked<H>(&mut self, host: &H, key: &FieldKey) -> Option<N>
    where
        H: HostTree<Node = N>,
    {
        let container = *self.containers.get(key)?;
        if host.is_connected(container) {
            Some(container)
        } else {
            log::debug!("error container for {key} was detached by the host");
            self.containers.remove(key);
            None
        }
    }
}
