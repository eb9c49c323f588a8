// Action definitions and the physical-to-logical binding table

use crate::event::InputCode;
use log::warn;
use std::collections::HashMap;

/// Name reserved for the sentinel action; never part of the defined set
const UNKNOWN_ACTION_NAME: &str = "<unknown>";

/// A named semantic game action ("Jump", "Attack", ...)
///
/// Equality and hashing are by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    name: String,
}

impl Action {
    /// Create an action with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    /// The action's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sentinel action used where no real action applies
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_ACTION_NAME)
    }

    /// Check whether this is the sentinel action
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_ACTION_NAME
    }
}

/// Immutable-after-build mapping from input codes to bound actions
///
/// Holds the defined-action registry alongside the bindings; every
/// action reachable through `lookup` is guaranteed to be defined,
/// because undefined references are dropped at build time.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: HashMap<InputCode, Vec<Action>>,
    defined: HashMap<String, Action>,
}

impl BindingTable {
    /// Start building a binding table
    pub fn builder() -> BindingTableBuilder {
        BindingTableBuilder::new()
    }

    /// Get the actions bound to an input code, in binding order
    ///
    /// Returns an empty slice for unbound codes; an unbound code is
    /// not an error.
    pub fn lookup(&self, code: InputCode) -> &[Action] {
        self.bindings.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether an action name is in the defined-action registry
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.contains_key(name)
    }

    /// Iterate over all defined actions
    pub fn defined_actions(&self) -> impl Iterator<Item = &Action> {
        self.defined.values()
    }

    /// Iterate over all bindings
    pub fn bindings(&self) -> impl Iterator<Item = (InputCode, &[Action])> {
        self.bindings.iter().map(|(code, actions)| (*code, actions.as_slice()))
    }

    /// Number of bound input codes
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check whether no codes are bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Builder for [`BindingTable`]
///
/// Actions must be defined before codes are bound to them; a binding
/// that references an undefined action is dropped with a warning.
#[derive(Debug, Default)]
pub struct BindingTableBuilder {
    table: BindingTable,
}

impl BindingTableBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action name in the defined-action registry
    pub fn define_action<S: Into<String>>(&mut self, name: S) -> &mut Self {
        let name = name.into();
        if name == UNKNOWN_ACTION_NAME {
            warn!("Ignoring attempt to define the reserved action name '{}'", name);
            return self;
        }
        self.table
            .defined
            .entry(name.clone())
            .or_insert_with(|| Action::new(name));
        self
    }

    /// Bind an input code to a defined action
    ///
    /// Binding order is preserved and becomes resolution priority when
    /// several actions share one code.
    pub fn bind(&mut self, code: InputCode, action_name: &str) -> &mut Self {
        match self.table.defined.get(action_name) {
            Some(action) => {
                self.table
                    .bindings
                    .entry(code)
                    .or_default()
                    .push(action.clone());
            }
            None => {
                warn!(
                    "Dropping binding {}:{} -> '{}': action is not defined",
                    code.device, code.code, action_name
                );
            }
        }
        self
    }

    /// Finish building
    pub fn build(self) -> BindingTable {
        self.table
    }
}
