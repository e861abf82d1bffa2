//! Driven/observed role assignment.
//!
//! Every signal gets exactly one [`Role`] before replay begins, and the
//! mapping never changes for the duration of the run. Two interchangeable
//! oracle strategies decide the role:
//!
//! - [`NetlistOracle`] — authoritative. Built from a netlist's circuit-input
//!   names; takes precedence whenever a netlist is available.
//! - [`ConventionOracle`] — heuristic fallback. Matches the
//!   `<module>.io_in` naming convention. Strictly less reliable than the
//!   netlist: a design whose inputs do not follow the convention will be
//!   misclassified, which is a documented limitation of this strategy, not
//!   something it tries to detect.

use std::collections::{HashMap, HashSet};

use crate::error::ReplayError;
use crate::name::canonicalize;

/// Whether a signal is re-driven or re-checked during replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The signal is an externally driven circuit input; replay pokes it.
    Driven,
    /// The signal is produced by the circuit; replay expects its value.
    Observed,
}

/// Strategy interface deciding whether a signal is externally driven.
pub trait RoleOracle {
    /// Whether the signal with this canonical name is a circuit input.
    fn is_driven(&self, canonical_name: &str) -> bool;
}

/// Authoritative oracle backed by a netlist's input signal set.
pub struct NetlistOracle {
    inputs: HashSet<String>,
}

impl NetlistOracle {
    /// Builds the oracle from hierarchical input names, canonicalizing each.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::NameTooLong`] if an input name exceeds the
    /// canonicalizer's length limit.
    pub fn new<I, S>(hierarchical_inputs: I) -> Result<Self, ReplayError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inputs = HashSet::new();
        for name in hierarchical_inputs {
            inputs.insert(canonicalize(name.as_ref())?);
        }
        Ok(Self { inputs })
    }

    /// Number of distinct input signals the oracle knows.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the oracle knows no inputs at all.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl RoleOracle for NetlistOracle {
    fn is_driven(&self, canonical_name: &str) -> bool {
        self.inputs.contains(canonical_name)
    }
}

/// Heuristic oracle matching a canonical-name prefix convention.
pub struct ConventionOracle {
    prefix: String,
}

impl ConventionOracle {
    /// Builds an oracle matching names that start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Builds the standard `<module>.io_in` convention oracle.
    pub fn for_module(module: &str) -> Self {
        Self::with_convention(module, "io_in")
    }

    /// Builds a `<module>.<convention>` oracle for a configured input
    /// naming convention.
    pub fn with_convention(module: &str, convention: &str) -> Self {
        Self::new(format!("{module}.{convention}"))
    }
}

impl RoleOracle for ConventionOracle {
    fn is_driven(&self, canonical_name: &str) -> bool {
        canonical_name.starts_with(&self.prefix)
    }
}

/// Assigns a role to every canonical name, once, before replay.
///
/// Signals the oracle labels as inputs are [`Role::Driven`]; all others
/// default to [`Role::Observed`]. The returned mapping is immutable for the
/// rest of the run and fully determined by its inputs: classifying the same
/// names against the same oracle always yields the same mapping.
pub fn classify<I, S>(canonical_names: I, oracle: &dyn RoleOracle) -> HashMap<String, Role>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    canonical_names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            let role = if oracle.is_driven(name) {
                Role::Driven
            } else {
                Role::Observed
            };
            (name.to_string(), role)
        })
        .collect()
}
