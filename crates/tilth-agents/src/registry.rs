//! Name-to-constructor lookup for agents.
//!
//! Launchers resolve an agent from a configuration string through an
//! [`AgentRegistry`]. Registration happens once at startup; the core
//! engine never sees the registry.

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;

use crate::agent::{Agent, WaitAgent};
use crate::random::RandomAgent;
use crate::reachability::ReachabilityAgent;

/// Builds a boxed agent from a seed. Deterministic agents ignore it.
pub type AgentFactory = fn(u64) -> Box<dyn Agent>;

/// Errors from registering or resolving agents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// No agent is registered under this name.
    UnknownAgent {
        /// The requested name.
        name: String,
        /// Registered names, in registration order.
        known: Vec<String>,
    },
    /// The name is already taken.
    Duplicate {
        /// The conflicting name.
        name: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAgent { name, known } => {
                write!(f, "unknown agent '{name}' (known: {})", known.join(", "))
            }
            Self::Duplicate { name } => write!(f, "agent '{name}' is already registered"),
        }
    }
}

impl Error for RegistryError {}

/// Ordered registry of agent constructors.
///
/// # Examples
///
/// ```
/// use tilth_agents::AgentRegistry;
///
/// let registry = AgentRegistry::with_builtins();
/// let agent = registry.create("reachability", 0).unwrap();
/// assert_eq!(agent.name(), "reachability");
/// assert!(registry.create("telepathic", 0).is_err());
/// ```
#[derive(Clone, Default)]
pub struct AgentRegistry {
    factories: IndexMap<String, AgentFactory>,
}

impl AgentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `wait`, `random` and `reachability`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let builtins: [(&str, AgentFactory); 3] = [
            ("wait", wait_agent),
            ("random", random_agent),
            ("reachability", reachability_agent),
        ];
        for (name, factory) in builtins {
            registry.factories.insert(name.to_string(), factory);
        }
        registry
    }

    /// Add a constructor under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: AgentFactory,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Build the agent registered under `name`.
    pub fn create(&self, name: &str, seed: u64) -> Result<Box<dyn Agent>, RegistryError> {
        self.factories
            .get(name)
            .map(|factory| factory(seed))
            .ok_or_else(|| RegistryError::UnknownAgent {
                name: name.to_string(),
                known: self.names().map(str::to_string).collect(),
            })
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }
}

fn wait_agent(_seed: u64) -> Box<dyn Agent> {
    Box::new(WaitAgent)
}

fn random_agent(seed: u64) -> Box<dyn Agent> {
    Box::new(RandomAgent::new(seed))
}

fn reachability_agent(_seed: u64) -> Box<dyn Agent> {
    Box::new(ReachabilityAgent::new())
}

impl fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
