//! Environment probes.
//!
//! [`GlobalScopeProbe`] checks a snapshot of the runtime's global scope
//! against the configured [`HostMarkers`]. Any one of the three markers is
//! enough:
//!
//! 1. the host's bridge object is defined as a global,
//! 2. the user agent contains the host marker,
//! 3. the root document element carries the host class.
//!
//! Without a global scope at all (server-side rendering, CLI tools) the
//! answer is `false`.

use crate::domain::config::HostMarkers;
use crate::ports::outbound::EnvironmentProbe;
use std::collections::HashSet;

/// Snapshot of the pieces of the global scope the probe looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalScope {
    /// Names defined on the global object.
    pub globals: HashSet<String>,
    /// Platform user-agent string, if the platform exposes one.
    pub user_agent: Option<String>,
    /// Class tokens on the root document element.
    pub root_classes: Vec<String>,
}

impl GlobalScope {
    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>) -> Self {
        self.globals.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the root element classes from a `class` attribute value.
    #[must_use]
    pub fn with_root_class_attr(mut self, class_attr: &str) -> Self {
        self.root_classes = class_attr.split_whitespace().map(str::to_string).collect();
        self
    }
}

/// Probe backed by a [`GlobalScope`] snapshot.
#[derive(Debug, Clone)]
pub struct GlobalScopeProbe {
    scope: Option<GlobalScope>,
    markers: HostMarkers,
}

impl GlobalScopeProbe {
    pub fn new(scope: Option<GlobalScope>, markers: HostMarkers) -> Self {
        Self { scope, markers }
    }

    /// Probe for a runtime without any global scope.
    pub fn detached(markers: HostMarkers) -> Self {
        Self::new(None, markers)
    }

    fn has_bridge_object(&self, scope: &GlobalScope) -> bool {
        scope.globals.contains(&self.markers.bridge_object)
    }

    fn has_user_agent_marker(&self, scope: &GlobalScope) -> bool {
        scope
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.contains(&self.markers.user_agent_marker))
    }

    fn has_root_class(&self, scope: &GlobalScope) -> bool {
        scope
            .root_classes
            .iter()
            .any(|class| class == &self.markers.root_class)
    }
}

impl EnvironmentProbe for GlobalScopeProbe {
    fn is_hosted(&self) -> bool {
        let Some(scope) = &self.scope else {
            return false;
        };

        self.has_bridge_object(scope)
            || self.has_user_agent_marker(scope)
            || self.has_root_class(scope)
    }
}

/// Probe with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticEnvironment {
    hosted: bool,
}

impl StaticEnvironment {
    pub const fn hosted() -> Self {
        Self { hosted: true }
    }

    pub const fn not_hosted() -> Self {
        Self { hosted: false }
    }
}

impl EnvironmentProbe for StaticEnvironment {
    fn is_hosted(&self) -> bool {
        self.hosted
    }
}
