use crate::provider::ProviderHook;

/// Hook lists executed per lifecycle phase for one application scope.
///
/// The root application uses the fixed [`ScopeHooks::global_scope`] set; a
/// child scope starts from the empty [`ScopeHooks::named`] set unless
/// individual lists are overridden at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeHooks {
    pub name: String,
    /// Hooks run during the globals phase
    pub global: Vec<ProviderHook>,
    /// Hooks run after environment sources are loaded
    pub environment: Vec<ProviderHook>,
    /// Hooks run after configuration entries are stored
    pub configuration: Vec<ProviderHook>,
    /// Hooks run during the provider phase, one full pass per entry
    pub provider: Vec<ProviderHook>,
    /// Hooks run during terminate
    pub terminate: Vec<ProviderHook>,
}

impl ScopeHooks {
    /// Hook set used by the root scope
    pub fn global_scope() -> Self {
        Self {
            name: "global".to_string(),
            global: vec![ProviderHook::RegisterGlobal, ProviderHook::BootGlobal],
            environment: vec![
                ProviderHook::RegisterEnvironment,
                ProviderHook::BootEnvironment,
            ],
            configuration: vec![
                ProviderHook::RegisterConfiguration,
                ProviderHook::BootConfiguration,
            ],
            provider: vec![ProviderHook::Register, ProviderHook::Boot],
            terminate: vec![ProviderHook::Terminate],
        }
    }

    /// Empty hook set used by named child scopes unless overridden
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global: Vec::new(),
            environment: Vec::new(),
            configuration: Vec::new(),
            provider: Vec::new(),
            terminate: Vec::new(),
        }
    }

    /// Replace individual hook lists from a per-phase override
    pub fn with_overrides(mut self, overrides: ScopeOverrides) -> Self {
        if let Some(global) = overrides.global {
            self.global = global;
        }
        if let Some(environment) = overrides.environment {
            self.environment = environment;
        }
        if let Some(configuration) = overrides.configuration {
            self.configuration = configuration;
        }
        if let Some(provider) = overrides.provider {
            self.provider = provider;
        }
        if let Some(terminate) = overrides.terminate {
            self.terminate = terminate;
        }
        self
    }
}

/// Per-phase hook list overrides applied when creating a child scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeOverrides {
    pub global: Option<Vec<ProviderHook>>,
    pub environment: Option<Vec<ProviderHook>>,
    pub configuration: Option<Vec<ProviderHook>>,
    pub provider: Option<Vec<ProviderHook>>,
    pub terminate: Option<Vec<ProviderHook>>,
}

impl ScopeOverrides {
    /// Override that runs the full root hook set in a child scope
    pub fn full() -> Self {
        let root = ScopeHooks::global_scope();
        Self {
            global: Some(root.global),
            environment: Some(root.environment),
            configuration: Some(root.configuration),
            provider: Some(root.provider),
            terminate: Some(root.terminate),
        }
    }

    pub fn provider(mut self, hooks: Vec<ProviderHook>) -> Self {
        self.provider = Some(hooks);
        self
    }

    pub fn terminate(mut self, hooks: Vec<ProviderHook>) -> Self {
        self.terminate = Some(hooks);
        self
    }
}
