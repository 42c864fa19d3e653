use std::any::Any;

use crate::application::error::ErrorReport;
use crate::event::Event;

/// Lifecycle events emitted by the application bootstrap sequence.
///
/// Each `will*` variant fires before its phase runs; each `*Ready` variant
/// fires after the phase's side effects are complete.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    /// First start call accepted
    WillStart,
    /// Container phase is about to run
    WillInitializeContainer,
    /// Container is registered and resolvable
    ContainerReady,
    /// Environment phase is about to run
    WillInitializeEnvironments,
    /// Environment sources are loaded
    EnvironmentsReady,
    /// Configuration phase is about to run
    WillInitializeConfigurations,
    /// Configuration entries are stored
    ConfigurationsReady,
    /// Provider register/boot passes are about to run
    WillInitializeProviders,
    /// All provider hooks for the phase have completed
    ProvidersReady { count: usize },
    /// Kernel resolution is about to run
    WillInitializeKernel,
    /// Kernel is resolved and booted
    KernelReady,
    /// Full start sequence completed
    ApplicationReady,
    /// Kernel run hook is about to be invoked
    WillRun,
    /// Teardown is about to run
    WillTerminate,
    /// Teardown completed
    Terminated,
    /// A run failed; carries the normalized report
    ErrorRaised(ErrorReport),
}

impl Event for LifecycleEvent {
    fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::WillStart => "willStart",
            LifecycleEvent::WillInitializeContainer => "willInitializeContainer",
            LifecycleEvent::ContainerReady => "containerReady",
            LifecycleEvent::WillInitializeEnvironments => "willInitializeEnvironments",
            LifecycleEvent::EnvironmentsReady => "environmentsReady",
            LifecycleEvent::WillInitializeConfigurations => "willInitializeConfigurations",
            LifecycleEvent::ConfigurationsReady => "configurationsReady",
            LifecycleEvent::WillInitializeProviders => "willInitializeProviders",
            LifecycleEvent::ProvidersReady { .. } => "providersReady",
            LifecycleEvent::WillInitializeKernel => "willInitializeKernel",
            LifecycleEvent::KernelReady => "kernelReady",
            LifecycleEvent::ApplicationReady => "applicationReady",
            LifecycleEvent::WillRun => "willRun",
            LifecycleEvent::WillTerminate => "willTerminate",
            LifecycleEvent::Terminated => "terminated",
            LifecycleEvent::ErrorRaised(_) => "error",
        }
    }

    fn clone_event(&self) -> Box<dyn Event> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
