//! Runtime signal vocabulary.
//!
//! The hosting runtime observes its own environment (input events, window
//! focus, network state) and injects what it sees through this enum. The
//! engine has no event-API dependency of its own.

/// External condition reported by the hosting runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeSignal {
    /// Generic user interaction.
    Activity,
    /// The hosting surface gained or lost foreground visibility.
    VisibilityChanged { visible: bool },
    /// Network connectivity transitioned.
    ConnectivityChanged { online: bool },
}
