use crate::EntryKind;

/// Events emitted by a container during operations.
///
/// Every event is logged through `tracing` at trace level and passed to the
/// callback set via [`Container::set_trace_callback`](crate::Container::set_trace_callback).
/// Keys are rendered with their `Debug` form.
///
/// # Examples
///
/// ```rust
/// use service_container::{ContainerEvent, EntryKind};
///
/// let event = ContainerEvent::Register {
///     key: "\"db\"".to_string(),
///     kind: EntryKind::Factory,
/// };
/// assert_eq!(event.to_string(), "register { key: \"db\", kind: factory }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerEvent {
    /// An entry was registered through `set`, `factory` or `protect`.
    Register { key: String, kind: EntryKind },

    /// A value was requested with `get`.
    Resolve {
        key: String,
        /// Kind of the entry before the access, `None` when absent.
        kind: Option<EntryKind>,
    },

    /// An entry was replaced by `extend`.
    Extend { key: String, kind: EntryKind },

    /// A membership check was performed.
    Contains { key: String, found: bool },
}

impl std::fmt::Display for ContainerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerEvent::Register { key, kind } => {
                write!(f, "register {{ key: {key}, kind: {kind} }}")
            }
            ContainerEvent::Resolve { key, kind: Some(kind) } => {
                write!(f, "resolve {{ key: {key}, kind: {kind} }}")
            }
            ContainerEvent::Resolve { key, kind: None } => {
                write!(f, "resolve {{ key: {key}, found: false }}")
            }
            ContainerEvent::Extend { key, kind } => {
                write!(f, "extend {{ key: {key}, kind: {kind} }}")
            }
            ContainerEvent::Contains { key, found } => {
                write!(f, "contains {{ key: {key}, found: {found} }}")
            }
        }
    }
}
