/// The notification contract between the monitor core and the
/// presentation layer.

/// One observed change, in cross-thread wire form. Within a tick the
/// monitor emits disappearances first, then appearances, then updates,
/// each group sorted by filename, so a consumer never sees an update for
/// a view it has not been told to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Appeared(String),
    Disappeared(String),
    Updated { name: String, fragment: String },
}

/// Receiver for monitor notifications, implemented by the presentation
/// layer (or by a channel adapter in front of it).
///
/// `is_active` feeds focus back to the monitor: fresh content for the
/// currently focused view does not mark the file dirty.
pub trait Sink {
    /// A matching file entered the directory; create its view.
    fn on_appeared(&mut self, name: &str);
    /// A tracked file left the directory; destroy its view.
    fn on_disappeared(&mut self, name: &str);
    /// Newly appended text for a tracked file.
    fn on_updated(&mut self, name: &str, fragment: &str);
    /// True if `name`'s view currently has focus.
    fn is_active(&mut self, name: &str) -> bool;
}
