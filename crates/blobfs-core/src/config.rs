//! Namespace configuration

use std::time::Duration;

/// Extensions accepted by the create-file path, comma separated.
pub const DEFAULT_ALLOWED_EXTENSIONS: &str =
    "txt,csv,doc,docx,xls,xlsx,ppt,pptx,zip,rar,jpg,jpeg,gif,png,db,pdf";

/// Default capacity quota (1 GiB); the store itself has no notion of quota.
pub const DEFAULT_TOTAL_CAPACITY: u64 = 1024 * 1024 * 1024;

/// Configuration for one namespace instance
#[derive(Clone, Debug)]
pub struct NamespaceConfig {
    /// Logical container name as supplied by the caller
    pub container: String,
    /// Private containers get no anonymous access and a `-private` name
    /// suffix
    pub private: bool,
    /// Capacity quota used for statistics; externally supplied, never
    /// discovered from the store
    pub total_capacity: u64,
    /// Comma-separated extension allow-list for file creation
    pub allowed_extensions: String,
    /// Rename polling behavior
    pub rename: RenameConfig,
}

impl NamespaceConfig {
    /// Configuration for a private container with default quota and
    /// allow-list.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            private: true,
            total_capacity: DEFAULT_TOTAL_CAPACITY,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.to_string(),
            rename: RenameConfig::default(),
        }
    }

    /// Toggle anonymous access.
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Override the capacity quota.
    pub fn with_total_capacity(mut self, bytes: u64) -> Self {
        self.total_capacity = bytes;
        self
    }

    /// Override the rename polling behavior.
    pub fn with_rename(mut self, rename: RenameConfig) -> Self {
        self.rename = rename;
        self
    }

    /// Physical container name: lowercased, suffixed for private namespaces.
    pub fn physical_container_name(&self) -> String {
        let suffix = if self.private { "-private" } else { "" };
        format!("{}{}", self.container.to_lowercase(), suffix)
    }
}

/// Polling behavior of the rename protocol.
///
/// The copy-status poll backs off exponentially from `initial_poll_interval`
/// up to `max_poll_interval` and gives up at `timeout`, surfacing
/// [`crate::CoreError::RenameTimedOut`] rather than looping forever.
#[derive(Clone, Debug)]
pub struct RenameConfig {
    /// First wait between status polls
    pub initial_poll_interval: Duration,
    /// Upper bound on the backed-off poll interval
    pub max_poll_interval: Duration,
    /// Overall deadline for the copy to settle
    pub timeout: Duration,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            initial_poll_interval: Duration::from_millis(500),
            max_poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(120),
        }
    }
}
