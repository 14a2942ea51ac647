//! Actions that modules return to communicate with the app

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Copy the viewed address to the clipboard
    Copy,

    /// Show the QR code for the viewed address
    ShowQr,

    /// Close current overlay/popup
    CloseOverlay,

    /// Reload the reference datasets
    Refresh,

    /// View another account
    Open(String),

    /// Assign a local alias to the viewed account
    SetAlias(String),

    /// Remove the local alias of the viewed account
    RemoveAlias,

    /// Open the command line
    OpenCommand,

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
