//! Small collaborator contracts: host clipboard, file pusher, file dialog.

use std::path::PathBuf;

/// Host clipboard access.
pub trait Clipboard {
    /// Read the host clipboard. `None` when unreadable; empty string when
    /// the clipboard is empty.
    fn text(&mut self) -> Option<String>;
}

/// What to do with a dropped file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePushAction {
    /// Install the file as an application package.
    InstallApk,
    /// Push the file to the device storage.
    PushFile,
}

/// Asynchronous file transfer service.
pub trait FilePusher {
    /// Enqueue a transfer request. Returns whether the request was taken.
    fn request(&mut self, action: FilePushAction, path: PathBuf) -> bool;
}

/// Modal file-open dialog used to pick a touchmap file. Blocking is
/// acceptable: the dialog is user-initiated.
pub trait TouchmapDialog {
    /// Ask the user for a touchmap file; `None` on cancel.
    fn pick_file(&mut self) -> Option<PathBuf>;
}
