use std::io;

/// Errors surfaced to producers and to the renderer's owner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `render` was called on a profile after `close`. This is caller misuse.
    #[error("profile is closed; render called after close")]
    ProfileClosed,

    /// The slot's worker is gone (the renderer shut down underneath the profile).
    #[error("slot worker has stopped")]
    WorkerStopped,

    #[error("terminal write failed")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
