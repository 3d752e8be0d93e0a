mod context;
mod recovery;

pub use context::ContextStore;
pub use recovery::RecoveryStore;
