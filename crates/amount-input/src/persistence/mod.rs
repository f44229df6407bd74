//! Persistence module - versioned snapshot of the control state.

mod persisted_state;
mod persistence_errors;

pub use persisted_state::PersistedState;
pub use persistence_errors::PersistenceError;
