/// Client-side state layer
///
/// Pure, synchronous, UI-agnostic: a reducer over fetched lists, a
/// multi-field pet filter, a favorites set, and the session store any
/// frontend embeds. Nothing here talks to the network.
pub mod filters;
pub mod session;
pub mod state;

pub use filters::{AgeFilter, PetFilters};
pub use session::{Session, SessionKind, SessionStore};
pub use state::{Action, ClientState, ListKey};
