//! Sign-in gate: the pre-authentication flow state machine.
//!
//! Exactly one flow state is active at a time; every screen of the gate
//! (sign-in, forced password change, emailed-token reset, forgot
//! password, locked account) is a variant of [`state::LoginFlow`].

pub mod render;
pub mod state;
pub mod update;

pub use state::LoginFlow;
pub use update::GateAction;
