//! Client-side messenger that talks to the relay.

pub mod messenger;
pub mod transport;

pub use messenger::{FALLBACK_REPLY, GREETING, Message, Messenger, PendingSend, SendOutcome};
pub use transport::{HttpRelayTransport, MessengerError, RelayTransport};
