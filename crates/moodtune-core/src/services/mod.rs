//! Async services
//!
//! The session service is the only place where the controller is mutated
//! once the player is running. The Presentation layer talks to it through a
//! [`SessionHandle`] and renders the [`PlayerStatus`] it publishes.
//!
//! ```text
//! ┌──────────────┐ intents / media events ┌────────────────────────────┐
//! │ Presentation │ ─────────────────────▶ │ SessionService (tokio task)│
//! │   (handle)   │ ◀───────────────────── │  sampler · controller      │
//! └──────────────┘   watch<PlayerStatus>  │  interval · settle timer   │
//!                                         └────────────────────────────┘
//! ```

mod session;

pub use session::{PlayerStatus, ServiceError, SessionCommand, SessionHandle, SessionService};
