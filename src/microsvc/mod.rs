//! microsvc: command dispatch for the ledger.
//!
//! A `Service<R>` maps command names to handlers. Each handler receives a
//! `Context<R>` with the JSON input and a reference to the shared state `R`
//! (here, the ledger service) and returns a JSON value.
//!
//! ```ignore
//! let service = Service::new(ledger)
//!     .command("ledger.list", |ctx| { /* ... */ });
//! let result = service.dispatch("ledger.list", json!({ "ledger": "damaged" }));
//! ```
//!
//! ## Handler convention
//!
//! Each handler file under `handlers/` exports:
//!
//! - `COMMAND: &str`: the command name
//! - `guard(ctx) -> bool`: cheap shape check on the raw input
//! - `handle(ctx) -> Result<Value, HandlerError>`
//!
//! and is registered with [`register_handlers!`](crate::register_handlers).

mod context;
mod error;
mod service;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules that follow the handler convention.
///
/// ```ignore
/// let service = ledger_service::register_handlers!(
///     Service::new(ledger),
///     handlers::ledger_submit,
///     handlers::ledger_list,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
