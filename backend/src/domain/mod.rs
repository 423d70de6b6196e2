//! Domain primitives, services and ports.
//!
//! Purpose: define the feeding log's entities (`User`, `Event`), the hunger
//! classifier and the message generator, plus the services that implement
//! the driving ports on top of the driven repository ports. Nothing here
//! depends on Actix or Diesel.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `Event`, `EventWindow`: records and listing filters.
//! - `classify`, `HungerStatus`, `HungerReport`: hunger classification.
//! - `UsersService`, `FeedingService`: driving port implementations.

pub mod error;
pub mod event;
pub mod feeding_message;
pub mod feeding_service;
pub mod hunger;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::event::{Event, EventWindow};
pub use self::feeding_service::FeedingService;
pub use self::hunger::{HungerReport, HungerStatus, classify};
pub use self::trace_id::TraceId;
pub use self::user::User;
pub use self::users_service::UsersService;
