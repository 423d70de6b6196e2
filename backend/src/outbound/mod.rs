//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories and the health probe.
//!
//! Adapters convert between domain types and storage representations. They
//! contain no business logic.

pub mod persistence;
