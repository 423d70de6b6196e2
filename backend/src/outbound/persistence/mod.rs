//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - Repositories only translate between row structs and domain records.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every read goes through [`fetch_all`], and every statement is built by
//!   Diesel with bound parameters.
//! - Database errors are mapped to `PersistenceError` before leaving here.
//!
//! # Example
//!
//! ```ignore
//! use chatte_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/chatte")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_event_repository;
mod diesel_health_probe;
mod diesel_user_repository;
mod models;
mod pool;
mod row_mapper;
mod schema;

pub use diesel_event_repository::DieselEventRepository;
pub use diesel_health_probe::DieselHealthProbe;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
pub use row_mapper::{QueryError, ScanError, fetch_all};
