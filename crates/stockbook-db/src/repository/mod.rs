//! # Repository Implementations
//!
//! One repository per entity, each a thin struct over the shared
//! [`SqlitePool`](sqlx::SqlitePool):
//!
//! - [`category`] - Category CRUD + default seeding
//! - [`item`] - Item CRUD + quantity updates
//! - [`customer`] - Customer CRUD
//! - [`invoice`] - Invoice reads + the transactional save workflow
//!
//! Repositories are cheap to construct; [`Store`](crate::Store) hands out a
//! fresh one per call site.

pub mod category;
pub mod customer;
pub mod invoice;
pub mod item;
