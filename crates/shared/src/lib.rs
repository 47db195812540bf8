//! Deckgraph Shared - transfer objects for the API layer
//!
//! # Design Principles
//!
//! 1. **No business logic** - pure data types and serialization
//! 2. **No domain IDs** - raw `i64` ids in DTOs
//! 3. **Denormalized** - a DTO may aggregate several graph nodes

pub mod dto;

pub use dto::{CardDto, CommentDto, DeckDto};
