//! Persistence seams. The ranking and learning crates only see these traits;
//! `aisle-storage` provides the SQLite implementation.

mod graph_storage;
mod shopping_storage;

pub use graph_storage::{IEdgeSink, IGraphStorage};
pub use shopping_storage::{IShoppingStorage, IUnitOfWork};
