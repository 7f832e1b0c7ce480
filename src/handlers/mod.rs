pub mod health;
pub mod item;
pub mod page;

pub use health::*;
pub use item::*;
pub use page::*;
