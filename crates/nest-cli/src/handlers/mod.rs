pub mod board;
pub mod column;
pub mod export;
pub mod tag;
pub mod task;
