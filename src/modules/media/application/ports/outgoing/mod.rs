pub mod db;
pub mod storage;

pub use db::*;
pub use storage::*;
