//! Business rules. Services own no storage; they are handed repositories at construction.

pub mod tasks;
pub mod users;

pub use tasks::TaskService;
pub use users::UserService;
