pub mod page;
pub mod task;
pub mod user;

pub use page::{Page, PageQuery};
pub use task::{CreateTaskRequest, NewTask, Task};
pub use user::{CreateUser, NewUser, SearchQuery, UpdateUser, User, UserResponse};
