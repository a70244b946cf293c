pub mod user;
pub mod biodata;
pub mod favorite;
pub mod contact_request;
pub mod success_story;

pub use user::*;
pub use biodata::*;
pub use favorite::*;
pub use contact_request::*;
pub use success_story::*;
