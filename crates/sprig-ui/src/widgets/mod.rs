pub mod button;
pub mod panel;
pub mod scene;

pub use button::Button;
pub use panel::Panel;
pub use scene::{Object, ObjectId, Scene};
