pub mod key_action;
pub mod key_handler;

pub use key_action::KeyAction;
pub use key_handler::handle_key;
