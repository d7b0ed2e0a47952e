//! Terminal front end

pub mod check;
pub mod play;
pub mod view_state;
