pub mod form_state;
pub mod use_segments;

pub use form_state::*;
pub use use_segments::*;
