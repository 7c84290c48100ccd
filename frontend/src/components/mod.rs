pub mod result_modal;
pub mod segment_form;
pub mod segment_list;
pub mod spin_button;
pub mod wheel_canvas;

pub use result_modal::ResultModal;
pub use segment_form::SegmentForm;
pub use segment_list::SegmentList;
pub use spin_button::SpinButton;
pub use wheel_canvas::WheelCanvas;
