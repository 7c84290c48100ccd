pub mod segment_service;
