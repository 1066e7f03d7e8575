// Audio module - duration probing for input files

pub mod metadata;

pub use metadata::get_audio_duration;
