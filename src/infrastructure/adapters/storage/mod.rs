//! Storage Adapter - 临时音频文件

mod temp_audio_dir;

pub use temp_audio_dir::{remove_with_retry, TempAudioDir};
