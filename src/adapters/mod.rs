// Adapters - External system implementations

pub mod decode_libav;
pub mod dialog_rfd;
pub mod exec_ffmpeg;
pub mod fs_std;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use decode_libav::LibavFrameSource;
pub use dialog_rfd::RfdPromptAdapter;
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_std::FsStdAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use toml_config::{AppConfig, TomlConfigAdapter};
