use std::sync::Arc;

use crate::adapters::{AppConfig, FFmpegAdapter, FFprobeAdapter, FsStdAdapter, RfdPromptAdapter};
use crate::app::{compress_interactor::CompressInteractor, crop_interactor::CropInteractor};
use crate::domain::errors::DomainError;
use crate::ports::{EncodePort, FsPort, ProbePort};
use crate::ui::CropWindowPicker;

pub trait AppContainer {
    fn compress_interactor(&self) -> Arc<CompressInteractor>;
    fn crop_interactor(&self) -> &CropInteractor;
}

pub struct DefaultAppContainer {
    compress_interactor: Arc<CompressInteractor>,
    crop_interactor: CropInteractor,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let probe_port = Arc::new(FFprobeAdapter::new(config.ffprobe.clone()));
        let encode_port = Arc::new(FFmpegAdapter::new(config.ffmpeg.clone(), config.threads));
        let fs_port = Arc::new(FsStdAdapter::new());

        let compress_interactor = Arc::new(CompressInteractor::new(
            Arc::clone(&probe_port) as Arc<dyn ProbePort>,
            Arc::clone(&encode_port) as Arc<dyn EncodePort>,
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
            config.floor(),
            config.decay,
        ));

        let crop_interactor = CropInteractor::new(
            Box::new(RfdPromptAdapter::new()),
            Box::new(CropWindowPicker::new()),
            Arc::clone(&encode_port) as Arc<dyn EncodePort>,
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
        );

        Ok(Self {
            compress_interactor,
            crop_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn compress_interactor(&self) -> Arc<CompressInteractor> {
        Arc::clone(&self.compress_interactor)
    }

    fn crop_interactor(&self) -> &CropInteractor {
        &self.crop_interactor
    }
}
