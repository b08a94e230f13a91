// Application layer - Use case interactors

pub mod compress_interactor;
pub mod container;
pub mod crop_interactor;

// Re-export interactors
pub use compress_interactor::CompressInteractor;
pub use container::{AppContainer, DefaultAppContainer};
pub use crop_interactor::{CropChoice, CropInteractor};
