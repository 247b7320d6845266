#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] repoviz_core::Error),
    #[error(transparent)]
    Layout(#[from] repoviz_layout::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
