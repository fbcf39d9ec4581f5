use crate::error::AppResult;

use super::ratatui::RatatuiImagePresenter;
use super::traits::{ImagePresenter, PresenterKind};

pub fn create_presenter(kind: PresenterKind) -> AppResult<Box<dyn ImagePresenter>> {
    match kind {
        PresenterKind::RatatuiImage => Ok(Box::new(RatatuiImagePresenter::new())),
    }
}
