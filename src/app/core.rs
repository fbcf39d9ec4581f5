use crate::backend::RgbaFrame;
use crate::config::Config;
use crate::error::AppResult;
use crate::input::{InputContext, KeymapPreset};
use crate::presenter::{ImagePresenter, PresenterKind, create_presenter};

pub struct App {
    pub config: Config,
    pub(crate) presenter: Box<dyn ImagePresenter>,
    /// Latest painted frame, kept so panning can re-crop without a render.
    pub(crate) last_frame: Option<RgbaFrame>,
}

impl App {
    pub fn new(presenter_kind: PresenterKind) -> AppResult<Self> {
        let config = Config::load()?;
        Self::new_with_config(presenter_kind, config)
    }

    pub fn new_with_config(presenter_kind: PresenterKind, config: Config) -> AppResult<Self> {
        let presenter = create_presenter(presenter_kind)?;
        Ok(Self::with_presenter(config, presenter))
    }

    pub(crate) fn with_presenter(config: Config, presenter: Box<dyn ImagePresenter>) -> Self {
        Self {
            config,
            presenter,
            last_frame: None,
        }
    }

    pub(crate) fn input_context(&self) -> InputContext {
        InputContext {
            preset: KeymapPreset::parse(&self.config.keymap.preset),
            scroll_step: i32::from(self.config.render.scroll_step_cells),
            cell_px: self.presenter.capabilities().cell_px,
        }
    }
}
