use crate::app::App;
use crate::config::Config;
use crate::input::KeymapPreset;
use crate::presenter::PresenterKind;

#[test]
fn new_with_config_derives_input_context() {
    let mut config = Config::default();
    config.keymap.preset = "emacs".to_string();
    config.render.scroll_step_cells = 5;

    let app = App::new_with_config(PresenterKind::RatatuiImage, config).expect("app init");
    let input = app.input_context();

    assert_eq!(input.preset, KeymapPreset::Emacs);
    assert_eq!(input.scroll_step, 5);
    assert!(input.cell_px.is_some());
    assert!(app.last_frame.is_none());
}

#[test]
fn unknown_keymap_preset_falls_back_to_default() {
    let mut config = Config::default();
    config.keymap.preset = "vi".to_string();

    let app = App::new_with_config(PresenterKind::RatatuiImage, config).expect("app init");
    assert_eq!(app.input_context().preset, KeymapPreset::Default);
}
