mod menu;
mod view;

use crate::app::App;
use ratatui::Frame;

/// Top-level render dispatcher. The file menu draws as a popup over the
/// main view when open.
pub fn render(f: &mut Frame, app: &mut App) {
    view::render_main(f, app);
    if app.menu_open {
        menu::render_menu(f, app);
    }
}
