mod app;
mod message;
mod screens;
mod state;
mod widgets;

pub use app::ObstacleMapApp;
pub use message::Message;
pub use state::AppState;

use crate::config::Settings;

pub const TITLE: &str = "Dynamic Crowdsourced Outdoor Obstacle Mapping";

/// Open the desktop interface. Blocks until the window closes.
pub fn run(settings: Settings) -> anyhow::Result<()> {
    iced::application(
        move || ObstacleMapApp::new(settings.clone()),
        ObstacleMapApp::update,
        ObstacleMapApp::view,
    )
    .title(TITLE)
    .run()
    .map_err(|e| anyhow::anyhow!("GUI exited with an error: {}", e))
}
