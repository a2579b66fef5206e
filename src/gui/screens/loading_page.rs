use std::convert::Infallible;

use iced::{
    Color, Element, Task,
    widget::{column, container, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

#[derive(Debug, Clone)]
pub enum LoadingPageScreen {
    Connecting,
    Failed(String),
}

impl Screen for LoadingPageScreen {
    type Message = Infallible;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content: Element<'_, ScreenMessage<Self>> = match self {
            LoadingPageScreen::Connecting => text("Connecting to the detection store...").into(),
            LoadingPageScreen::Failed(err) => column![
                text("Could not open the detection store").size(20),
                text(err.as_str()).color(Color::from_rgb(0.9, 0.3, 0.3)),
            ]
            .spacing(10)
            .into(),
        };
        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {}
    }
}
