pub mod loading_page;
pub mod obstacle_map;
pub mod upload_detect;

use std::convert::Infallible;

use iced::{Element, Task};

use crate::gui::AppState;

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

impl<S: Screen<Message = Infallible, ParentMessage = Infallible>> ScreenMessage<S> {
    /// A screen that emits nothing can be mapped into any message type.
    pub fn never<T>(self) -> T {
        match self {
            ScreenMessage::ScreenMessage(never) | ScreenMessage::ParentMessage(never) => match never {},
        }
    }
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    LoadingPage(loading_page::LoadingPageScreen),
    UploadDetectPage(upload_detect::UploadDetectScreen),
    ObstacleMapPage(obstacle_map::ObstacleMapScreen),
}
