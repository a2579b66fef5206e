use iced::{
    Element, Task,
    widget::{column, text},
};

use crate::{
    config::Settings,
    gui::{
        AppState, Message, TITLE,
        screens::{
            Screen, ScreenData, ScreenMessage, loading_page::LoadingPageScreen,
            obstacle_map::ObstacleMapScreen, upload_detect::UploadDetectScreen,
        },
        widgets::{Page, layout},
    },
};

pub struct ObstacleMapApp {
    state: AppState,
    page: Page,
    screen: ScreenData,
}

impl ObstacleMapApp {
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let store_settings = settings.store.clone();
        let app = Self {
            state: AppState::new(settings),
            page: Page::UploadDetect,
            screen: ScreenData::LoadingPage(LoadingPageScreen::Connecting),
        };
        let connect = Task::perform(
            async move {
                store_settings
                    .connect()
                    .await
                    .map_err(|e| format!("{:#}", e))
            },
            Message::StoreReady,
        );
        (app, connect)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::StoreReady(Ok(store)) => {
                self.state.store = Some(store);
                self.open(self.page)
            }
            Message::StoreReady(Err(err)) => {
                tracing::error!(%err, "store unavailable");
                self.screen = ScreenData::LoadingPage(LoadingPageScreen::Failed(err));
                Task::none()
            }
            Message::Navigate(page) => {
                self.page = page;
                if self.state.store.is_none() {
                    return Task::none();
                }
                self.open(page)
            }
            Message::UploadDetect(ScreenMessage::ScreenMessage(msg)) => match &mut self.screen {
                ScreenData::UploadDetectPage(screen) => screen
                    .update(msg, &mut self.state)
                    .map(Message::UploadDetect),
                _ => Task::none(),
            },
            Message::ObstacleMap(ScreenMessage::ScreenMessage(msg)) => match &mut self.screen {
                ScreenData::ObstacleMapPage(screen) => screen
                    .update(msg, &mut self.state)
                    .map(Message::ObstacleMap),
                _ => Task::none(),
            },
            Message::UploadDetect(ScreenMessage::ParentMessage(never))
            | Message::ObstacleMap(ScreenMessage::ParentMessage(never)) => match never {},
        }
    }

    /// Build a fresh screen for `page`, like a page rerun.
    fn open(&mut self, page: Page) -> Task<Message> {
        match page {
            Page::UploadDetect => {
                self.screen = ScreenData::UploadDetectPage(UploadDetectScreen::new(&self.state));
                Task::none()
            }
            Page::ObstacleMap => {
                let (screen, task) = ObstacleMapScreen::new(&self.state);
                self.screen = ScreenData::ObstacleMapPage(screen);
                task.map(Message::ObstacleMap)
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = match &self.screen {
            ScreenData::LoadingPage(screen) => screen.view().map(ScreenMessage::never),
            ScreenData::UploadDetectPage(screen) => screen.view().map(Message::UploadDetect),
            ScreenData::ObstacleMapPage(screen) => screen.view().map(Message::ObstacleMap),
        };

        column![text(TITLE).size(28), layout(self.page, Message::Navigate, content)]
            .spacing(10)
            .padding(10)
            .into()
    }
}
