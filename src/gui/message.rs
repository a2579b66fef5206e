use crate::{
    core::db::StoreClient,
    gui::{
        screens::{ScreenMessage, obstacle_map::ObstacleMapScreen, upload_detect::UploadDetectScreen},
        widgets::Page,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    UploadDetect(ScreenMessage<UploadDetectScreen>),
    ObstacleMap(ScreenMessage<ObstacleMapScreen>),
    Navigate(Page),
    StoreReady(Result<StoreClient, String>),
}
