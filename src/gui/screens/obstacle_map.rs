use std::convert::Infallible;

use iced::{
    Color, Element, Length, Task,
    widget::{button, canvas, column, container, row, scrollable, text},
};

use crate::{
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::MarkerMap,
    },
    map::{self, EMPTY_MAP_MESSAGE, MapView},
};

const MIN_ZOOM: u8 = 1;
const MAX_ZOOM: u8 = 18;

#[derive(Debug, Clone)]
pub enum MapState {
    Loading,
    Empty,
    Ready(MapView),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ObstacleMapScreen {
    map: MapState,
}

#[derive(Debug, Clone)]
pub enum ObstacleMapMessage {
    Loaded(Result<Option<MapView>, String>),
    Refresh,
    ZoomIn,
    ZoomOut,
}

fn msg(message: ObstacleMapMessage) -> ScreenMessage<ObstacleMapScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl ObstacleMapScreen {
    /// Every visit does a fresh full read of the store.
    pub fn new(state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        (Self { map: MapState::Loading }, Self::load(state))
    }

    fn load(state: &AppState) -> Task<ScreenMessage<Self>> {
        let Some(store) = state.store.clone() else {
            return Task::none();
        };
        Task::perform(
            async move {
                map::load_projection(&store)
                    .await
                    .map(MapView::from_projection)
                    .map_err(|e| format!("{:#}", e))
            },
            |result| msg(ObstacleMapMessage::Loaded(result)),
        )
    }

    fn zoom_by(&mut self, delta: i16) {
        if let MapState::Ready(view) = &mut self.map {
            view.zoom = (view.zoom as i16 + delta).clamp(MIN_ZOOM as i16, MAX_ZOOM as i16) as u8;
        }
    }

    fn map_view(view: &MapView) -> Element<'_, ScreenMessage<Self>> {
        let legend = view.markers.iter().enumerate().fold(
            column![text("Markers").size(18)].spacing(6),
            |c, (i, marker)| {
                c.push(text(format!(
                    "{}. ({}, {})\n{}",
                    i + 1,
                    marker.coordinates.latitude,
                    marker.coordinates.longitude,
                    marker.popup_text()
                )))
            },
        );

        column![
            row![
                button("-").on_press(msg(ObstacleMapMessage::ZoomOut)),
                text(format!("zoom {}", view.zoom)),
                button("+").on_press(msg(ObstacleMapMessage::ZoomIn)),
                button("Refresh").on_press(msg(ObstacleMapMessage::Refresh)),
            ]
            .spacing(10),
            row![
                canvas(MarkerMap::new(view.clone()))
                    .width(Length::FillPortion(3))
                    .height(Length::Fixed(500.0)),
                scrollable(legend).width(Length::FillPortion(1)).height(Length::Fixed(500.0)),
            ]
            .spacing(10),
        ]
        .spacing(10)
        .into()
    }
}

impl Screen for ObstacleMapScreen {
    type Message = ObstacleMapMessage;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let body: Element<'_, ScreenMessage<Self>> = match &self.map {
            MapState::Loading => text("Loading detections...").into(),
            MapState::Empty => text(EMPTY_MAP_MESSAGE).into(),
            MapState::Failed(err) => text(err.as_str()).color(Color::from_rgb(0.9, 0.3, 0.3)).into(),
            MapState::Ready(view) => Self::map_view(view),
        };

        container(
            column![
                text("Live Crowdsourced Obstacle Map").size(24),
                text(
                    "View all detected outdoor obstacles contributed by the crowd on an interactive map."
                ),
                body,
            ]
            .spacing(12),
        )
        .padding(10)
        .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            ObstacleMapMessage::Loaded(Ok(Some(view))) => {
                self.map = MapState::Ready(view);
                Task::none()
            }
            ObstacleMapMessage::Loaded(Ok(None)) => {
                self.map = MapState::Empty;
                Task::none()
            }
            ObstacleMapMessage::Loaded(Err(err)) => {
                self.map = MapState::Failed(err);
                Task::none()
            }
            ObstacleMapMessage::Refresh => {
                self.map = MapState::Loading;
                Self::load(state)
            }
            ObstacleMapMessage::ZoomIn => {
                self.zoom_by(1);
                Task::none()
            }
            ObstacleMapMessage::ZoomOut => {
                self.zoom_by(-1);
                Task::none()
            }
        }
    }
}
