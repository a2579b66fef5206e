mod map_canvas;

pub use map_canvas::MarkerMap;

use iced::{
    Element, Length, Theme,
    widget::{button, column, container, row, text},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    UploadDetect,
    ObstacleMap,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::UploadDetect, Page::ObstacleMap];

    pub fn title(self) -> &'static str {
        match self {
            Page::UploadDetect => "Upload & Detect",
            Page::ObstacleMap => "Obstacle Map",
        }
    }
}

/// Sidebar page picker next to the main content.
pub fn layout<'a, Message>(
    current: Page,
    on_navigate: impl Fn(Page) -> Message,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let nav = Page::ALL.iter().fold(
        column![text("Select a Page").size(18)].spacing(10),
        |col, &page| {
            let style: fn(&Theme, button::Status) -> button::Style = if page == current {
                button::primary
            } else {
                button::secondary
            };
            col.push(
                button(text(page.title()))
                    .width(Length::Fill)
                    .style(style)
                    .on_press(on_navigate(page)),
            )
        },
    );

    container(row![
        container(nav)
            .padding(10)
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .style(container::bordered_box),
        container(main_content.into())
            .padding(10)
            .width(Length::FillPortion(4))
            .height(Length::Fill),
    ]
    .spacing(10))
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
