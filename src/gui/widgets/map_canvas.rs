use iced::{
    Color, Point, Rectangle, Renderer, Size, Theme, mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke, Text},
};

use crate::map::{MapView, mercator_offset};

const MARKER_RADIUS: f32 = 7.0;

/// Markers drawn on a plain Web Mercator plane around the map center.
#[derive(Debug, Clone)]
pub struct MarkerMap {
    view: MapView,
}

impl MarkerMap {
    pub fn new(view: MapView) -> Self {
        Self { view }
    }
}

impl<Message> canvas::Program<Message> for MarkerMap {
    type State = ();

    fn draw(
        &self,
        _state: &(),
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgb8(0xe8, 0xee, 0xe4));

        let origin = frame.center();
        let grid = Color::from_rgb8(0xc8, 0xd0, 0xc4);
        for i in 1..8 {
            let x = bounds.width * i as f32 / 8.0;
            let y = bounds.height * i as f32 / 8.0;
            frame.stroke(
                &Path::line(Point::new(x, 0.0), Point::new(x, bounds.height)),
                Stroke::default().with_color(grid),
            );
            frame.stroke(
                &Path::line(Point::new(0.0, y), Point::new(bounds.width, y)),
                Stroke::default().with_color(grid),
            );
        }

        for (i, marker) in self.view.markers.iter().enumerate() {
            let (dx, dy) = mercator_offset(self.view.center, marker.coordinates, self.view.zoom);
            let at = Point::new(origin.x + dx as f32, origin.y + dy as f32);
            if !Rectangle::new(Point::ORIGIN, Size::new(bounds.width, bounds.height)).contains(at) {
                continue;
            }
            frame.fill(&Path::circle(at, MARKER_RADIUS), Color::from_rgb8(0x28, 0x7d, 0xd6));
            frame.stroke(
                &Path::circle(at, MARKER_RADIUS),
                Stroke::default().with_color(Color::WHITE).with_width(2.0),
            );
            frame.fill_text(Text {
                content: format!("{} {}", i + 1, marker.filename),
                position: Point::new(at.x + MARKER_RADIUS + 3.0, at.y - MARKER_RADIUS),
                color: Color::BLACK,
                size: iced::Pixels(13.0),
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
