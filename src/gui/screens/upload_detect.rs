use std::{convert::Infallible, path::PathBuf, sync::Arc};

use anyhow::Context;
use iced::{
    Color, Element, Length, Task,
    widget::{Image, button, column, container, image::Handle, row, scrollable, text, text_input},
};
use rfd::AsyncFileDialog;

use crate::{
    core::db::{DetectionRepository, StoreClient},
    detection::ObjectDetector,
    geolocation,
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
    },
    models::DetectionRecord,
    pipeline::{self, SaveOutcome},
    table::{EMPTY_TABLE_MESSAGE, RecordTable},
};

/// An uploaded image after detection
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub labels: Vec<String>,
    pub preview: Handle,
    pub annotated: Handle,
}

#[derive(Debug, Clone)]
pub enum Status {
    Success(String),
    Warning(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct UploadDetectScreen {
    location: String,
    upload: Option<Upload>,
    detecting: bool,
    status: Option<Status>,
    table: Option<Result<RecordTable, String>>,
    show_table: bool,
}

#[derive(Debug, Clone)]
pub enum UploadDetectMessage {
    LocationChanged(String),
    PickImage,
    ImagePicked(Option<PathBuf>),
    Detected(Result<Upload, String>),
    Save,
    Saved(Result<SaveOutcome, String>),
    ToggleTable,
    TableLoaded(Result<RecordTable, String>),
}

fn msg(message: UploadDetectMessage) -> ScreenMessage<UploadDetectScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl UploadDetectScreen {
    pub fn new(state: &AppState) -> Self {
        let location = geolocation::prefill(state.settings.location.geolocator().as_ref());
        Self {
            location,
            upload: None,
            detecting: false,
            status: None,
            table: None,
            show_table: false,
        }
    }

    fn load_table(store: Option<StoreClient>) -> Task<ScreenMessage<Self>> {
        let Some(store) = store else {
            return Task::none();
        };
        Task::perform(
            async move {
                store
                    .stream_detections()
                    .await
                    .map(|docs| RecordTable::from_documents(&docs))
                    .map_err(|e| format!("{:#}", e))
            },
            |result| msg(UploadDetectMessage::TableLoaded(result)),
        )
    }

    fn status_view(status: &Status) -> Element<'_, ScreenMessage<Self>> {
        let (body, color) = match status {
            Status::Success(s) => (s, Color::from_rgb(0.3, 0.75, 0.4)),
            Status::Warning(s) => (s, Color::from_rgb(0.9, 0.7, 0.2)),
            Status::Error(s) => (s, Color::from_rgb(0.9, 0.3, 0.3)),
        };
        text(body.as_str()).color(color).into()
    }

    fn table_view(table: &RecordTable) -> Element<'_, ScreenMessage<Self>> {
        if table.is_empty() {
            return text(EMPTY_TABLE_MESSAGE).into();
        }
        let cell = |value: &str, size: f32| {
            container(text(value.to_string()).size(size)).width(Length::Fixed(200.0))
        };
        let header = table
            .columns
            .iter()
            .fold(row![].spacing(8), |r, col| r.push(cell(col, 15.0)));
        let rows = table.rows.iter().fold(column![header].spacing(4), |c, values| {
            c.push(
                values
                    .iter()
                    .fold(row![].spacing(8), |r, value| r.push(cell(value, 13.0))),
            )
        });
        container(rows)
            .padding(8)
            .style(container::bordered_box)
            .into()
    }
}

/// Decode the file, run detection and prepare both previews.
fn detect_file(path: PathBuf, detector: Arc<dyn ObjectDetector>) -> anyhow::Result<Upload> {
    let img = image::ImageReader::open(&path)
        .with_context(|| format!("Failed to open image {:?}", path))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let analysis = pipeline::analyze(detector.as_ref(), filename, &img)?;
    let annotated = analysis.annotated(&img);
    let annotated = image::DynamicImage::ImageRgb8(annotated).to_rgba8();
    let preview = img.to_rgba8();

    Ok(Upload {
        filename: analysis.filename,
        labels: analysis.labels,
        preview: Handle::from_rgba(preview.width(), preview.height(), preview.into_raw()),
        annotated: Handle::from_rgba(annotated.width(), annotated.height(), annotated.into_raw()),
    })
}

impl Screen for UploadDetectScreen {
    type Message = UploadDetectMessage;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut content = column![
            text("Upload Outdoor Image for Obstacle Detection").size(24),
            text(
                "Upload an outdoor photo (road, street, park), and enter your location as \
                 latitude,longitude (e.g. 12.9716,77.5946)."
            ),
            text("Enter your location (GPS 'latitude,longitude', ex: 12.9716,77.5946):"),
            text_input("latitude,longitude", &self.location)
                .on_input(|s| msg(UploadDetectMessage::LocationChanged(s))),
            row![
                if self.detecting {
                    button("Detecting...")
                } else {
                    button("Upload Your Outdoor Image").on_press(msg(UploadDetectMessage::PickImage))
                },
                text("jpg, jpeg or png"),
            ]
            .spacing(10),
        ]
        .spacing(12);

        if let Some(status) = &self.status {
            content = content.push(Self::status_view(status));
        }

        if let Some(upload) = &self.upload {
            let labels = upload.labels.iter().fold(
                column![text("Detected obstacles in your photo:").size(18)].spacing(4),
                |c, label| c.push(text(format!("- {}", label))),
            );
            content = content
                .push(text(format!("Uploaded Image: {}", upload.filename)))
                .push(Image::new(upload.preview.clone()).width(Length::Fill))
                .push(labels)
                .push(text("Obstacles Detected"))
                .push(Image::new(upload.annotated.clone()).width(Length::Fill))
                .push(button("Save Detection to Map").on_press(msg(UploadDetectMessage::Save)));
        }

        let toggle = if self.show_table {
            "Hide crowdsourced obstacle database"
        } else {
            "Show crowdsourced obstacle database"
        };
        content = content.push(button(toggle).on_press(msg(UploadDetectMessage::ToggleTable)));

        if self.show_table {
            content = content.push(match &self.table {
                None => text("Loading...").into(),
                Some(Ok(table)) => Self::table_view(table),
                Some(Err(err)) => text(err.as_str()).color(Color::from_rgb(0.9, 0.3, 0.3)).into(),
            });
        }

        scrollable(content.padding(10)).height(Length::Fill).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            UploadDetectMessage::LocationChanged(location) => {
                self.location = location;
                Task::none()
            }
            UploadDetectMessage::PickImage => Task::perform(
                AsyncFileDialog::new()
                    .set_title("Upload Your Outdoor Image")
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .pick_file(),
                |handle| msg(UploadDetectMessage::ImagePicked(handle.map(|h| h.path().to_path_buf()))),
            ),
            UploadDetectMessage::ImagePicked(None) => Task::none(),
            UploadDetectMessage::ImagePicked(Some(path)) => {
                let detector = match &state.detector {
                    Ok(detector) => detector.clone(),
                    Err(err) => {
                        self.status = Some(Status::Error(err.clone()));
                        return Task::none();
                    }
                };
                self.detecting = true;
                self.status = None;
                Task::perform(
                    async move {
                        match tokio::task::spawn_blocking(move || detect_file(path, detector)).await {
                            Ok(result) => result.map_err(|e| format!("{:#}", e)),
                            Err(join_err) => Err(join_err.to_string()),
                        }
                    },
                    |result| msg(UploadDetectMessage::Detected(result)),
                )
            }
            UploadDetectMessage::Detected(result) => {
                self.detecting = false;
                match result {
                    Ok(upload) => self.upload = Some(upload),
                    Err(err) => self.status = Some(Status::Error(err)),
                }
                Task::none()
            }
            UploadDetectMessage::Save => {
                let (Some(upload), Some(store)) = (&self.upload, state.store.clone()) else {
                    return Task::none();
                };
                let record = DetectionRecord::new(
                    upload.filename.clone(),
                    self.location.clone(),
                    upload.labels.clone(),
                );
                Task::perform(
                    async move {
                        pipeline::save_detection(&store, &record)
                            .await
                            .map_err(|e| format!("{:#}", e))
                    },
                    |result| msg(UploadDetectMessage::Saved(result)),
                )
            }
            UploadDetectMessage::Saved(result) => {
                self.status = Some(match result {
                    Ok(outcome @ SaveOutcome::Saved(_)) => Status::Success(outcome.message().to_string()),
                    Ok(outcome @ SaveOutcome::Rejected(_)) => Status::Warning(outcome.message().to_string()),
                    Err(err) => Status::Error(err),
                });
                if self.show_table {
                    return Self::load_table(state.store.clone());
                }
                Task::none()
            }
            UploadDetectMessage::ToggleTable => {
                self.show_table = !self.show_table;
                if self.show_table {
                    self.table = None;
                    return Self::load_table(state.store.clone());
                }
                Task::none()
            }
            UploadDetectMessage::TableLoaded(result) => {
                self.table = Some(result);
                Task::none()
            }
        }
    }
}
