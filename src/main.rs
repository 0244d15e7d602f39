use clap::Parser;
use iced::widget::image::Handle;
use iced::widget::{button, canvas, column, container, pick_list, row, slider, stack, text, Column, Image};
use iced::{Alignment, ContentFit, Element, Length, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;
mod compose;
mod config;
mod error;
mod frames;
mod photo;
mod state;
mod ui;

use compose::export::export_async;
use config::Settings;
use frames::FrameCatalog;
use photo::loader::{load_photo, PHOTO_EXTENSIONS};
use state::data::{FrameId, Photo};
use state::edit::{OFFSET_RANGE, SCALE_RANGE, SCALE_STEP};
use state::session::{LoadOutcome, LoadTicket, Session};

/// Main application state
struct FrameStudio {
    /// Photo, frame and adjustments chosen by the user
    session: Session,
    /// Decoded bundled frames
    catalog: FrameCatalog,
    settings: Settings,
    /// Last rendered composite and its size in pixels
    preview: Option<(Handle, (u32, u32))>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Choose Content Image"
    PickPhoto,
    /// Background decode finished
    PhotoLoaded(LoadTicket, Result<Photo, String>),
    FrameSelected(FrameId),
    ScaleChanged(f32),
    OffsetXChanged(i32),
    OffsetYChanged(i32),
    /// Drag on the preview, in image pixels
    Nudge(i32, i32),
    /// Wheel on the preview, in scale steps
    Zoom(i32),
    /// User clicked "Clear All Images"
    Clear,
    /// User clicked "Download Framed Image"
    Export,
    /// Background export finished with the written path
    ExportComplete(Result<PathBuf, String>),
}

impl FrameStudio {
    /// Create a new instance of the application
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let mut app = FrameStudio {
            session: Session::new(&settings),
            catalog: FrameCatalog::new(),
            settings,
            preview: None,
            status: "Choose a content image to get started.".to_string(),
        };
        app.refresh_preview();

        log::info!("🎨 Frame generator started with layering {:?}", app.session.layering());
        (app, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickPhoto => {
                let file = FileDialog::new()
                    .set_title("Choose Content Image")
                    .add_filter("Images", &PHOTO_EXTENSIONS[..])
                    .pick_file();

                if let Some(path) = file {
                    self.status = format!("Loading {}...", path.display());
                    let ticket = self.session.begin_photo_load();

                    return Task::perform(load_photo(path), move |result| {
                        Message::PhotoLoaded(ticket, result.map_err(|e| e.to_string()))
                    });
                }

                Task::none()
            }
            Message::PhotoLoaded(ticket, result) => {
                match self.session.finish_photo_load(ticket, result) {
                    LoadOutcome::Loaded => {
                        if let Some(photo) = self.session.photo() {
                            self.status = format!("Loaded {} ({}x{})", photo.name, photo.width(), photo.height());
                        }
                        self.refresh_preview();
                    }
                    LoadOutcome::Failed(message) => {
                        log::warn!("Photo decode failed: {}", message);
                        self.status = "That file could not be opened as an image.".to_string();
                        show_notice("Could not open image", &message);
                    }
                    LoadOutcome::Stale => {
                        log::debug!("Dropping superseded photo load {:?}", ticket);
                    }
                }
                Task::none()
            }
            Message::FrameSelected(frame) => {
                self.session.select_frame(frame);
                self.refresh_preview();
                Task::none()
            }
            Message::ScaleChanged(scale) => {
                self.session.set_scale(scale);
                self.refresh_preview();
                Task::none()
            }
            Message::OffsetXChanged(offset) => {
                self.session.set_offset_x(offset);
                self.refresh_preview();
                Task::none()
            }
            Message::OffsetYChanged(offset) => {
                self.session.set_offset_y(offset);
                self.refresh_preview();
                Task::none()
            }
            Message::Nudge(dx, dy) => {
                self.session.nudge(dx, dy);
                self.refresh_preview();
                Task::none()
            }
            Message::Zoom(steps) => {
                self.session.zoom(steps);
                self.refresh_preview();
                Task::none()
            }
            Message::Clear => {
                self.session.clear();
                self.status = "Cleared.".to_string();
                self.refresh_preview();
                Task::none()
            }
            Message::Export => {
                let job = match self.session.prepare_export() {
                    Ok(job) => job,
                    Err(e) => {
                        self.status = e.to_string();
                        show_notice("Nothing to export", &e.to_string());
                        return Task::none();
                    }
                };

                let mut dialog = FileDialog::new()
                    .set_title("Save Framed Image")
                    .set_file_name(job.file_name())
                    .add_filter("PNG image", &["png"]);
                if let Some(dir) = &self.settings.export_dir {
                    dialog = dialog.set_directory(dir);
                }

                if let Some(path) = dialog.save_file() {
                    self.status = format!("Saving {}...", path.display());
                    return Task::perform(
                        export_async(job, self.catalog.clone(), path),
                        |result| Message::ExportComplete(result.map_err(|e| e.to_string())),
                    );
                }

                Task::none()
            }
            Message::ExportComplete(result) => {
                match result {
                    Ok(path) => {
                        self.status = format!("✅ Saved {}", path.display());
                    }
                    Err(message) => {
                        log::error!("Export failed: {}", message);
                        self.status = "Export failed.".to_string();
                        show_notice("Export failed", &message);
                    }
                }
                Task::none()
            }
        }
    }

    /// Re-render the preview through the same path as the export
    fn refresh_preview(&mut self) {
        self.preview = match self.session.render_preview(&self.catalog) {
            Ok(Some(composite)) => {
                let size = composite.dimensions();
                Some((Handle::from_rgba(size.0, size.1, composite.into_raw()), size))
            }
            Ok(None) => None,
            Err(e) => {
                log::error!("Preview failed: {}", e);
                self.status = e.to_string();
                None
            }
        };
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let adjustments = self.session.adjustments();

        let mut controls: Column<Message> = column![
            text("Controls").size(22),
            button("Choose Content Image")
                .on_press(Message::PickPhoto)
                .padding(10)
                .width(Length::Fill),
            text("Frame").size(14),
            pick_list(FrameId::ALL, self.session.frame(), Message::FrameSelected)
                .placeholder("Choose a frame")
                .width(Length::Fill),
        ]
        .spacing(12);

        // Placement controls only appear once there is a photo to place
        if self.session.has_photo() {
            controls = controls
                .push(text(format!("Image Scale: {:.1}x", adjustments.scale)).size(14))
                .push(slider(SCALE_RANGE, adjustments.scale, Message::ScaleChanged).step(SCALE_STEP))
                .push(text(format!("Horizontal Position: {}px", adjustments.offset_x)).size(14))
                .push(slider(OFFSET_RANGE, adjustments.offset_x, Message::OffsetXChanged))
                .push(text(format!("Vertical Position: {}px", adjustments.offset_y)).size(14))
                .push(slider(OFFSET_RANGE, adjustments.offset_y, Message::OffsetYChanged))
                .push(
                    button("Clear All Images")
                        .on_press(Message::Clear)
                        .padding(10)
                        .width(Length::Fill),
                );
        }

        controls = controls
            .push(
                button("Download Framed Image")
                    .on_press(Message::Export)
                    .padding(10)
                    .width(Length::Fill),
            )
            .push(text(&self.status).size(14));

        let preview: Element<Message> = match &self.preview {
            Some((handle, size)) => {
                let picture = Image::new(handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill);

                let gestures = canvas(ui::canvas::PreviewGestures {
                    image_size: *size,
                    enabled: self.session.has_photo(),
                })
                .width(Length::Fill)
                .height(Length::Fill);

                if self.session.has_photo() {
                    stack![picture, gestures].into()
                } else {
                    let hint = container(text("Upload content image").size(16))
                        .padding(12)
                        .style(container::rounded_box);
                    stack![
                        picture,
                        container(hint).center(Length::Fill),
                    ]
                    .into()
                }
            }
            None => container(text("Select a frame first").size(16))
                .center(Length::Fill)
                .into(),
        };

        let content = row![
            container(controls).width(Length::FillPortion(2)).padding(20),
            column![text("Preview").size(22), preview]
                .spacing(12)
                .padding(20)
                .width(Length::FillPortion(3)),
        ]
        .spacing(20)
        .align_y(Alignment::Start);

        container(
            column![text("Mahdiyya Meet Frame Generator").size(32), content]
                .spacing(20)
                .align_x(Alignment::Center),
        )
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Show a blocking warning dialog
fn show_notice(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn run_gui(config: Option<PathBuf>) -> iced::Result {
    let settings = Settings::load_or_create(config.as_deref()).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable settings: {}", e);
        Settings::default()
    });

    iced::application(
        "Mahdiyya Meet Frame Generator",
        FrameStudio::update,
        FrameStudio::view,
    )
    .theme(FrameStudio::theme)
    .centered()
    .run_with(move || FrameStudio::new(settings))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Cli::parse();
    match args.command {
        Some(command) => cli::run(command, args.config.as_deref()),
        None => match run_gui(args.config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("GUI failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
