use chrono::{Datelike, Utc};
use iced::widget::{
    button, canvas, column, container, horizontal_space, image, mouse_area, progress_bar, row,
    stack, text, text_input, Space,
};
use iced::{
    Alignment, ContentFit, Degrees, Element, Font, Length, Padding, Rotation, Subscription, Task,
    Theme,
};
use iced_aw::Wrap;
use std::cmp::Ordering;

mod export;
mod metadata;
mod photo;
mod state;
mod ui;

use metadata::{AlbumInfo, InlineImage};
use state::session::{AppMode, SessionEvent, SessionState, REVEAL_TICK, SCATTER_SETTLE};
use state::slots::{PhotoSlot, SLOT_COUNT};

/// Side of one photo frame on the poster
const CELL: f32 = 96.0;
/// Gap between frames in the grid
const GAP: f32 = 6.0;
const GRID_WIDTH: f32 = 4.0 * CELL + 3.0 * GAP;
const GRID_HEIGHT: f32 = 3.0 * CELL + 2.0 * GAP;
const POSTER_WIDTH: f32 = 450.0;
const POSTER_HEIGHT: f32 = 620.0;

/// Main application state
struct PosterApp {
    /// The one session everything hangs off
    session: SessionState,
    /// True while a capture/save is in flight; disables the export control
    is_exporting: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Any click on the landing splash
    EnterStudio,
    /// The credit-line input changed
    NameEdited(String),
    /// User asked for a random curated title
    ShuffleTitle,
    /// User clicked slot `index` to pick a photo
    PickPhoto(usize),
    /// The picker/loader finished; `None` means the dialog was dismissed
    PhotoPicked {
        index: usize,
        epoch: u64,
        outcome: Option<Result<PhotoSlot, String>>,
    },
    /// User hit the reveal control
    RevealMemories,
    /// One reveal ticker period elapsed
    RevealTick,
    /// The 800ms settle timer for the given cycle elapsed
    ScatterSettled(u64),
    /// The async title request for the given cycle resolved
    TitleResolved {
        epoch: u64,
        result: Result<AlbumInfo, String>,
    },
    /// User hit the export control
    ExportPoster,
    /// The window capture arrived
    Screenshotted(iced::window::Screenshot),
    /// The poster file was written (or not)
    ExportComplete(Result<String, String>),
}

impl PosterApp {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let session = SessionState::new();
        println!("🎛️  Vinyl Poster initialized; {} slots ready", SLOT_COUNT);

        (
            PosterApp {
                session,
                is_exporting: false,
                status: String::from("Drop twelve months into the grid."),
            },
            Task::none(),
        )
    }

    /// Feed one event through the session reducer
    fn apply(&mut self, event: SessionEvent) {
        self.session = self.session.reduce(event);
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EnterStudio => {
                self.apply(SessionEvent::ExitLanding);
                Task::none()
            }

            Message::NameEdited(name) => {
                self.apply(SessionEvent::NameEdited(name));
                Task::none()
            }

            Message::ShuffleTitle => {
                self.apply(SessionEvent::TitleChosen(metadata::shuffle_inspiration()));
                Task::none()
            }

            Message::PickPhoto(index) => {
                let epoch = self.session.epoch;
                Task::perform(photo::pick_and_load(index), move |outcome| {
                    Message::PhotoPicked {
                        index,
                        epoch,
                        outcome: outcome.map(|loaded| loaded.map_err(|e| e.to_string())),
                    }
                })
            }

            Message::PhotoPicked {
                index,
                epoch,
                outcome,
            } => {
                match outcome {
                    // Dialog dismissed: nothing changes
                    None => {}
                    Some(Err(error)) => {
                        eprintln!("⚠️  Photo load failed: {}", error);
                        self.status = format!("Could not read that image: {}", error);
                    }
                    Some(Ok(slot)) => {
                        if epoch == self.session.epoch {
                            self.status = format!("Month {:02} updated.", slot.month);
                        } else {
                            println!("🗑️  Discarding photo {} from a previous cycle", slot.id);
                        }
                        self.apply(SessionEvent::PhotoLoaded { epoch, index, slot });
                    }
                }
                Task::none()
            }

            Message::RevealMemories => {
                let before = self.session.epoch;
                self.apply(SessionEvent::RevealStarted);
                if self.session.epoch == before {
                    // Reducer refused (wrong mode); nothing to run
                    return Task::none();
                }

                println!("🎬 Reveal cycle {} started", self.session.epoch);
                self.status = String::from("Dropping the needle...");

                if !self.session.wants_album_title() {
                    println!("🎞️  Empty grid: skipping the title request");
                    return Task::none();
                }

                let epoch = self.session.epoch;
                let photos: Vec<InlineImage> = self
                    .session
                    .slots
                    .filled()
                    .into_iter()
                    .map(|photo| InlineImage {
                        mime: photo.mime,
                        data: photo.base64.clone(),
                    })
                    .collect();
                let user_name = self.session.user_name.clone();

                Task::perform(
                    metadata::gemini::request_title(photos, user_name),
                    move |result| Message::TitleResolved {
                        epoch,
                        result: result.map_err(|e| e.to_string()),
                    },
                )
            }

            Message::RevealTick => {
                self.apply(SessionEvent::RevealTicked);

                // Last frame just landed: give it a beat, then scatter
                if self.session.mode == AppMode::Generating
                    && self.session.revealed_count == SLOT_COUNT
                {
                    let epoch = self.session.epoch;
                    return Task::perform(tokio::time::sleep(SCATTER_SETTLE), move |_| {
                        Message::ScatterSettled(epoch)
                    });
                }
                Task::none()
            }

            Message::ScatterSettled(epoch) => {
                let was_generating = self.session.mode == AppMode::Generating;
                self.apply(SessionEvent::ScatterSettled { epoch });

                if was_generating && self.session.mode == AppMode::Revealed {
                    println!("💥 Scatter burst: \"{}\"", self.session.album.title);
                    self.status = format!("\"{}\" is on the wall.", self.session.album.title);
                }
                Task::none()
            }

            Message::TitleResolved { epoch, result } => {
                let album = match result {
                    Ok(album) => {
                        println!("🎙️  Title arrived: \"{}\"", album.title);
                        album
                    }
                    Err(error) => {
                        // Never fatal: the fallback is a perfectly good album
                        eprintln!("🎙️  Title generation failed: {}", error);
                        AlbumInfo::fallback(&self.session.user_name)
                    }
                };
                self.apply(SessionEvent::TitleResolved { epoch, album });
                Task::none()
            }

            Message::ExportPoster => {
                if self.is_exporting {
                    return Task::none();
                }
                self.is_exporting = true;
                self.status = String::from("Capturing the poster...");

                iced::window::get_latest().then(|id| match id {
                    Some(id) => iced::window::screenshot(id).map(Message::Screenshotted),
                    None => Task::done(Message::ExportComplete(Err(String::from(
                        "no open window to capture",
                    )))),
                })
            }

            Message::Screenshotted(shot) => {
                let title = self.session.album.title.clone();
                Task::perform(
                    export::save_poster(
                        shot.bytes.to_vec(),
                        shot.size.width,
                        shot.size.height,
                        title,
                    ),
                    |result| {
                        Message::ExportComplete(
                            result
                                .map(|path| path.display().to_string())
                                .map_err(|e| e.to_string()),
                        )
                    },
                )
            }

            Message::ExportComplete(result) => {
                self.is_exporting = false;
                match result {
                    Ok(path) => {
                        println!("💾 Poster saved to {}", path);
                        self.status = format!("Saved {}", path);
                    }
                    Err(error) => {
                        eprintln!("❌ Export failed: {}", error);
                        self.status =
                            String::from("Export failed. The poster never left the turntable.");
                    }
                }
                Task::none()
            }
        }
    }

    /// The 450ms reveal ticker, alive only while a reveal is running
    fn subscription(&self) -> Subscription<Message> {
        if self.session.mode == AppMode::Generating && self.session.revealed_count < SLOT_COUNT {
            iced::time::every(REVEAL_TICK).map(|_| Message::RevealTick)
        } else {
            Subscription::none()
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match self.session.mode {
            AppMode::Landing => self.landing_view(),
            _ => self.studio_view(),
        }
    }

    /// Full-window splash: a spinning record, exits on any click
    fn landing_view(&self) -> Element<Message> {
        let art = column![
            canvas(ui::vinyl::VinylRecord { spinning: true })
                .width(220)
                .height(220),
            text("VINYL POSTER")
                .size(14)
                .font(Font::MONOSPACE)
                .color(ui::VINTAGE_CREAM),
            text("press anywhere to drop the needle")
                .size(10)
                .color(ui::FAINT_WHITE),
        ]
        .spacing(18)
        .align_x(Alignment::Center);

        mouse_area(
            container(art)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(ui::backdrop),
        )
        .on_press(Message::EnterStudio)
        .into()
    }

    fn studio_view(&self) -> Element<Message> {
        container(
            column![
                self.controls(),
                self.poster(),
                text(&self.status).size(11).color(ui::FAINT_WHITE),
            ]
            .spacing(16)
            .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(ui::backdrop)
        .into()
    }

    fn controls(&self) -> Element<Message> {
        let generating = self.session.mode == AppMode::Generating;
        let reveal_label = if generating { "REVEALING..." } else { "REVEAL MEMORIES" };
        let export_label = if self.is_exporting { "CAPTURING..." } else { "SAVE POSTER" };

        row![
            text(format!("CHRONICLE {} • VOLUME ANTHOLOGY", Utc::now().year()))
                .size(9)
                .font(Font::MONOSPACE)
                .color(ui::GHOST_WHITE),
            button(text("SHUFFLE TITLE").size(10))
                .on_press(Message::ShuffleTitle)
                .padding(8)
                .style(ui::ghost_button),
            button(text(reveal_label).size(10))
                .on_press_maybe((!generating).then_some(Message::RevealMemories))
                .padding(8)
                .style(ui::accent_button),
            button(text(export_label).size(10))
                .on_press_maybe((!self.is_exporting).then_some(Message::ExportPoster))
                .padding(8)
                .style(ui::light_button),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
    }

    /// The poster sheet: year line, header, gallery, player bar
    fn poster(&self) -> Element<Message> {
        let year_row = row![
            text(Utc::now().year().to_string())
                .size(16)
                .font(Font::MONOSPACE)
                .color(ui::GHOST_WHITE),
            horizontal_space(),
            text("SIDE A").size(8).font(Font::MONOSPACE).color(ui::GHOST_WHITE),
        ];

        let gallery: Element<Message> = if self.session.is_scattered {
            self.scattered_grid()
        } else {
            self.slot_grid()
        };

        container(
            column![
                year_row,
                self.poster_header(),
                gallery,
                text("To go back in time,").size(9).color(ui::FAINT_WHITE),
                self.player_bar(),
            ]
            .spacing(14)
            .align_x(Alignment::Center),
        )
        .width(POSTER_WIDTH)
        .height(POSTER_HEIGHT)
        .padding(24)
        .style(ui::poster_sheet)
        .into()
    }

    fn poster_header(&self) -> Element<Message> {
        column![
            text("When you take two minutes,").size(9).color(ui::FAINT_WHITE),
            text(&self.session.album.title).size(26).color(ui::VINTAGE_CREAM),
            text("CURATED & PRODUCED BY")
                .size(7)
                .font(Font::MONOSPACE)
                .color(ui::FAINT_WHITE),
            text_input("YOUR NAME", &self.session.user_name)
                .on_input(Message::NameEdited)
                .size(11)
                .width(220),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into()
    }

    /// The 4x3 upload grid, slots appearing in reveal order
    fn slot_grid(&self) -> Element<Message> {
        let cells: Vec<Element<Message>> = (0..SLOT_COUNT).map(|i| self.slot_cell(i)).collect();

        container(Wrap::with_elements(cells).spacing(GAP).line_spacing(GAP))
            .width(GRID_WIDTH)
            .height(GRID_HEIGHT)
            .into()
    }

    fn slot_cell(&self, index: usize) -> Element<Message> {
        if !self.session.is_slot_visible(index) {
            // Keeps the cell occupied until the reveal reaches it
            return Space::new(CELL, CELL).into();
        }

        let content: Element<Message> = match self.session.slots.get(index) {
            // Manual placement applies here only; the scattered view swaps
            // it for the session's scatter offsets
            Some(photo) => container(
                image(photo.handle.clone())
                    .width(CELL)
                    .height(CELL)
                    .content_fit(ContentFit::Cover)
                    .rotation(Rotation::Floating(Degrees(photo.rotation).into())),
            )
            .padding(Padding {
                top: photo.y,
                right: 0.0,
                bottom: 0.0,
                left: photo.x,
            })
            .into(),
            None => text(format!("{:02}", index + 1))
                .size(20)
                .font(Font::MONOSPACE)
                .color(ui::GHOST_WHITE)
                .into(),
        };

        mouse_area(
            container(content)
                .center_x(CELL)
                .center_y(CELL)
                .style(ui::photo_frame),
        )
        .on_press(Message::PickPhoto(index))
        .into()
    }

    /// The burst arrangement: every frame displaced, scaled and tilted by
    /// its session-stable scatter offset, nearer frames painted on top
    fn scattered_grid(&self) -> Element<Message> {
        let mut order: Vec<usize> = (0..SLOT_COUNT).collect();
        order.sort_by(|a, b| {
            self.session.scatter[*a]
                .z
                .partial_cmp(&self.session.scatter[*b].z)
                .unwrap_or(Ordering::Equal)
        });

        let mut layers: Vec<Element<Message>> =
            vec![Space::new(GRID_WIDTH, GRID_HEIGHT).into()];

        for index in order {
            let offset = self.session.scatter[index];
            let size = CELL * offset.s;
            let col = (index % 4) as f32;
            let row_i = (index / 4) as f32;

            // Planar displacement is damped so frames stay on the sheet
            let x = (col * (CELL + GAP) + offset.x * 0.35).clamp(0.0, GRID_WIDTH - size);
            let y = (row_i * (CELL + GAP) + offset.y * 0.35).clamp(0.0, GRID_HEIGHT - size);

            let content: Element<Message> = match self.session.slots.get(index) {
                Some(photo) => image(photo.handle.clone())
                    .width(size)
                    .height(size)
                    .content_fit(ContentFit::Cover)
                    .rotation(Rotation::Floating(Degrees(offset.rz).into()))
                    .opacity(0.85)
                    .into(),
                None => container(Space::new(size, size))
                    .style(ui::photo_frame)
                    .into(),
            };

            layers.push(
                container(content)
                    .padding(Padding {
                        top: y,
                        right: 0.0,
                        bottom: 0.0,
                        left: x,
                    })
                    .into(),
            );
        }

        stack(layers)
            .width(GRID_WIDTH)
            .height(GRID_HEIGHT)
            .into()
    }

    fn player_bar(&self) -> Element<Message> {
        let spinning = self.session.mode == AppMode::Generating;

        let details = column![
            row![
                column![
                    text(&self.session.album.title).size(12).color(ui::VINTAGE_CREAM),
                    text(&self.session.album.subtitle)
                        .size(8)
                        .font(Font::MONOSPACE)
                        .color(ui::FAINT_WHITE),
                ]
                .spacing(4),
                horizontal_space(),
                text(self.session.play_time())
                    .size(8)
                    .font(Font::MONOSPACE)
                    .color(ui::VINTAGE_CREAM),
            ]
            .align_y(Alignment::End),
            progress_bar(0.0..=SLOT_COUNT as f32, self.session.revealed_count as f32)
                .height(3)
                .style(ui::reveal_progress),
        ]
        .spacing(8);

        row![
            canvas(ui::vinyl::VinylRecord { spinning })
                .width(72)
                .height(72),
            details,
        ]
        .spacing(16)
        .align_y(Alignment::Center)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Vinyl Poster", PosterApp::update, PosterApp::view)
        .subscription(PosterApp::subscription)
        .theme(PosterApp::theme)
        .window_size((920.0, 800.0))
        .centered()
        .run_with(PosterApp::new)
}
