//! Poster look and feel: the retro-red palette and widget styles shared by
//! the landing splash and the studio view.

use iced::widget::{button, container, progress_bar};
use iced::{Background, Border, Color, Shadow, Theme};

pub mod vinyl;

/// Near-black red behind everything
pub const BACKDROP: Color = Color {
    r: 13.0 / 255.0,
    g: 4.0 / 255.0,
    b: 4.0 / 255.0,
    a: 1.0,
};

/// The poster sheet itself
pub const POSTER_RED: Color = Color {
    r: 26.0 / 255.0,
    g: 6.0 / 255.0,
    b: 6.0 / 255.0,
    a: 1.0,
};

/// Aged-paper cream for titles
pub const VINTAGE_CREAM: Color = Color {
    r: 232.0 / 255.0,
    g: 213.0 / 255.0,
    b: 181.0 / 255.0,
    a: 1.0,
};

/// Firebrick accent for the reveal control and the progress bar
pub const ACCENT_RED: Color = Color {
    r: 178.0 / 255.0,
    g: 34.0 / 255.0,
    b: 34.0 / 255.0,
    a: 1.0,
};

pub const FAINT_WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.35,
};

pub const GHOST_WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 0.12,
};

pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BACKDROP)),
        ..container::Style::default()
    }
}

pub fn poster_sheet(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(POSTER_RED)),
        border: Border {
            color: GHOST_WHITE,
            width: 1.0,
            radius: 2.0.into(),
        },
        ..container::Style::default()
    }
}

/// Frame around a photo slot, filled or empty
pub fn photo_frame(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.3,
            ..Color::BLACK
        })),
        border: Border {
            color: GHOST_WHITE,
            width: 1.0,
            radius: 1.0.into(),
        },
        ..container::Style::default()
    }
}

pub fn accent_button(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = if matches!(status, button::Status::Disabled) {
        0.5
    } else {
        1.0
    };
    button::Style {
        background: Some(Background::Color(Color {
            a: alpha,
            ..ACCENT_RED
        })),
        text_color: Color::WHITE,
        border: Border {
            radius: 2.0.into(),
            ..Border::default()
        },
        shadow: Shadow::default(),
    }
}

pub fn ghost_button(_theme: &Theme, status: button::Status) -> button::Style {
    let text = if matches!(status, button::Status::Hovered) {
        Color::WHITE
    } else {
        FAINT_WHITE
    };
    button::Style {
        background: None,
        text_color: text,
        border: Border {
            color: GHOST_WHITE,
            width: 1.0,
            radius: 2.0.into(),
        },
        shadow: Shadow::default(),
    }
}

pub fn light_button(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = if matches!(status, button::Status::Disabled) {
        0.5
    } else {
        1.0
    };
    button::Style {
        background: Some(Background::Color(Color {
            a: alpha,
            ..Color::WHITE
        })),
        text_color: Color::BLACK,
        border: Border {
            radius: 2.0.into(),
            ..Border::default()
        },
        shadow: Shadow::default(),
    }
}

pub fn reveal_progress(_theme: &Theme) -> progress_bar::Style {
    progress_bar::Style {
        background: Background::Color(GHOST_WHITE),
        bar: Background::Color(ACCENT_RED),
        border: Border::default(),
    }
}
