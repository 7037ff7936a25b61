//! The boundary vocabulary shared with the conversational front end:
//! inbound [`Event`]s, outbound [`Action`]s and the logical [`Menu`]s the
//! front end knows how to draw.

use crate::style::Rgb;

// Event
//------------------------------------------------------------------------------

/// One inbound conversational turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A menu button press, identified by its callback token.
    MenuSelect(String),
    /// A plain text message.
    TextSubmitted(String),
    /// An uploaded image. The mime type is whatever the front end declared;
    /// the pipeline trusts the bytes, not the label.
    ImageSubmitted { bytes: Vec<u8>, mime: String },
    /// An explicit reset (e.g. a /stop command).
    ResetRequested,
}

impl Event {
    /// Short name for log lines; never exposes payload contents.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Event::MenuSelect(_) => "menu_select",
            Event::TextSubmitted(_) => "text",
            Event::ImageSubmitted { .. } => "image",
            Event::ResetRequested => "reset",
        }
    }
}

// Menu
//------------------------------------------------------------------------------

/// Which logical menu the front end should attach to a text reply. The
/// front end owns buttons, labels and layout; the core only names the menu
/// appropriate for the state it just moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    /// Generate / decode.
    Main,
    /// The four generation purposes.
    Purposes,
    /// The fill color catalog.
    Colors,
    /// The rounded-modules toggle plus a continue button. Carries the
    /// current flag so the front end can redraw the toggle in place.
    RoundedToggle { rounded: bool },
    /// Back-to-menu / stop, shown while a sticky content state is active.
    InMode,
}

// Action
//------------------------------------------------------------------------------

/// One outbound effect for the front end to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SendText { text: String, menu: Option<Menu> },
    SendImage { png: Vec<u8>, caption: Option<String> },
}

// Color catalog
//------------------------------------------------------------------------------

/// Fill colors offered on the color menu, keyed by callback token.
pub const COLOR_CHOICES: [(&str, Rgb); 6] = [
    ("color_red", Rgb(220, 20, 60)),
    ("color_blue", Rgb(30, 144, 255)),
    ("color_green", Rgb(34, 139, 34)),
    ("color_purple", Rgb(138, 43, 226)),
    ("color_black", Rgb(0, 0, 0)),
    ("color_orange", Rgb(255, 140, 0)),
];

pub(crate) fn color_for_token(token: &str) -> Option<Rgb> {
    COLOR_CHOICES.iter().find(|(t, _)| *t == token).map(|&(_, c)| c)
}
