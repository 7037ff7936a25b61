//! Per-user session state machine.
//!
//! The machine is a pure function: [`Session::apply`] consumes the current
//! session and one event, and returns the successor session plus the
//! outbound actions for the front end. No globals, no I/O — the pipeline
//! calls it makes (render, pack, composite, decode) are themselves pure
//! functions of their inputs, so concurrent sessions for different users
//! need no synchronization.
//!
//! Content-producing states are deliberately sticky: after a successful
//! generation or decode the mode does not fall back to [`Mode::Idle`], so a
//! user can batch through several payloads without repeating the style
//! dance. Only "back", "stop" or an explicit reset leaves a mode.

mod event;
mod store;

pub use event::{Action, Event, Menu, COLOR_CHOICES};
pub use store::{SessionStore, UserId};

use event::color_for_token;
use tracing::{debug, warn};

use crate::compose;
use crate::error::Result;
use crate::packer;
use crate::reader;
use crate::render;
use crate::style::{EcLevel, ModuleShape, Rgb, StyleConfig};

/// Payload encoded when the user styles a QR around an uploaded logo; the
/// logo itself is composited over the symbol, not encoded into it.
pub const LOGO_PLACEHOLDER_TEXT: &str = "Styled QR";

/// Payload encoded for the link purpose. A real deployment would first
/// upload the image somewhere and encode the resulting URL; the core
/// encodes this fixed stand-in.
pub const LINK_PLACEHOLDER_URL: &str = "https://example.com/image";

// Purpose
//------------------------------------------------------------------------------

/// What the user asked to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Encode a text message verbatim.
    TextToQr,
    /// Pack an uploaded image into the symbol as base64 data.
    ImageAsPayload,
    /// Encode a placeholder and composite the uploaded image on top.
    ImageWithLogo,
    /// Encode a fixed URL standing in for an upload link.
    LinkPlaceholder,
}

impl Purpose {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "text" => Some(Purpose::TextToQr),
            "image_payload" => Some(Purpose::ImageAsPayload),
            "image_logo" => Some(Purpose::ImageWithLogo),
            "image_link" => Some(Purpose::LinkPlaceholder),
            _ => None,
        }
    }

    /// Symbols that will be partially occluded or must survive noisy
    /// round-trips carry the highest correction level.
    pub fn ec_level(self) -> EcLevel {
        match self {
            Purpose::ImageAsPayload | Purpose::ImageWithLogo => EcLevel::H,
            Purpose::TextToQr | Purpose::LinkPlaceholder => EcLevel::Q,
        }
    }

    fn prompt(self) -> &'static str {
        match self {
            Purpose::TextToQr => "Send the text to turn into a QR code.",
            Purpose::ImageAsPayload => "Send an image to embed into the QR code as data.",
            Purpose::ImageWithLogo => "Send a logo image to place over the QR code.",
            Purpose::LinkPlaceholder => "Send an image; you'll get a QR code linking to it.",
        }
    }
}

// Mode
//------------------------------------------------------------------------------

/// Where in the conversation this session currently is. The pending
/// generation purpose travels inside the variants, so a session that is
/// picking a color always knows what it is picking it for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    AwaitingColor(Purpose),
    AwaitingRoundedChoice(Purpose),
    AwaitingContent(Purpose),
    Decoding,
}

// Session
//------------------------------------------------------------------------------

/// One user's conversation state: mode plus the style accumulated so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    mode: Mode,
    fill: Rgb,
    rounded: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { mode: Mode::Idle, fill: Rgb::BLACK, rounded: false }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fill(&self) -> Rgb {
        self.fill
    }

    /// Current rounded-modules flag. The front end reads this to redraw
    /// the toggle control in place after a flip.
    pub fn rounded(&self) -> bool {
        self.rounded
    }

    fn style_for(&self, purpose: Purpose) -> StyleConfig {
        StyleConfig {
            ec_level: purpose.ec_level(),
            shape: if self.rounded { ModuleShape::Rounded } else { ModuleShape::Square },
            fill: self.fill,
            ..StyleConfig::default()
        }
    }

    /// Applies one event and returns the successor session and outbound
    /// actions. Pipeline failures never escape: they become a single
    /// `SendText` and leave the mode unchanged for a retry.
    pub fn apply(self, event: &Event) -> (Session, Vec<Action>) {
        debug!(event = event.kind(), mode = ?self.mode, "handling session event");

        // Resets win from any state.
        match event {
            Event::ResetRequested => return reset("Stopped."),
            Event::MenuSelect(token) if token == "stop" => return reset("Stopped."),
            Event::MenuSelect(token) if token == "back" => return reset("Main menu:"),
            _ => {}
        }

        match (self.mode, event) {
            (Mode::Idle, Event::MenuSelect(token)) if token == "generate" => {
                (self, text("Choose what to generate:", Menu::Purposes))
            }

            (Mode::Idle, Event::MenuSelect(token)) if token == "decode" => {
                let next = Session { mode: Mode::Decoding, ..Session::default() };
                (next, text("Send an image containing a QR code.", Menu::InMode))
            }

            (Mode::Idle, Event::MenuSelect(token)) if Purpose::from_token(token).is_some() => {
                // Style always starts from defaults for a new purpose.
                let purpose = Purpose::from_token(token).unwrap_or(Purpose::TextToQr);
                let next = Session { mode: Mode::AwaitingColor(purpose), ..Session::default() };
                (next, text("Pick a fill color for your QR code:", Menu::Colors))
            }

            (Mode::AwaitingColor(purpose), Event::MenuSelect(token)) => {
                match color_for_token(token) {
                    Some(fill) => {
                        let next =
                            Session { mode: Mode::AwaitingRoundedChoice(purpose), fill, ..self };
                        let menu = Menu::RoundedToggle { rounded: next.rounded };
                        (next, text("Rounded modules?", menu))
                    }
                    None => unrecognized(self),
                }
            }

            (Mode::AwaitingRoundedChoice(_), Event::MenuSelect(token))
                if token == "toggle_rounded" =>
            {
                let next = Session { rounded: !self.rounded, ..self };
                let menu = Menu::RoundedToggle { rounded: next.rounded };
                (next, text("Rounded modules?", menu))
            }

            (Mode::AwaitingRoundedChoice(purpose), Event::MenuSelect(token))
                if token == "style_done" =>
            {
                let next = Session { mode: Mode::AwaitingContent(purpose), ..self };
                (next, text(purpose.prompt(), Menu::InMode))
            }

            (Mode::AwaitingContent(Purpose::TextToQr), Event::TextSubmitted(payload)) => {
                let style = self.style_for(Purpose::TextToQr);
                (self, deliver(render::render_png(payload, &style), None))
            }

            (Mode::AwaitingContent(Purpose::ImageAsPayload), Event::ImageSubmitted { bytes, .. }) => {
                let style = self.style_for(Purpose::ImageAsPayload);
                let result = packer::pack_image(bytes)
                    .and_then(|packed| render::render_png(&packed, &style));
                let caption = Some("This QR code carries your image as data.".to_string());
                (self, deliver(result, caption))
            }

            (Mode::AwaitingContent(Purpose::ImageWithLogo), Event::ImageSubmitted { bytes, .. }) => {
                let style = self.style_for(Purpose::ImageWithLogo);
                let result = render::render(LOGO_PLACEHOLDER_TEXT, &style)
                    .and_then(|qr| compose::overlay_logo_png(&qr, bytes));
                (self, deliver(result, None))
            }

            // The upload only triggers the turn; its content is ignored.
            (Mode::AwaitingContent(Purpose::LinkPlaceholder), Event::ImageSubmitted { .. }) => {
                let style = self.style_for(Purpose::LinkPlaceholder);
                (self, deliver(render::render_png(LINK_PLACEHOLDER_URL, &style), None))
            }

            (Mode::Decoding, Event::ImageSubmitted { bytes, .. }) => {
                let results = reader::decode(bytes);
                let message = if results.is_empty() {
                    "No QR code found in that image.".to_string()
                } else {
                    results.join("\n")
                };
                (self, vec![Action::SendText { text: message, menu: None }])
            }

            _ => unrecognized(self),
        }
    }
}

// Outbound helpers
//------------------------------------------------------------------------------

fn text(message: impl Into<String>, menu: Menu) -> Vec<Action> {
    vec![Action::SendText { text: message.into(), menu: Some(menu) }]
}

fn reset(message: &str) -> (Session, Vec<Action>) {
    (Session::default(), text(message, Menu::Main))
}

fn unrecognized(session: Session) -> (Session, Vec<Action>) {
    let actions = vec![Action::SendText {
        text: "Sorry, I didn't understand that. Pick an option from the menu.".to_string(),
        menu: None,
    }];
    (session, actions)
}

fn deliver(result: Result<Vec<u8>>, caption: Option<String>) -> Vec<Action> {
    match result {
        Ok(png) => vec![Action::SendImage { png, caption }],
        Err(err) => {
            warn!(%err, "pipeline call rejected");
            vec![Action::SendText { text: err.to_string(), menu: None }]
        }
    }
}
