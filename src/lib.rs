//! # qrbooth
//!
//! A conversational QR code booth. A generic chat front end (Telegram,
//! Matrix, a test harness...) delivers discrete events — menu selections,
//! text messages, image uploads — and qrbooth answers with outbound actions:
//! send a text (optionally with a logical menu attached) or send a rendered
//! image. Everything in between is owned by this crate:
//!
//! - **Per-user sessions**: a small state machine tracking what the user is
//!   currently doing (picking a color, submitting content, decoding) and the
//!   style they have accumulated so far.
//! - **QR rendering**: square or rounded modules, solid fill color over a
//!   white background, quiet-zone border included.
//! - **Image-in-QR packing**: downscale, recompress and base64 an uploaded
//!   image so it fits inside a symbol, rejecting anything over capacity.
//! - **Logo compositing**: paste an uploaded logo centered over a rendered
//!   QR (the symbol is encoded at high error correction so it survives).
//! - **Decoding**: find zero or more QR payloads in an uploaded image,
//!   never raising past the boundary.
//!
//! ## Driving a session
//!
//! ```rust
//! use qrbooth::{Action, Event, SessionStore, UserId};
//!
//! let mut store = SessionStore::new();
//! let user = UserId(42);
//!
//! // The user opens the generation menu and picks the text purpose.
//! store.handle(user, &Event::MenuSelect("generate".into()));
//! store.handle(user, &Event::MenuSelect("text".into()));
//! store.handle(user, &Event::MenuSelect("color_blue".into()));
//! store.handle(user, &Event::MenuSelect("style_done".into()));
//!
//! // Every text they now send comes back as a QR image.
//! let actions = store.handle(user, &Event::TextSubmitted("hello".into()));
//! assert!(matches!(actions[0], Action::SendImage { .. }));
//! ```
//!
//! ## Rendering directly
//!
//! The pipeline pieces are plain functions and can be used without a
//! session:
//!
//! ```rust
//! use qrbooth::{render, StyleConfig};
//!
//! # fn main() -> Result<(), qrbooth::Error> {
//! let png = render::render_png("https://example.com", &StyleConfig::default())?;
//! assert_eq!(&png[..4], b"\x89PNG");
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod error;
pub mod packer;
pub mod reader;
pub mod render;
pub mod session;
pub mod style;

pub use error::{Error, Result};
pub use session::{
    Action, Event, Menu, Mode, Purpose, Session, SessionStore, UserId,
};
pub use style::{EcLevel, ModuleShape, Rgb, StyleConfig};
