use std::io::Cursor;

use image::{imageops, DynamicImage, ImageFormat, RgbImage, Rgba, RgbaImage};
use rand::RngCore;

use qrbooth::session::{LINK_PLACEHOLDER_URL, LOGO_PLACEHOLDER_TEXT};
use qrbooth::{reader, render};
use qrbooth::{Action, Event, Menu, Mode, Purpose, Rgb, Session, SessionStore, StyleConfig, UserId};

fn select(token: &str) -> Event {
    Event::MenuSelect(token.to_string())
}

fn upload(bytes: Vec<u8>) -> Event {
    Event::ImageSubmitted { bytes, mime: "image/png".to_string() }
}

/// Applies a sequence of events, returning the final session and the
/// actions of the last event only.
fn drive(events: &[Event]) -> (Session, Vec<Action>) {
    let mut session = Session::new();
    let mut actions = Vec::new();
    for event in events {
        let (next, out) = session.apply(event);
        session = next;
        actions = out;
    }
    (session, actions)
}

fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
    buf
}

fn noise_png(width: u32, height: u32) -> Vec<u8> {
    let mut raw = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw);
    png_bytes(DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, raw).unwrap()))
}

#[test]
fn menu_walk_lands_in_content_state_with_accumulated_style() {
    let (session, _) = drive(&[
        select("generate"),
        select("text"),
        select("color_green"),
        select("toggle_rounded"),
        select("toggle_rounded"),
        select("toggle_rounded"),
        select("style_done"),
    ]);
    assert_eq!(session.mode(), Mode::AwaitingContent(Purpose::TextToQr));
    assert_eq!(session.fill(), Rgb(34, 139, 34));
    // Three toggles from the default false: net effect true.
    assert!(session.rounded());
}

#[test]
fn generate_scenario_produces_a_decodable_blue_rounded_symbol() {
    let (session, actions) = drive(&[
        select("generate"),
        select("text"),
        select("color_blue"),
        select("toggle_rounded"),
        select("style_done"),
        Event::TextSubmitted("hello".to_string()),
    ]);

    assert_eq!(session.mode(), Mode::AwaitingContent(Purpose::TextToQr));
    assert_eq!(session.fill(), Rgb(30, 144, 255));
    assert!(session.rounded());

    assert_eq!(actions.len(), 1);
    let Action::SendImage { png, .. } = &actions[0] else {
        panic!("expected SendImage, got {:?}", actions[0]);
    };
    assert_eq!(reader::decode(png), vec!["hello".to_string()]);
}

#[test]
fn content_state_is_sticky_across_submissions() {
    let (session, _) = drive(&[
        select("generate"),
        select("text"),
        select("color_black"),
        select("style_done"),
    ]);

    let (session, first) = session.apply(&Event::TextSubmitted("one".to_string()));
    assert!(matches!(first[0], Action::SendImage { .. }));
    assert_eq!(session.mode(), Mode::AwaitingContent(Purpose::TextToQr));

    let (session, second) = session.apply(&Event::TextSubmitted("two".to_string()));
    assert!(matches!(second[0], Action::SendImage { .. }));
    assert_eq!(session.mode(), Mode::AwaitingContent(Purpose::TextToQr));
}

#[test]
fn toggle_redraws_the_menu_with_the_current_flag() {
    let (session, actions) =
        drive(&[select("generate"), select("text"), select("color_red"), select("toggle_rounded")]);
    assert!(session.rounded());
    assert_eq!(
        actions[0],
        Action::SendText {
            text: "Rounded modules?".to_string(),
            menu: Some(Menu::RoundedToggle { rounded: true }),
        }
    );

    let (session, actions) = session.apply(&select("toggle_rounded"));
    assert!(!session.rounded());
    assert!(matches!(
        actions[0],
        Action::SendText { menu: Some(Menu::RoundedToggle { rounded: false }), .. }
    ));
}

#[test]
fn oversized_image_payload_is_rejected_in_place() {
    let (session, _) = drive(&[
        select("generate"),
        select("image_payload"),
        select("color_black"),
        select("style_done"),
    ]);

    let (session, actions) = session.apply(&upload(noise_png(256, 256)));
    assert_eq!(session.mode(), Mode::AwaitingContent(Purpose::ImageAsPayload));
    let Action::SendText { text, .. } = &actions[0] else {
        panic!("expected a rejection text, got {:?}", actions[0]);
    };
    assert!(text.contains("exceeds"), "unexpected rejection message: {text}");
}

#[test]
fn decoding_mode_reports_every_symbol_and_stays_put() {
    let style = StyleConfig::default();
    let first = render::render("alpha", &style).unwrap();
    let second = render::render("beta", &style).unwrap();
    let gap = 48;
    let mut canvas = RgbImage::from_pixel(
        first.width() + second.width() + gap,
        first.height(),
        image::Rgb([255, 255, 255]),
    );
    imageops::replace(&mut canvas, &first, 0, 0);
    imageops::replace(&mut canvas, &second, i64::from(first.width() + gap), 0);

    let (session, _) = drive(&[select("decode")]);
    assert_eq!(session.mode(), Mode::Decoding);

    let (session, actions) = session.apply(&upload(png_bytes(DynamicImage::ImageRgb8(canvas))));
    assert_eq!(session.mode(), Mode::Decoding);
    let Action::SendText { text, .. } = &actions[0] else {
        panic!("expected SendText, got {:?}", actions[0]);
    };
    assert!(text.contains("alpha") && text.contains("beta"), "got: {text}");

    // Bytes that aren't an image collapse into the not-found outcome.
    let (session, actions) = session.apply(&upload(b"not an image at all".to_vec()));
    assert_eq!(session.mode(), Mode::Decoding);
    assert!(matches!(
        &actions[0],
        Action::SendText { text, .. } if text.contains("No QR code found")
    ));
}

#[test]
fn logo_purpose_composites_over_a_placeholder_symbol() {
    let (session, _) = drive(&[
        select("generate"),
        select("image_logo"),
        select("color_black"),
        select("style_done"),
    ]);

    let logo = png_bytes(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        300,
        300,
        Rgba([240, 60, 60, 255]),
    )));
    let (session, actions) = session.apply(&upload(logo));
    assert_eq!(session.mode(), Mode::AwaitingContent(Purpose::ImageWithLogo));

    let Action::SendImage { png, .. } = &actions[0] else {
        panic!("expected SendImage, got {:?}", actions[0]);
    };
    assert_eq!(reader::decode(png), vec![LOGO_PLACEHOLDER_TEXT.to_string()]);
}

#[test]
fn link_purpose_ignores_the_upload_and_encodes_the_placeholder() {
    let (session, _) = drive(&[
        select("generate"),
        select("image_link"),
        select("color_purple"),
        select("style_done"),
    ]);

    let any_image = png_bytes(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        10,
        10,
        image::Rgb([1, 2, 3]),
    )));
    let (_, actions) = session.apply(&upload(any_image));
    let Action::SendImage { png, .. } = &actions[0] else {
        panic!("expected SendImage, got {:?}", actions[0]);
    };
    assert_eq!(reader::decode(png), vec![LINK_PLACEHOLDER_URL.to_string()]);
}

#[test]
fn back_and_stop_clear_the_session_from_any_state() {
    let (session, actions) = drive(&[select("generate"), select("text"), select("back")]);
    assert_eq!(session, Session::default());
    assert!(matches!(&actions[0], Action::SendText { menu: Some(Menu::Main), .. }));

    let (session, _) = drive(&[select("decode"), select("stop")]);
    assert_eq!(session, Session::default());

    let (session, _) = drive(&[select("generate"), select("text"), Event::ResetRequested]);
    assert_eq!(session, Session::default());
}

#[test]
fn unrecognized_events_leave_the_state_untouched() {
    let (session, actions) = Session::new().apply(&Event::TextSubmitted("hi".to_string()));
    assert_eq!(session.mode(), Mode::Idle);
    assert!(matches!(&actions[0], Action::SendText { menu: None, .. }));

    // An image where text is expected is just as unrecognized.
    let (session, _) = drive(&[
        select("generate"),
        select("text"),
        select("color_black"),
        select("style_done"),
    ]);
    let (session, actions) = session.apply(&upload(vec![1, 2, 3]));
    assert_eq!(session.mode(), Mode::AwaitingContent(Purpose::TextToQr));
    assert!(matches!(&actions[0], Action::SendText { menu: None, .. }));
}

#[test]
fn store_routes_turns_per_user() {
    let mut store = SessionStore::new();
    let alice = UserId(1);
    let bob = UserId(2);

    store.handle(alice, &select("generate"));
    store.handle(alice, &select("text"));
    store.handle(bob, &select("decode"));

    assert_eq!(store.get(alice).unwrap().mode(), Mode::AwaitingColor(Purpose::TextToQr));
    assert_eq!(store.get(bob).unwrap().mode(), Mode::Decoding);

    store.handle(alice, &Event::ResetRequested);
    assert_eq!(store.get(alice).unwrap().mode(), Mode::Idle);
    assert_eq!(store.get(bob).unwrap().mode(), Mode::Decoding);
}
