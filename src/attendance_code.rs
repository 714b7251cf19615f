use qrcode::render::{svg, unicode};
use qrcode::QrCode;
use rand::Rng;

use crate::error::{CommunityError, CommunityResult};
use crate::model::{Id, Meeting};

const LINK_PREFIX: &str = "/asistencia/registrar/";

/// A display-only placeholder code: three uppercase letters then three digits.
/// Never sent to the backend; the server issues the real one.
pub fn generate() -> String {
    generate_with(&mut rand::thread_rng())
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code: String = (0..3).map(|_| char::from(rng.gen_range(b'A'..=b'Z'))).collect();
    code.extend((0..3).map(|_| char::from(rng.gen_range(b'0'..=b'9'))));
    code
}

/// The self-service registration link encoded in a meeting's QR code.
pub fn registration_link(public_url: &str, meeting_id: Id<Meeting>) -> String {
    format!("{}{}{}", public_url.trim_end_matches('/'), LINK_PREFIX, meeting_id)
}

/// Extracts the meeting id from a registration link (or a bare id).
pub fn meeting_id_from_link(input: &str) -> Option<Id<Meeting>> {
    let input = input.trim();
    let tail = match input.find(LINK_PREFIX) {
        Some(pos) => &input[pos + LINK_PREFIX.len()..],
        None => input,
    };
    let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
    Id::parse(&digits).ok()
}

/// QR code drawn with half-block characters for a terminal.
pub fn render_terminal(data: &str) -> CommunityResult<String> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| CommunityError::Qr(e.to_string()))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// QR code as a standalone SVG document, for export.
pub fn render_svg(data: &str) -> CommunityResult<String> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| CommunityError::Qr(e.to_string()))?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .build())
}
