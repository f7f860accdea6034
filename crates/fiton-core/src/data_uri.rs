//! RFC 2397 `data:` URIs, as produced by the avatar generator.

use crate::{Error, Result};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use mime::Mime;

const DEFAULT_MEDIA_TYPE: &str = "text/plain;charset=US-ASCII";

/// Standard alphabet, padding optional, as browsers accept it
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    pub mime: Mime,
    pub base64: bool,
    pub data: Vec<u8>,
}

impl DataUri {
    /// Parse `data:[<mediatype>][;base64],<data>`
    ///
    /// Base64 payloads may be unpadded or line-wrapped. Non-base64 payloads
    /// are kept as raw bytes without percent-decoding.
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri
            .get(..5)
            .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
            .map(|_| &uri[5..])
            .ok_or_else(|| Error::InvalidDataUri("missing 'data:' scheme".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::InvalidDataUri("missing ',' before payload".to_string()))?;

        let (media_type, base64) = match header.strip_suffix(";base64") {
            Some(media_type) => (media_type, true),
            None => (header, false),
        };

        let mime = if media_type.is_empty() {
            DEFAULT_MEDIA_TYPE.to_string()
        } else if media_type.starts_with(';') {
            // Parameters without a type keep the default type
            format!("text/plain{}", media_type)
        } else {
            media_type.to_string()
        }
        .parse::<Mime>()
        .map_err(|e| Error::InvalidDataUri(format!("media type '{}': {}", media_type, e)))?;

        let data = if base64 {
            let compact: Vec<u8> = payload
                .bytes()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            LENIENT
                .decode(compact)
                .map_err(|e| Error::InvalidDataUri(format!("base64 payload: {}", e)))?
        } else {
            payload.as_bytes().to_vec()
        };

        Ok(Self { mime, base64, data })
    }

    pub fn is_image(&self) -> bool {
        self.mime.type_() == mime::IMAGE
    }
}
