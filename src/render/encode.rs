// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transport encoding for the external PlantUML renderer.
//!
//! Raw DEFLATE at the best compression level, then a base64 variant over the alphabet
//! `0-9A-Za-z-_`. The final partial group is zero-padded, so the output length is always
//! a multiple of four.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use base64::alphabet::Alphabet;
use base64::engine::general_purpose::{GeneralPurpose, NO_PAD};
use base64::Engine;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RENDERER_BASE_URL: &str = "https://www.plantuml.com/plantuml";

const PLANTUML_ALPHABET: Alphabet =
    match Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("invalid PlantUML alphabet"),
    };

/// Unpadded base64 over the renderer alphabet; decodes [`encode_diagram`] output.
pub const PLANTUML_ENGINE: GeneralPurpose = GeneralPurpose::new(&PLANTUML_ALPHABET, NO_PAD);

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to compress diagram text: {0}")]
    Compress(#[from] std::io::Error),
    #[error("unknown output format `{0}` (expected svg, png or txt)")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
    Txt,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = EncodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "txt" => Ok(Self::Txt),
            _ => Err(EncodeError::UnknownFormat(value.to_owned())),
        }
    }
}

/// Compresses and encodes `text`. Empty text encodes to an empty string.
pub fn encode_diagram(text: &str) -> Result<String, EncodeError> {
    if text.is_empty() {
        return Ok(String::new());
    }
    let compressed = deflate(text.as_bytes())?;
    Ok(encode_six_bit(&compressed))
}

/// Encodes `text` and builds its viewer URL.
pub fn diagram_url(base_url: &str, format: OutputFormat, text: &str) -> Result<String, EncodeError> {
    let encoded = encode_diagram(text)?;
    Ok(viewer_url(base_url, format, &encoded))
}

/// `<base>/<format>/<encoded>` for an already encoded diagram.
pub fn viewer_url(base_url: &str, format: OutputFormat, encoded: &str) -> String {
    format!("{}/{format}/{encoded}", base_url.trim_end_matches('/'))
}

fn deflate(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    encoder.finish()
}

fn encode_six_bit(bytes: &[u8]) -> String {
    let mut encoded = PLANTUML_ENGINE.encode(bytes);
    while encoded.len() % 4 != 0 {
        encoded.push('0');
    }
    encoded
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use base64::Engine;
    use flate2::read::DeflateDecoder;
    use rstest::rstest;

    use super::{
        diagram_url, encode_diagram, encode_six_bit, viewer_url, EncodeError, OutputFormat,
        DEFAULT_RENDERER_BASE_URL, PLANTUML_ENGINE,
    };

    fn decode_diagram(encoded: &str) -> String {
        let compressed = PLANTUML_ENGINE.decode(encoded).unwrap();
        let mut text = String::new();
        DeflateDecoder::new(compressed.as_slice())
            .read_to_string(&mut text)
            .unwrap();
        text
    }

    #[rstest]
    #[case(b"Man", "JM5k")]
    #[case(&[0x00, 0x00, 0x00], "0000")]
    #[case(&[0xFF, 0xFF, 0xFF], "____")]
    #[case(&[0xFF], "_m00")]
    #[case(&[0xFF, 0xFF], "__y0")]
    #[case(b"", "")]
    fn six_bit_stage_matches_the_renderer_alphabet(#[case] bytes: &[u8], #[case] expected: &str) {
        assert_eq!(encode_six_bit(bytes), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(100)]
    fn output_is_padded_to_a_multiple_of_four(#[case] len: usize) {
        let bytes: Vec<u8> = (0..len).map(|index| (index * 37) as u8).collect();
        let encoded = encode_six_bit(&bytes);
        assert_eq!(encoded.len() % 4, 0);
        assert_eq!(encoded.len(), len.div_ceil(3) * 4);
        assert!(encoded
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    }

    #[test]
    fn empty_text_encodes_to_empty_string() {
        assert_eq!(encode_diagram("").unwrap(), "");
    }

    #[test]
    fn encoded_diagram_inflates_back_to_the_source_text() {
        let text = "@startuml\nclass Scheduler <<Algorithm>> {\n}\n@enduml";
        let encoded = encode_diagram(text).unwrap();
        assert_eq!(encoded.len() % 4, 0);
        assert_eq!(decode_diagram(&encoded), text);
    }

    #[test]
    fn url_joins_base_format_and_payload() {
        let url = diagram_url("https://example.test/plantuml/", OutputFormat::Png, "@startuml\n@enduml")
            .unwrap();
        let payload = url
            .strip_prefix("https://example.test/plantuml/png/")
            .unwrap();
        assert_eq!(decode_diagram(payload), "@startuml\n@enduml");
        assert!(diagram_url(DEFAULT_RENDERER_BASE_URL, OutputFormat::Svg, "")
            .unwrap()
            .ends_with("/svg/"));
    }

    #[rstest]
    #[case("https://example.test/plantuml")]
    #[case("https://example.test/plantuml///")]
    fn viewer_url_reuses_the_encoded_payload(#[case] base: &str) {
        let text = "@startuml\nclass A\n@enduml";
        let encoded = encode_diagram(text).unwrap();
        let url = viewer_url(base, OutputFormat::Txt, &encoded);
        assert_eq!(url, format!("https://example.test/plantuml/txt/{encoded}"));
        assert_eq!(url, diagram_url(base, OutputFormat::Txt, text).unwrap());
    }

    #[rstest]
    #[case("svg", Ok(OutputFormat::Svg))]
    #[case(" PNG ", Ok(OutputFormat::Png))]
    #[case("txt", Ok(OutputFormat::Txt))]
    #[case("pdf", Err(()))]
    fn output_format_parses_known_names(#[case] value: &str, #[case] expected: Result<OutputFormat, ()>) {
        let parsed = value.parse::<OutputFormat>();
        match expected {
            Ok(format) => assert_eq!(parsed.unwrap(), format),
            Err(()) => assert!(matches!(parsed, Err(EncodeError::UnknownFormat(_)))),
        }
    }
}
