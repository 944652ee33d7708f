use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

/// A success envelope with text and decodable WAV audio
pub fn assert_full_success(body: &Value, expected_text: &str) {
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("success"));
    assert_eq!(
        body.get("text_out").and_then(|v| v.as_str()),
        Some(expected_text)
    );
    assert!(body.get("error").is_none(), "Unexpected error field");
    assert_eq!(
        body.get("original_text").and_then(|v| v.as_str()),
        Some("hello")
    );

    let audio = body
        .get("audio_out")
        .and_then(|v| v.as_str())
        .expect("Missing audio_out");
    let wav = BASE64.decode(audio).expect("audio_out is not base64");
    assert_eq!(&wav[..4], b"RIFF", "audio_out is not a WAV file");
}

/// A success envelope with text but no audio field at all
pub fn assert_text_only(body: &Value, expected_text: &str) {
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("success"));
    assert_eq!(
        body.get("text_out").and_then(|v| v.as_str()),
        Some(expected_text)
    );
    assert!(body.get("audio_out").is_none(), "audio_out should be absent");
    assert!(body.get("error").is_none(), "Unexpected error field");
}
