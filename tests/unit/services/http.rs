use super::*;

#[test]
fn decodes_base64_payload_with_mime() {
    let body: NarrationResponse =
        serde_json::from_str(r#"{"audio":"aGVsbG8=","mimeType":"audio/wav"}"#).unwrap();
    let media = decode_response(body).unwrap();
    assert_eq!(media.mime_type, "audio/wav");
    assert_eq!(media.bytes, b"hello");
}

#[test]
fn accepts_data_url_and_defaults_mime() {
    let body: NarrationResponse =
        serde_json::from_str(r#"{"audio":"data:audio/ogg;base64,aGk="}"#).unwrap();
    assert_eq!(decode_response(body).unwrap().mime_type, "audio/ogg");

    let body: NarrationResponse = serde_json::from_str(r#"{"audio":"aGk="}"#).unwrap();
    assert_eq!(decode_response(body).unwrap().mime_type, "audio/mpeg");

    let body: NarrationResponse = serde_json::from_str(r#"{"audio":"%%%"}"#).unwrap();
    assert!(matches!(
        decode_response(body),
        Err(SlideReelError::Synthesis(_))
    ));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_synthesis_error() {
    let client = HttpNarrationClient::new("http://127.0.0.1:9/tts", None);
    let err = client.synthesize_narration("hi", "alloy").await.unwrap_err();
    assert!(matches!(err, SlideReelError::Synthesis(_)));
}

mod against_mock_server {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    use super::*;

    fn client_for(server: &MockServer, api_key: Option<&str>) -> HttpNarrationClient {
        HttpNarrationClient::new(format!("{}/speak", server.uri()), api_key.map(str::to_string))
    }

    #[tokio::test]
    async fn raw_audio_body_keeps_its_mime_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/speak"))
            .and(header("authorization", "Bearer secret"))
            .and(body_json(json!({"text": "Hello there", "voice": "nova"})))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8, 2, 3, 4], "audio/wav"))
            .expect(1)
            .mount(&server)
            .await;

        let media = client_for(&server, Some("secret"))
            .synthesize_narration("Hello there", "nova")
            .await
            .unwrap();
        assert_eq!(media.mime_type, "audio/wav");
        assert_eq!(media.bytes, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn json_body_is_decoded_from_base64() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/speak"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"audio": "aGVsbG8=", "mimeType": "audio/ogg"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let media = client_for(&server, None)
            .synthesize_narration("hi", "alloy")
            .await
            .unwrap();
        assert_eq!(media.mime_type, "audio/ogg");
        assert_eq!(media.bytes, b"hello");
    }

    #[tokio::test]
    async fn error_status_maps_to_synthesis_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/speak"))
            .respond_with(ResponseTemplate::new(503).set_body_string("voice model overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server, Some("secret"))
            .synthesize_narration("hi", "alloy")
            .await
            .unwrap_err();
        assert!(matches!(err, SlideReelError::Synthesis(_)));
        let msg = err.to_string();
        assert!(msg.contains("503"), "{msg}");
        assert!(msg.contains("voice model overloaded"), "{msg}");
    }

    #[tokio::test]
    async fn missing_bearer_token_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![9u8], "audio/mpeg"))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .synthesize_narration("hi", "alloy")
            .await
            .unwrap_err();
        assert!(matches!(err, SlideReelError::Synthesis(_)));
    }
}
