use super::*;

#[test]
fn data_uri_payloads_decode_base64_and_percent() {
    let r = classify_uri("data:image/png;base64,Zm9v YmFy").unwrap();
    assert_eq!(
        r,
        ResolvedUri::Data {
            mime: "image/png".to_owned(),
            payload: b"foobar".to_vec()
        }
    );
    assert!(classify_uri("data:image/png;base64,Zm9v!").is_err());
    // `%+1` is not a valid escape and passes through untouched.
    let ResolvedUri::Data { payload, .. } = classify_uri("data:,%+1").unwrap() else {
        panic!("expected data uri");
    };
    assert_eq!(payload, b"%+1");
}

#[test]
fn classifies_data_uris() {
    let r = classify_uri("data:image/png;base64,Zm9v").unwrap();
    assert_eq!(
        r,
        ResolvedUri::Data {
            mime: "image/png".to_owned(),
            payload: b"foo".to_vec()
        }
    );

    let r = classify_uri("DATA:,a%20b").unwrap();
    assert_eq!(
        r,
        ResolvedUri::Data {
            mime: "text/plain".to_owned(),
            payload: b"a b".to_vec()
        }
    );

    assert!(classify_uri("data:image/png;base64").is_err());
}

#[cfg(unix)]
#[test]
fn classifies_files_and_remote() {
    assert_eq!(
        classify_uri("file:///tmp/a%20b.png").unwrap(),
        ResolvedUri::File(PathBuf::from("/tmp/a b.png"))
    );
    assert_eq!(
        classify_uri("assets/bg.jpg").unwrap(),
        ResolvedUri::File(PathBuf::from("assets/bg.jpg"))
    );
    assert_eq!(
        classify_uri("https://example.com/a.png").unwrap(),
        ResolvedUri::Remote("https://example.com/a.png".to_owned())
    );
    assert!(classify_uri("ftp://example.com/a.png").is_err());
    assert!(classify_uri("  ").is_err());
}

#[cfg(unix)]
#[test]
fn file_uris_resolve_to_absolute_paths() {
    assert_eq!(
        classify_uri("file://localhost/tmp/x.png").unwrap(),
        ResolvedUri::File(PathBuf::from("/tmp/x.png"))
    );
    assert_eq!(
        classify_uri("FILE:///tmp/x.png").unwrap(),
        ResolvedUri::File(PathBuf::from("/tmp/x.png"))
    );
    assert_eq!(
        classify_uri("/srv/assets/x.png").unwrap(),
        ResolvedUri::File(PathBuf::from("/srv/assets/x.png"))
    );
    assert!(classify_uri("file://fileserver/share/a.png").is_err());
}

#[test]
fn bytes_serialize_as_decodable_data_uri() {
    let source = ImageSource::from(vec![0u8, 0x89, b'P', b' ']);
    let json = serde_json::to_string(&source).unwrap();
    let back: ImageSource = serde_json::from_str(&json).unwrap();
    let ImageSource::Uri(uri) = back else {
        panic!("expected uri");
    };
    assert_eq!(
        classify_uri(&uri).unwrap(),
        ResolvedUri::Data {
            mime: "application/octet-stream".to_owned(),
            payload: vec![0, 0x89, b'P', b' ']
        }
    );
}

#[test]
fn data_uri_constructor_round_trips_through_classify() {
    let ImageSource::Uri(uri) = ImageSource::data_uri("image/png", &[1, 2, 3, 4]) else {
        panic!("expected uri");
    };
    assert_eq!(
        classify_uri(&uri).unwrap(),
        ResolvedUri::Data {
            mime: "image/png".to_owned(),
            payload: vec![1, 2, 3, 4]
        }
    );
}

#[test]
fn describe_never_leaks_payload() {
    let s = ImageSource::data_uri("image/png", b"secret");
    assert_eq!(s.describe(), "data:image/png (6 bytes)");
    assert_eq!(ImageSource::from(vec![0u8; 3]).describe(), "bytes[3]");
}
