use super::*;

#[test]
fn login_reply_keeps_status_and_body() {
    let reply = login_reply::<String>(200, Ok(r#"{"token":"t"}"#.to_owned())).unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, r#"{"token":"t"}"#);
}

#[test]
fn login_reply_surfaces_body_read_failure() {
    let err = login_reply(200, Err("connection reset while reading body")).unwrap_err();
    assert_eq!(err, "connection reset while reading body");
}
