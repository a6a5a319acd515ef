use super::*;

#[test]
fn banners_visible_until_ttl() {
    let mut board = NoticeBoard::default();
    let start = Instant::now();
    board.post_success_at("Word added successfully!", start);

    let visible = board.visible_at(start + Duration::from_millis(2999));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].kind, NoticeKind::Success);

    assert!(board.visible_at(start + NOTICE_TTL).is_empty());
}

#[test]
fn newer_banner_replaces_older_of_same_kind() {
    let mut board = NoticeBoard::default();
    let start = Instant::now();
    board.post_error_at("Error adding word", start);
    board.post_error_at("Error deleting word", start + Duration::from_secs(1));

    let visible = board.visible_at(start + Duration::from_secs(2));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].text, "Error deleting word");

    // Replacement restarts the clock.
    assert_eq!(board.visible_at(start + Duration::from_millis(3500)).len(), 1);
}

#[test]
fn error_listed_before_success() {
    let mut board = NoticeBoard::default();
    let now = Instant::now();
    board.post_success_at("ok", now);
    board.post_error_at("bad", now);

    let kinds: Vec<_> = board.visible_at(now).into_iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NoticeKind::Error, NoticeKind::Success]);
}

#[test]
fn clear_error_keeps_success() {
    let mut board = NoticeBoard::default();
    let now = Instant::now();
    board.post_success_at("ok", now);
    board.post_error_at("bad", now);
    board.clear_error();

    let visible = board.visible_at(now);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].kind, NoticeKind::Success);
}

#[test]
fn drain_empties_board() {
    let mut board = NoticeBoard::default();
    board.post_success("ok");
    assert_eq!(board.drain().len(), 1);
    assert!(board.drain().is_empty());
}
