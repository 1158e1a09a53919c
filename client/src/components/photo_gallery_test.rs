use super::*;
use serde_json::json;

fn photos(ids: &[&str]) -> Vec<CasePhoto> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| serde_json::from_value(json!({"id": id, "image_url": format!("/{id}.jpg"), "order": i})).expect("photo"))
        .collect()
}

#[test]
fn move_photo_swaps_and_renumbers() {
    let mut list = photos(&["a", "b", "c"]);
    assert!(move_photo(&mut list, 2, -1));
    assert_eq!(photo_ids(&list), vec!["a", "c", "b"]);
    assert_eq!(list.iter().map(|p| p.order).collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn move_photo_ignores_moves_past_either_end() {
    let mut list = photos(&["a", "b"]);
    assert!(!move_photo(&mut list, 0, -1));
    assert!(!move_photo(&mut list, 1, 1));
    assert!(!move_photo(&mut list, 5, -1));
    assert_eq!(photo_ids(&list), vec!["a", "b"]);
}
