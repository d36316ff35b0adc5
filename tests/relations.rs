mod common;

use common::{child_of, item, reader, version_key};
use trellis::reader::ItemOutcome;
use trellis::settings::ReaderConfig;

#[test]
fn parent_read_first_attaches_immediately() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader.read([item(1), child_of(2, 1)]).expect("read ok");
    let parent = journal.find(1).expect("parent");
    let child = journal.find(2).expect("child");
    assert_eq!(journal.parent(child).map(|p| p.id), Some(1));
    assert_eq!(journal.children(parent).map(|c| c.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(journal.pending_count(), 0);
}

#[test]
fn child_read_before_parent_is_attached_later() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader.read([child_of(2, 5), item(5)]).expect("read ok");
    let parent = journal.find(5).expect("parent");
    let child = journal.find(2).expect("child");
    assert_eq!(journal.parent(child).map(|p| p.id), Some(5));
    assert_eq!(journal.children(parent).count(), 1);
    assert_eq!(journal.roots().map(|n| n.id).collect::<Vec<_>>(), vec![5]);
}

#[test]
fn waiting_children_attach_in_registration_order() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader
        .read([child_of(3, 1), child_of(2, 1), child_of(4, 1), item(1)])
        .expect("read ok");
    let parent = journal.find(1).expect("parent");
    let order: Vec<_> = journal.children(parent).map(|c| c.id).collect();
    assert_eq!(order, vec![3, 2, 4]);
}

#[test]
fn deep_tree_in_reverse_order() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader
        .read([child_of(4, 3), child_of(3, 2), child_of(2, 1), item(1)])
        .expect("read ok");
    let mut trail = Vec::new();
    let mut current = journal.find(4);
    while let Some(node) = current {
        trail.push(node.id);
        current = journal.parent(node);
    }
    assert_eq!(trail, vec![4, 3, 2, 1]);
}

#[test]
fn unresolved_parent_is_not_an_error() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader.read([child_of(1, 99)]).expect("read ok");
    let child = journal.find(1).expect("child");
    assert!(journal.parent(child).is_none());
    assert_eq!(child.parent_ref.id, Some(99));
    assert!(journal.errors().is_empty());
    assert_eq!(journal.pending_count(), 0, "pending relations dropped at the end");
}

#[test]
fn pending_relations_are_visible_mid_read() {
    let reader = reader(ReaderConfig::strict());
    let mut session = reader.session([child_of(2, 1), item(1)]);
    assert!(matches!(session.next(), Some(Ok(ItemOutcome::Read(_)))));
    assert_eq!(session.journal().pending_count(), 1);
    assert!(matches!(session.next(), Some(Ok(ItemOutcome::Read(_)))));
    assert_eq!(session.journal().pending_count(), 0);
    assert!(session.next().is_none());
    let journal = session.finish();
    assert_eq!(journal.len(), 2);
}

#[test]
fn zero_or_non_numeric_parent_means_no_parent() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader
        .read([
            item(1).attr("parent", "0"),
            item(2).attr("parent", "abc"),
            item(3).attr("parent", ""),
        ])
        .expect("read ok");
    assert_eq!(journal.roots().count(), 3);
    assert_eq!(journal.pending_count(), 0);
    assert!(journal.nodes().iter().all(|n| n.parent_ref.is_empty()));
}

#[test]
fn version_key_parent_resolves_forward() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader
        .read([
            item(2).attr("parentVersionKey", "abc"),
            item(7).child(version_key("abc")),
        ])
        .expect("read ok");
    let parent = journal.find_by_version_key("abc").expect("indexed by key");
    assert_eq!(parent.id, 7);
    let child = journal.find(2).expect("child");
    assert_eq!(journal.parent(child).map(|p| p.id), Some(7));
}

#[test]
fn version_key_parent_resolves_immediately() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader
        .read([
            item(7).child(version_key("abc")),
            item(2).attr("parentVersionKey", "abc"),
        ])
        .expect("read ok");
    let child = journal.find(2).expect("child");
    assert_eq!(journal.parent(child).map(|p| p.id), Some(7));
}

#[test]
fn version_key_wins_over_id_when_both_resolve() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader
        .read([
            item(1),
            item(7).child(version_key("abc")),
            child_of(2, 1).attr("parentVersionKey", "abc"),
        ])
        .expect("read ok");
    let child = journal.find(2).expect("child");
    assert_eq!(journal.parent(child).map(|p| p.id), Some(7));
    assert_eq!(journal.children(journal.find(1).unwrap()).count(), 0);
    assert_eq!(journal.children(journal.find(7).unwrap()).count(), 1);
}

#[test]
fn later_resolving_relation_overrides_earlier_one() {
    // the key resolves immediately, the id only when item 1 shows up
    let reader = reader(ReaderConfig::strict());
    let journal = reader
        .read([
            item(7).child(version_key("abc")),
            child_of(2, 1).attr("parentVersionKey", "abc"),
            item(1),
        ])
        .expect("read ok");
    let child = journal.find(2).expect("child");
    assert_eq!(journal.parent(child).map(|p| p.id), Some(1));
    assert_eq!(journal.children(journal.find(7).unwrap()).count(), 0);
}

#[test]
fn item_declared_as_its_own_parent_stays_unattached() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader.read([child_of(3, 3)]).expect("read ok");
    let node = journal.find(3).expect("node");
    assert!(journal.parent(node).is_none());
    assert!(node.children().is_empty());
}

#[test]
fn first_item_is_the_root() {
    let reader = reader(ReaderConfig::strict());
    let journal = reader.read([item(10), child_of(11, 10)]).expect("read ok");
    assert_eq!(journal.root().map(|n| n.id), Some(10));
}
