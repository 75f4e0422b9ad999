//! Teardown leaves nothing behind.
//!
//! This file holds a single test on purpose: the counting allocator is
//! process-wide, and a second test running on another thread would skew it.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicIsize, Ordering};
use toml_tree::{free, init, saw_table, saw_table_array, Datetime, Node};

struct Counting;

static LIVE_BYTES: AtomicIsize = AtomicIsize::new(0);

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            LIVE_BYTES.fetch_add(layout.size() as isize, Ordering::SeqCst);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        LIVE_BYTES.fetch_sub(layout.size() as isize, Ordering::SeqCst);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            LIVE_BYTES.fetch_add(new_size as isize - layout.size() as isize, Ordering::SeqCst);
        }
        new_ptr
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

/// A document holding at least one node of every kind.
fn every_kind() -> Node {
    let mut root = init();
    root.insert("title", Node::from("inventory")).unwrap();
    root.insert("count", Node::from(3)).unwrap();
    root.insert("ratio", Node::float(0.75, 2)).unwrap();
    root.insert("open", Node::from(false)).unwrap();
    root.insert(
        "updated",
        Node::from(Datetime::parse_from_rfc3339("2024-01-02T03:04:05.678+01:00").unwrap()),
    )
    .unwrap();
    root.insert(
        "matrix",
        Node::list(vec![
            Node::list(vec![Node::from(1), Node::from(2)]).unwrap(),
            Node::list(vec![Node::from(3)]).unwrap(),
        ])
        .unwrap(),
    )
    .unwrap();
    let mut point = root.insert("point", Node::inline_table()).unwrap();
    point.insert("x", Node::from(1)).unwrap();
    point.insert("label", Node::from("origin")).unwrap();

    saw_table(&mut root, "a.b.c")
        .unwrap()
        .insert("deep", Node::from("yes"))
        .unwrap();
    for name in ["hammer", "nail", "screw"] {
        let mut item = saw_table_array(&mut root, "shop.items").unwrap();
        item.insert("name", Node::from(name)).unwrap();
        item.insert("tags", Node::list(vec![Node::from(name)]).unwrap())
            .unwrap();
    }
    saw_table(&mut root, "shop.items.size")
        .unwrap()
        .insert("w", Node::from(4))
        .unwrap();
    root
}

#[test]
fn test_free_releases_every_allocation() {
    let baseline = LIVE_BYTES.load(Ordering::SeqCst);

    let root = every_kind();
    assert!(LIVE_BYTES.load(Ordering::SeqCst) > baseline);

    let stats = free(root);
    assert_eq!(LIVE_BYTES.load(Ordering::SeqCst), baseline);
    assert!(stats.nodes > 30);
    assert!(stats.strings > 20);
}
