use std::ops::ControlFlow;

use divan::{Bencher, black_box};
use thicket::{Document, NodeId, TreeBuilder, WalkMode};

fn main() {
    divan::main();
}

// Tree shapes: fan-out per element, depth
const SMALL: (usize, usize) = (4, 4); // ~1K nodes
const LARGE: (usize, usize) = (6, 6); // ~170K nodes

/// Every element gets `fanout` element children, each followed by a text
/// node and a comment.
fn build(fanout: usize, depth: usize) -> (Document, NodeId) {
    fn fill(b: &mut TreeBuilder<'_>, fanout: usize, depth: usize) {
        if depth == 0 {
            return;
        }
        for i in 0..fanout {
            b.element("div", |b| {
                b.attr("id", i.to_string());
                fill(b, fanout, depth - 1);
            });
            b.text("some text");
            b.comment("a comment");
        }
    }

    let mut doc = Document::new();
    let root = doc.build(|b| b.element("body", |b| fill(b, fanout, depth)));
    (doc, root)
}

fn walk_count(doc: &Document, root: NodeId, mode: WalkMode) -> usize {
    ramble::walk(doc, root, Some(root), true, mode)
        .unwrap()
        .count()
}

#[divan::bench]
fn walk_all_small(bencher: Bencher) {
    let (doc, root) = build(SMALL.0, SMALL.1);
    bencher.bench_local(|| black_box(walk_count(&doc, black_box(root), WalkMode::AllNodes)));
}

#[divan::bench]
fn walk_all_large(bencher: Bencher) {
    let (doc, root) = build(LARGE.0, LARGE.1);
    bencher.bench_local(|| black_box(walk_count(&doc, black_box(root), WalkMode::AllNodes)));
}

#[divan::bench]
fn walk_elements_large(bencher: Bencher) {
    let (doc, root) = build(LARGE.0, LARGE.1);
    bencher.bench_local(|| black_box(walk_count(&doc, black_box(root), WalkMode::ElementLike)));
}

// Baseline: indextree's own pre-order traversal, no filtering
#[divan::bench]
fn indextree_descendants_large(bencher: Bencher) {
    let (doc, root) = build(LARGE.0, LARGE.1);
    bencher.bench_local(|| black_box(root.descendants(doc.arena()).count()));
}

#[divan::bench]
fn iter_text_large(bencher: Bencher) {
    let (doc, root) = build(LARGE.0, LARGE.1);
    bencher.bench_local(|| {
        let len: usize = doc.iter_text(black_box(root)).unwrap().map(str::len).sum();
        black_box(len)
    });
}

#[divan::bench]
fn for_each_mut_large(bencher: Bencher) {
    let (doc, root) = build(LARGE.0, LARGE.1);
    bencher
        .with_inputs(|| doc.clone())
        .bench_local_values(|mut doc| {
            let mut tagged = 0;
            doc.for_each_mut(root, Some(root), false, WalkMode::ElementLike, |doc, node, _| {
                if doc.set_attr(node, "seen", "1") {
                    tagged += 1;
                }
                ControlFlow::Continue(())
            })
            .unwrap();
            black_box(tagged)
        });
}

#[divan::bench]
fn strip_comments_large(bencher: Bencher) {
    let (doc, root) = build(LARGE.0, LARGE.1);
    bencher
        .with_inputs(|| doc.clone())
        .bench_local_values(|mut doc| {
            let removed = doc
                .strip_elements(root, [thicket::NameTest::Comment], false)
                .unwrap();
            black_box(removed)
        });
}
