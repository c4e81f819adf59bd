use spatio_grid::prelude::*;
use std::thread;

type Point = TrackedPoint<u64, f64>;

#[test]
fn test_concurrent_puts_into_unseen_cells() {
    let grid = Arc::new(SpatialHash::<Point>::new(10.0));

    // Every thread races on the same never-before-seen cells.
    let handles: Vec<_> = (0..8u64)
        .map(|t| {
            let grid = grid.clone();
            thread::spawn(move || {
                let mut nodes = Vec::new();
                for i in 0..200u64 {
                    let cell = (i % 20) as f64;
                    let node = Arc::new(Point::new(t * 1_000 + i, cell * 10.0 + 5.0, 5.0));
                    grid.put(&node);
                    nodes.push(node);
                }
                nodes
            })
        })
        .collect();

    let mut nodes = Vec::new();
    for h in handles {
        nodes.extend(h.join().unwrap());
    }

    assert_eq!(grid.cell_count(), 20);
    assert_eq!(grid.stats().nodes, nodes.len());
    assert_eq!(grid.query_rect(100.0, 5.0, 200.0, 0.0).len(), nodes.len());
}

#[test]
fn test_concurrent_updates_different_nodes() {
    let grid = Arc::new(SpatialHash::<Point>::new(25.0));

    let handles: Vec<_> = (0..10u64)
        .map(|t| {
            let grid = grid.clone();
            thread::spawn(move || {
                let node = Arc::new(Point::new(t, 0.0, t as f64 * 30.0));
                grid.put(&node);
                for step in 1..=100 {
                    node.set_position(step as f64 * 7.0, t as f64 * 30.0);
                    grid.update(&node);
                }
                node
            })
        })
        .collect();

    let nodes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(grid.stats().nodes, nodes.len());
    for node in &nodes {
        let (x, y) = node.position();
        assert_eq!(x, 700.0);
        let found = grid.search(x, y, 0.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), node.id());
    }

    // Every cell the nodes passed through has been pruned.
    assert_eq!(grid.cell_count(), nodes.len());
}

#[test]
fn test_queries_during_mutation() {
    let grid = Arc::new(SpatialHash::<Point>::new(20.0));
    let anchors: Vec<_> = (0..50u64)
        .map(|i| Arc::new(Point::new(10_000 + i, 500.0 + i as f64, 500.0)))
        .collect();
    grid.put_many(&anchors);

    let writers: Vec<_> = (0..4u64)
        .map(|t| {
            let grid = grid.clone();
            thread::spawn(move || {
                let node = Arc::new(Point::new(t, 0.0, 0.0));
                grid.put(&node);
                for step in 0..500 {
                    let offset = (step % 50) as f64 * 10.0;
                    node.set_position(offset, offset);
                    grid.update(&node);
                }
                grid.remove(&node);
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let grid = grid.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    // The anchors are never mutated, so they are always visible.
                    let found = grid.search(525.0, 500.0, 30.0);
                    assert_eq!(found.len(), 50);
                    let _ = grid.query_rect(250.0, 250.0, 500.0, 500.0);
                }
            })
        })
        .collect();

    for h in writers.into_iter().chain(readers) {
        h.join().unwrap();
    }

    assert_eq!(grid.stats().nodes, anchors.len());
}
