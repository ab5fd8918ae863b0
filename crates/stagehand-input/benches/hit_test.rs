use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stagehand_graphics::{Point, Rect};
use stagehand_input::{
    hit_test, InteractiveNode, InteractiveRegistry, NodeId, PointerEvent,
};
use std::rc::Rc;

#[derive(Clone)]
struct BenchNode {
    data: Rc<BenchNodeData>,
}

struct BenchNodeData {
    id: NodeId,
    depth: f32,
    bounds: Rect,
}

impl BenchNode {
    fn new(id: NodeId, depth: f32, bounds: Rect) -> Self {
        Self {
            data: Rc::new(BenchNodeData { id, depth, bounds }),
        }
    }
}

impl InteractiveNode for BenchNode {
    fn node_id(&self) -> NodeId {
        self.data.id
    }

    fn depth(&self) -> f32 {
        self.data.depth
    }

    fn clickable(&self) -> bool {
        true
    }

    fn hit_bounds(&self, stage_point: Point) -> bool {
        self.data.bounds.contains(stage_point)
    }

    fn hit_area(&self, stage_point: Point) -> bool {
        self.data.bounds.contains(stage_point)
    }

    fn global_to_local(&self, stage_point: Point) -> Point {
        stage_point
    }

    fn parent(&self) -> Option<Self> {
        None
    }

    fn attached(&self) -> bool {
        true
    }

    fn deliver(&self, _event: &PointerEvent<Self>) {}
}

fn grid_registry(count: u32) -> InteractiveRegistry<BenchNode> {
    let mut registry = InteractiveRegistry::new();
    for i in 0..count {
        let x = (i % 32) as f32 * 10.0;
        let y = (i / 32) as f32 * 10.0;
        registry.register(BenchNode::new(
            i as NodeId + 1,
            i as f32,
            Rect::new(x, y, 8.0, 8.0),
        ));
    }
    registry
}

fn hit_test_grid(c: &mut Criterion) {
    let registry = grid_registry(512);

    c.bench_function("hit_test_512_nodes_deep_hit", |b| {
        // Hits the last row, so the scan walks nearly the whole list.
        let point = Point::new(305.0, 155.0);
        b.iter(|| hit_test(&registry, black_box(point)));
    });

    c.bench_function("hit_test_512_nodes_miss", |b| {
        let point = Point::new(9999.0, 9999.0);
        b.iter(|| hit_test(&registry, black_box(point)));
    });
}

criterion_group!(benches, hit_test_grid);
criterion_main!(benches);
