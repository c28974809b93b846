use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use rigcam_brain_core::{
    BlendCurve, BlendRow, Brain, CameraDirectory, CameraId, CameraState, Config, VirtualCamera,
};

struct BenchCamera {
    id: CameraId,
    name: String,
    priority: i32,
    active: bool,
    state: CameraState,
}

impl VirtualCamera for BenchCamera {
    fn name(&self) -> &str {
        &self.name
    }
    fn priority(&self) -> i32 {
        self.priority
    }
    fn is_active(&self) -> bool {
        self.active
    }
    fn state(&self) -> CameraState {
        self.state
    }
}

struct BenchDirectory {
    cams: Vec<BenchCamera>,
}

impl BenchDirectory {
    fn with_cameras(n: u32) -> Self {
        let mut cams: Vec<BenchCamera> = (0..n)
            .map(|i| BenchCamera {
                id: CameraId(i),
                name: format!("cam{i}"),
                priority: i as i32,
                active: true,
                state: CameraState {
                    position: Vec3::new(i as f32, 0.0, 0.0),
                    ..CameraState::default()
                },
            })
            .collect();
        cams.sort_by_key(|c| std::cmp::Reverse(c.priority));
        Self { cams }
    }
}

impl CameraDirectory for BenchDirectory {
    fn len(&self) -> usize {
        self.cams.len()
    }
    fn id_at(&self, index: usize) -> CameraId {
        self.cams[index].id
    }
    fn get(&self, id: CameraId) -> Option<&dyn VirtualCamera> {
        self.cams
            .iter()
            .find(|c| c.id == id)
            .map(|c| c as &dyn VirtualCamera)
    }
    fn get_mut(&mut self, id: CameraId) -> Option<&mut dyn VirtualCamera> {
        self.cams
            .iter_mut()
            .find(|c| c.id == id)
            .map(|c| c as &mut dyn VirtualCamera)
    }
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_64_cameras_with_overrides", |bencher| {
        let mut dir = BenchDirectory::with_cameras(64);
        let mut brain = Brain::new(Config::default());
        brain.blend_table_mut().push_row(BlendRow {
            from: String::new(),
            to: String::new(),
            curve: BlendCurve::EaseInOut,
            duration: 2.0,
        });
        brain.tick(&mut dir, 0.016);
        // Two stacked half-weight overrides keep the composer busy.
        brain.set_camera_override(&mut dir, None, None, Some(CameraId(10)), 0.5, None);
        brain.set_camera_override(&mut dir, None, None, Some(CameraId(20)), 0.5, None);

        bencher.iter(|| {
            let out = brain.tick(&mut dir, black_box(0.016));
            black_box(&out.shot);
        });
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
