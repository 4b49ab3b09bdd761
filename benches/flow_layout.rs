use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sensor_deck::core::{FlowLayout, SensorReading};
use sensor_deck::dashboard::Dashboard;
use sensor_deck::types::Size;

fn card_sizes(n: usize) -> Vec<Size> {
    (0..n)
        .map(|i| Size::new(300 + (i % 7) as i32 * 20, 200 + (i % 5) as i32 * 15))
        .collect()
}

fn bench_flow_layout(c: &mut Criterion) {
    let flow = FlowLayout::new(10, 10);
    let mut group = c.benchmark_group("flow_layout");
    for n in [10usize, 100, 1000] {
        let items = card_sizes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| flow.layout(black_box(items), black_box(1920)))
        });
    }
    group.finish();
}

fn bench_dashboard_layout(c: &mut Criterion) {
    let mut dashboard = Dashboard::default();
    dashboard.set_container_width(1920);
    for i in 0..500 {
        let id = format!("sensor-{i:04}");
        let reading = SensorReading::new(id.as_str())
            .with_temperature(60.0 + (i % 40) as f64)
            .with_humidity(40.0 + (i % 30) as f64);
        dashboard.upsert(&id, None, &reading, None);
    }
    dashboard.set_show_major(false);

    c.bench_function("dashboard_layout_500", |b| b.iter(|| dashboard.layout()));
}

criterion_group!(benches, bench_flow_layout, bench_dashboard_layout);
criterion_main!(benches);
