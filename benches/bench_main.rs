use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use headway::prelude::*;

/// A synthetic grid: `lines` parallel lines of `stops` stops each, trips
/// every 15 minutes through the morning, adjacent lines joined by a walking
/// link at their middle stop.
fn grid_network(lines: usize, stops: usize) -> TransitNetwork {
    let mut network = Lines::default();
    for l in 0..lines {
        let route = network.add_line(format!("L{l:02}")).add_route("out");
        for s in 0..stops {
            route.add_stop(format!("s{l}_{s}"));
        }
        for day in Day::WEEK {
            route.schedule_mut(day).set_stop_count(stops);
        }
        let mut start = Time::from_hm(6, 0);
        while start < Time::from_hm(10, 0) {
            let trip: Vec<Time> = (0..stops)
                .map(|s| start + DifTime::from_minutes(3 * s as i32))
                .collect();
            for day in Day::WEEK {
                network
                    .add_line(format!("L{l:02}"))
                    .add_route("out")
                    .schedule_mut(day)
                    .add_time_line(0, trip.clone())
                    .unwrap();
            }
            start += DifTime::from_minutes(15);
        }
    }
    let mid = stops / 2;
    for l in 1..lines {
        network.add_walking(
            format!("s{}_{mid}", l - 1),
            format!("s{l}_{mid}"),
            DifTime::from_minutes(5),
        );
    }
    TransitNetwork::new(network)
}

fn bench_plan_from_arrive(c: &mut Criterion) {
    let network = grid_network(8, 15);
    let from = "s0_0".to_string();
    let to = "s7_14".to_string();
    let arrive = Time::from_hm(12, 0);

    c.bench_function("plan_from_arrive/grid_8x15", |b| {
        b.iter(|| {
            network
                .plan_from_arrive(
                    Day::Monday,
                    black_box(&from),
                    black_box(&to),
                    black_box(arrive),
                    Details::Steps,
                    DifTime::from_minutes(5),
                )
                .unwrap()
        })
    });
}

fn bench_table(c: &mut Criterion) {
    let network = grid_network(4, 10);
    let from = "s0_0".to_string();
    let to = "s3_9".to_string();

    c.bench_function("table/grid_4x10", |b| {
        b.iter(|| {
            network
                .table(
                    Day::Monday,
                    black_box(&from),
                    black_box(&to),
                    Details::Transfers,
                    DifTime::from_minutes(5),
                )
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_plan_from_arrive, bench_table);
criterion_main!(benches);
